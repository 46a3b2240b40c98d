//! pfoertner-server – Bibliotheks-Root
//!
//! Deklariert alle Server-Module und stellt den oeffentlichen
//! Einstiegspunkt fuer Integrationstests bereit.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use pfoertner_auth::{KontoService, SessionSigner};
use pfoertner_avatar::AvatarSpeicher;
use pfoertner_db::{DatabaseConfig, SqliteDb};
use pfoertner_mail::{BrevoMailer, LogMailer, MailVersand};

use config::ServerConfig;

/// Konkreter Service-Typ des Servers
pub type AppKontoService = KontoService<SqliteDb, MailVersand>;

/// Axum-State: der geteilte Konto-Service
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AppKontoService>,
}

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet den Server und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Datenbankverbindung herstellen (inkl. Migrationen)
    /// 2. Mail-Versand und Konto-Service aufbauen
    /// 3. REST-API starten
    /// 4. Auf Ctrl-C warten
    pub async fn starten(self) -> Result<()> {
        let db = SqliteDb::oeffnen(&DatabaseConfig {
            url: self.config.datenbank.url.clone(),
            max_verbindungen: self.config.datenbank.max_verbindungen,
            sqlite_wal: self.config.datenbank.wal,
        })
        .await?;

        let service = Arc::new(konto_service_aufbauen(&self.config, db)?);
        let app = routes::api_router()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(AppState { service });

        let adresse = self.config.bind_adresse();
        let listener = tokio::net::TcpListener::bind(&adresse).await?;
        tracing::info!(adresse = %adresse, "REST-API bereit");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
            })
            .await?;

        Ok(())
    }
}

/// Baut den Konto-Service aus Konfiguration und Datenbank auf
pub fn konto_service_aufbauen(config: &ServerConfig, db: SqliteDb) -> Result<AppKontoService> {
    if config.auth.jwt_geheimnis.trim().is_empty() {
        anyhow::bail!(
            "JWT-Geheimnis fehlt: [auth].jwt_geheimnis setzen oder PFOERTNER_JWT_SECRET exportieren"
        );
    }

    let mailer = match config.mail.versand.as_str() {
        "brevo" => MailVersand::Brevo(BrevoMailer::neu(
            config.mail.brevo_api_key.clone(),
            config.mail.absender.clone(),
        )?),
        "log" => MailVersand::Log(LogMailer::neu()),
        anderes => anyhow::bail!("Unbekannter Mail-Versandweg: {anderes}"),
    };

    Ok(KontoService::neu(
        Arc::new(db),
        Arc::new(mailer),
        SessionSigner::neu(&config.auth.jwt_geheimnis),
        AvatarSpeicher::neu(&config.avatar.verzeichnis),
        config.server.base_url.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn service_aufbau_ohne_geheimnis_schlaegt_fehl() {
        let config = ServerConfig::default();
        let db = SqliteDb::in_memory().await.unwrap();
        let ergebnis = konto_service_aufbauen(&config, db);
        assert!(ergebnis.is_err());
    }

    #[tokio::test]
    async fn service_aufbau_mit_log_versand() {
        let mut config = ServerConfig::default();
        config.auth.jwt_geheimnis = "test_geheimnis".into();
        let db = SqliteDb::in_memory().await.unwrap();
        assert!(konto_service_aufbauen(&config, db).is_ok());
    }

    #[tokio::test]
    async fn brevo_ohne_api_key_schlaegt_fehl() {
        let mut config = ServerConfig::default();
        config.auth.jwt_geheimnis = "test_geheimnis".into();
        config.mail.versand = "brevo".into();
        let db = SqliteDb::in_memory().await.unwrap();
        assert!(konto_service_aufbauen(&config, db).is_err());
    }
}
