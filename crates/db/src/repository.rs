//! Repository-Trait fuer Konto-Datenzugriffe
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Alle Lookups geben `Ok(None)` zurueck wenn
//! kein Datensatz existiert; Fehler sind Transportfehlern vorbehalten.

use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{KontoRecord, KontoUpdate, NeuesKonto};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://pfoertner.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://pfoertner.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Konto-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait KontoRepository: Send + Sync {
    /// Ein neues Konto anlegen
    ///
    /// Gibt `DbError::Eindeutigkeit` zurueck wenn die E-Mail bereits vergeben ist.
    async fn create(&self, data: NeuesKonto<'_>) -> DbResult<KontoRecord>;

    /// Ein Konto anhand seiner ID laden
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<KontoRecord>>;

    /// Ein Konto anhand der E-Mail-Adresse laden (Login-Schluessel)
    async fn get_by_email(&self, email: &str) -> DbResult<Option<KontoRecord>>;

    /// Ein Konto anhand des Verifikations-Tokens laden
    ///
    /// Leere Tokens matchen nie – ein konsumierter Token ist damit
    /// automatisch "nicht gefunden".
    async fn get_by_verification_token(&self, token: &str) -> DbResult<Option<KontoRecord>>;

    /// Ein Konto aktualisieren (nur gesetzte Felder)
    async fn update(&self, id: Uuid, data: KontoUpdate) -> DbResult<KontoRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_config_standard() {
        let cfg = DatabaseConfig::default();
        assert!(cfg.sqlite_wal);
        assert_eq!(cfg.max_verbindungen, 5);
        assert!(cfg.url.starts_with("sqlite://"));
    }
}
