//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist. Geheimnisse (JWT-Schluessel, Mail-API-Key) koennen
//! per Umgebungsvariable ueberschrieben werden und liegen damit nicht
//! zwingend in der Datei.

use serde::{Deserialize, Serialize};

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Auth-Einstellungen (Session-Signierung)
    pub auth: AuthEinstellungen,
    /// Mail-Einstellungen
    pub mail: MailEinstellungen,
    /// Avatar-Einstellungen
    pub avatar: AvatarEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Bind-Adresse fuer die REST-API
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub port: u16,
    /// Oeffentliche Basis-URL (fuer Links in Verifikations-Mails)
    pub base_url: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 3000,
            base_url: "http://localhost:3000".into(),
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL (z.B. "sqlite://pfoertner.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://pfoertner.db".into(),
            max_verbindungen: 5,
            wal: true,
        }
    }
}

/// Auth-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// Geheimnis fuer die HS256-Signierung der Session-Tokens.
    /// Ueberschreibbar via PFOERTNER_JWT_SECRET.
    pub jwt_geheimnis: String,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            jwt_geheimnis: String::new(),
        }
    }
}

/// Mail-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailEinstellungen {
    /// Versandweg: "log" (Entwicklung) oder "brevo"
    pub versand: String,
    /// Absender-Adresse fuer Verifikations-Mails
    pub absender: String,
    /// API-Key fuer Brevo. Ueberschreibbar via PFOERTNER_BREVO_API_KEY.
    pub brevo_api_key: String,
}

impl Default for MailEinstellungen {
    fn default() -> Self {
        Self {
            versand: "log".into(),
            absender: "noreply@localhost".into(),
            brevo_api_key: String::new(),
        }
    }
}

/// Avatar-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarEinstellungen {
    /// Ablageverzeichnis fuer hochgeladene Avatare
    pub verzeichnis: String,
}

impl Default for AvatarEinstellungen {
    fn default() -> Self {
        Self {
            verzeichnis: "public/avatars".into(),
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level (trace/debug/info/warn/error)
    pub level: String,
    /// Format (text/json)
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei
    ///
    /// Eine fehlende Datei ist kein Fehler: dann gelten die Standardwerte.
    /// Umgebungsvariablen fuer Geheimnisse werden zuletzt angewendet.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        let mut config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str(&inhalt)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };

        config.umgebung_anwenden();
        Ok(config)
    }

    /// Wendet Umgebungsvariablen-Overrides an (Geheimnisse)
    fn umgebung_anwenden(&mut self) {
        if let Ok(v) = std::env::var("PFOERTNER_JWT_SECRET") {
            self.auth.jwt_geheimnis = v;
        }
        if let Ok(v) = std::env::var("PFOERTNER_BREVO_API_KEY") {
            self.mail.brevo_api_key = v;
        }
    }

    /// Vollstaendige Bind-Adresse der REST-API
    pub fn bind_adresse(&self) -> String {
        format!("{}:{}", self.server.bind_adresse, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardwerte() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.mail.versand, "log");
        assert!(cfg.datenbank.wal);
        assert_eq!(cfg.bind_adresse(), "0.0.0.0:3000");
    }

    #[test]
    fn fehlende_datei_gibt_standardwerte() {
        let cfg = ServerConfig::laden("/pfad/der/nicht/existiert.toml").unwrap();
        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn toml_teilweise_ueberschreiben() {
        let toml_str = r#"
            [server]
            port = 8080
            base_url = "https://konto.example.com"

            [mail]
            versand = "brevo"
            absender = "noreply@example.com"
        "#;
        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.base_url, "https://konto.example.com");
        assert_eq!(cfg.mail.versand, "brevo");
        // Nicht gesetzte Sektionen behalten Standardwerte
        assert_eq!(cfg.datenbank.max_verbindungen, 5);
        assert_eq!(cfg.logging.level, "info");
    }
}
