//! Datenbankmodelle fuer Pfoertner
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind von den Domain-Typen getrennt und dienen als reine Datenuebertragungsobjekte.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Abo-Stufen
// ---------------------------------------------------------------------------

/// Abonnement-Stufe eines Kontos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AboStufe {
    #[default]
    Starter,
    Pro,
    Business,
}

impl AboStufe {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Business => "business",
        }
    }
}

impl std::str::FromStr for AboStufe {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(Self::Starter),
            "pro" => Ok(Self::Pro),
            "business" => Ok(Self::Business),
            other => Err(format!("Unbekannte Abo-Stufe: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Konten
// ---------------------------------------------------------------------------

/// Konto-Datensatz aus der Datenbank
///
/// `verification_token` ist nur bei unverifizierten Konten nicht-leer und
/// wird beim Verifizieren geleert. `session_token` ist leer wenn keine
/// aktive Session existiert; es gilt hoechstens ein Token gleichzeitig.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KontoRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: String,
    pub abo: AboStufe,
    pub verifiziert: bool,
    pub verification_token: String,
    pub session_token: String,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Kontos
#[derive(Debug, Clone)]
pub struct NeuesKonto<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub avatar_url: &'a str,
    pub verification_token: &'a str,
}

/// Daten zum Aktualisieren eines Kontos
///
/// Bewusst enges Update-Struct statt generischem Partial-Update:
/// nur die hier aufgefuehrten Felder sind ueberhaupt aenderbar.
#[derive(Debug, Clone, Default)]
pub struct KontoUpdate {
    pub abo: Option<AboStufe>,
    pub verifiziert: Option<bool>,
    pub verification_token: Option<String>,
    pub session_token: Option<String>,
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn abo_stufe_roundtrip() {
        for stufe in [AboStufe::Starter, AboStufe::Pro, AboStufe::Business] {
            assert_eq!(AboStufe::from_str(stufe.als_str()).unwrap(), stufe);
        }
    }

    #[test]
    fn abo_stufe_unbekannt() {
        assert!(AboStufe::from_str("premium").is_err());
        assert!(AboStufe::from_str("").is_err());
    }

    #[test]
    fn abo_stufe_standard_ist_starter() {
        assert_eq!(AboStufe::default(), AboStufe::Starter);
    }
}
