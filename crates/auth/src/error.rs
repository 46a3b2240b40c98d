//! Fehlertypen fuer den Konto-Service
//!
//! Die Varianten bilden die Fehlertaxonomie des Kontos ab: Konflikt,
//! nicht gefunden, ungueltige Vorbedingung, nicht autorisiert. Fehler
//! von Kollaborateuren (DB, Mail, Avatar) propagieren als interne Fehler.

use thiserror::Error;

/// Alle moeglichen Fehler im Konto-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Konflikt ---
    #[error("E-Mail bereits vergeben")]
    EmailVergeben,

    // --- Nicht gefunden ---
    #[error("Konto nicht gefunden")]
    KontoNichtGefunden,

    #[error("Verifikations-Token unbekannt")]
    TokenUnbekannt,

    // --- Ungueltige Vorbedingung ---
    #[error("E-Mail wurde noch nicht verifiziert")]
    NichtVerifiziert,

    #[error("Verifikation wurde bereits abgeschlossen")]
    BereitsVerifiziert,

    #[error("Keine Avatar-Datei angehaengt")]
    KeineDateiAngehaengt,

    #[error("Ungueltige Eingabe: {0}")]
    UngueltigeEingabe(String),

    // --- Nicht autorisiert ---
    // Eine gemeinsame Meldung fuer "Konto unbekannt" und "Passwort falsch",
    // damit die Antwort nicht verraet welches von beiden zutrifft.
    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    #[error("Session ungueltig oder abgelaufen")]
    SessionUngueltig,

    // --- Intern ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    #[error("Token-Signierung fehlgeschlagen: {0}")]
    TokenSignierung(String),

    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] pfoertner_db::DbError),

    #[error("Mail-Versand fehlgeschlagen: {0}")]
    Mail(#[from] pfoertner_mail::MailError),

    #[error("Avatar-Fehler: {0}")]
    Avatar(#[from] pfoertner_avatar::AvatarError),

    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// HTTP-Statuscode fuer die REST-Schicht
    pub fn http_status(&self) -> u16 {
        match self {
            Self::EmailVergeben => 409,
            Self::KontoNichtGefunden | Self::TokenUnbekannt => 404,
            Self::NichtVerifiziert
            | Self::BereitsVerifiziert
            | Self::KeineDateiAngehaengt
            | Self::UngueltigeEingabe(_) => 400,
            Self::UngueltigeAnmeldedaten | Self::SessionUngueltig => 401,
            Self::PasswortHashing(_)
            | Self::TokenSignierung(_)
            | Self::Datenbank(_)
            | Self::Mail(_)
            | Self::Avatar(_)
            | Self::Intern(_) => 500,
        }
    }
}

/// Result-Alias fuer den Konto-Service
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuscodes_der_taxonomie() {
        assert_eq!(AuthError::EmailVergeben.http_status(), 409);
        assert_eq!(AuthError::TokenUnbekannt.http_status(), 404);
        assert_eq!(AuthError::NichtVerifiziert.http_status(), 400);
        assert_eq!(AuthError::UngueltigeAnmeldedaten.http_status(), 401);
        assert_eq!(AuthError::SessionUngueltig.http_status(), 401);
        assert_eq!(AuthError::intern("x").http_status(), 500);
    }
}
