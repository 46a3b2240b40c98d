//! Fehlertypen fuer den Mail-Versand

use thiserror::Error;

/// Alle moeglichen Fehler beim Mail-Versand
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail-Konfiguration unvollstaendig: {0}")]
    Konfiguration(String),

    #[error("HTTP-Fehler beim Versand: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Versand abgelehnt (Status {status}): {body}")]
    Abgelehnt { status: u16, body: String },
}

/// Result-Alias fuer den Mail-Versand
pub type MailResult<T> = Result<T, MailError>;
