//! Fehlertypen fuer das Avatar-Crate

use thiserror::Error;

/// Alle moeglichen Fehler bei Ablage und Normalisierung
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bildverarbeitung fehlgeschlagen: {0}")]
    Bild(#[from] image::ImageError),

    #[error("Ungueltiger Dateiname: {0}")]
    UngueltigerDateiname(String),

    #[error("Interner Fehler: {0}")]
    Intern(String),
}

/// Result-Alias fuer das Avatar-Crate
pub type AvatarResult<T> = Result<T, AvatarError>;
