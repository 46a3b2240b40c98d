//! pfoertner-avatar – Avatar-Ablage und Bild-Normalisierung
//!
//! Dieses Crate implementiert:
//! - die Ablage hochgeladener Avatar-Dateien auf der Platte
//! - die Normalisierung auf eine feste 250x250-Leinwand
//! - die deterministische Ableitung der Standard-Avatar-URL (Gravatar)

pub mod error;
pub mod gravatar;
pub mod normalisieren;
pub mod speicher;

pub use error::{AvatarError, AvatarResult};
pub use gravatar::standard_avatar_url;
pub use normalisieren::auf_leinwand_normalisieren;
pub use speicher::AvatarSpeicher;
