//! pfoertner-mail – Mail-Versand
//!
//! Dieses Crate implementiert:
//! - das `Mailer`-Trait (Schnittstelle fuer den Versand)
//! - einen Brevo-kompatiblen HTTP-API-Versand (Produktion)
//! - einen Log-Versand fuer Entwicklung und Tests
//! - die Vorlage fuer die Verifikations-Mail

pub mod brevo;
pub mod error;
pub mod log_versand;
pub mod vorlage;

use serde::{Deserialize, Serialize};

pub use brevo::BrevoMailer;
pub use error::{MailError, MailResult};
pub use log_versand::LogMailer;
pub use vorlage::verifikations_mail;

/// Eine zu versendende Mail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailAuftrag {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Abstrakter Mail-Versand
///
/// Der Aufrufer entscheidet, ob ein Versandfehler fatal ist. Die
/// Registrierung behandelt ihn als nicht-fatal (Fire-and-Forget).
#[allow(async_fn_in_trait)]
pub trait Mailer: Send + Sync {
    /// Versendet eine Mail
    async fn senden(&self, auftrag: &MailAuftrag) -> MailResult<()>;
}

/// Laufzeit-Auswahl des Versandwegs (Konfiguration entscheidet)
#[derive(Debug, Clone)]
pub enum MailVersand {
    Brevo(BrevoMailer),
    Log(LogMailer),
}

impl Mailer for MailVersand {
    async fn senden(&self, auftrag: &MailAuftrag) -> MailResult<()> {
        match self {
            Self::Brevo(m) => m.senden(auftrag).await,
            Self::Log(m) => m.senden(auftrag).await,
        }
    }
}
