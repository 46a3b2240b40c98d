//! Log-Versand fuer Entwicklung und Tests
//!
//! Schreibt die Mail ins Log statt sie zu versenden. Optional kann der
//! Versand kuenstlich fehlschlagen, um Fehlerpfade zu testen.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{MailError, MailResult};
use crate::{MailAuftrag, Mailer};

/// Mail-"Versand" der nur loggt
#[derive(Debug, Clone, Default)]
pub struct LogMailer {
    gesendet: Arc<AtomicUsize>,
    fehlschlagen: bool,
}

impl LogMailer {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Variante die jeden Versand fehlschlagen laesst (fuer Fire-and-Forget-Tests)
    pub fn immer_fehlschlagend() -> Self {
        Self {
            gesendet: Arc::new(AtomicUsize::new(0)),
            fehlschlagen: true,
        }
    }

    /// Anzahl erfolgreich "versendeter" Mails
    pub fn anzahl_gesendet(&self) -> usize {
        self.gesendet.load(Ordering::SeqCst)
    }
}

impl Mailer for LogMailer {
    async fn senden(&self, auftrag: &MailAuftrag) -> MailResult<()> {
        if self.fehlschlagen {
            return Err(MailError::Abgelehnt {
                status: 503,
                body: "LogMailer: Versand deaktiviert".into(),
            });
        }

        self.gesendet.fetch_add(1, Ordering::SeqCst);
        tracing::info!(
            to = %auftrag.to,
            subject = %auftrag.subject,
            "Mail (Log-Versand, nicht zugestellt)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auftrag() -> MailAuftrag {
        MailAuftrag {
            to: "test@example.com".into(),
            subject: "Test".into(),
            html: "<p>Hallo</p>".into(),
        }
    }

    #[tokio::test]
    async fn log_versand_zaehlt() {
        let mailer = LogMailer::neu();
        mailer.senden(&auftrag()).await.unwrap();
        mailer.senden(&auftrag()).await.unwrap();
        assert_eq!(mailer.anzahl_gesendet(), 2);
    }

    #[tokio::test]
    async fn fehlschlagender_versand() {
        let mailer = LogMailer::immer_fehlschlagend();
        let ergebnis = mailer.senden(&auftrag()).await;
        assert!(matches!(ergebnis, Err(MailError::Abgelehnt { .. })));
        assert_eq!(mailer.anzahl_gesendet(), 0);
    }
}
