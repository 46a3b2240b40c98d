//! Brevo-kompatibler HTTP-API-Versand
//!
//! Versendet Mails ueber die transaktionale Mail-API von Brevo
//! (POST /v3/smtp/email). API-Key und Absender kommen aus der Konfiguration,
//! nicht aus ambientem Prozess-Zustand.

use serde::Serialize;

use crate::error::{MailError, MailResult};
use crate::{MailAuftrag, Mailer};

const BREVO_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Serialize)]
struct ApiAdresse<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiMailBody<'a> {
    sender: ApiAdresse<'a>,
    to: Vec<ApiAdresse<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

/// Mail-Versand ueber die Brevo-HTTP-API
#[derive(Debug, Clone)]
pub struct BrevoMailer {
    client: reqwest::Client,
    api_key: String,
    absender: String,
    api_url: String,
}

impl BrevoMailer {
    /// Erstellt einen neuen BrevoMailer
    ///
    /// Gibt `MailError::Konfiguration` zurueck wenn API-Key oder Absender leer sind.
    pub fn neu(api_key: impl Into<String>, absender: impl Into<String>) -> MailResult<Self> {
        let api_key = api_key.into();
        let absender = absender.into();

        if api_key.trim().is_empty() {
            return Err(MailError::Konfiguration("API-Key fehlt".into()));
        }
        if absender.trim().is_empty() {
            return Err(MailError::Konfiguration("Absender-Adresse fehlt".into()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            absender,
            api_url: BREVO_API_URL.into(),
        })
    }

    /// Ueberschreibt die API-URL (fuer Tests gegen einen lokalen Stub)
    pub fn mit_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

impl Mailer for BrevoMailer {
    async fn senden(&self, auftrag: &MailAuftrag) -> MailResult<()> {
        let body = ApiMailBody {
            sender: ApiAdresse {
                email: &self.absender,
            },
            to: vec![ApiAdresse { email: &auftrag.to }],
            subject: &auftrag.subject,
            html_content: &auftrag.html,
        };

        let resp = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(to = %auftrag.to, subject = %auftrag.subject, "Mail versendet");
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(MailError::Abgelehnt {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leerer_api_key_abgelehnt() {
        let ergebnis = BrevoMailer::neu("", "noreply@example.com");
        assert!(matches!(ergebnis, Err(MailError::Konfiguration(_))));
    }

    #[test]
    fn leerer_absender_abgelehnt() {
        let ergebnis = BrevoMailer::neu("key_123", "   ");
        assert!(matches!(ergebnis, Err(MailError::Konfiguration(_))));
    }

    #[test]
    fn gueltige_konfiguration() {
        let mailer = BrevoMailer::neu("key_123", "noreply@example.com");
        assert!(mailer.is_ok());
    }
}
