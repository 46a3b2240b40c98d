//! Vorlage fuer die Verifikations-Mail

use crate::MailAuftrag;

/// Baut die Verifikations-Mail mit dem Bestaetigungs-Link
///
/// `base_url` ist die oeffentliche Basis-URL des Servers (ohne
/// abschliessenden Slash), `token` der Verifikations-Token des Kontos.
pub fn verifikations_mail(base_url: &str, email: &str, token: &str) -> MailAuftrag {
    let base = base_url.trim_end_matches('/');
    let link = format!("{base}/api/auth/users/verify/{token}");

    MailAuftrag {
        to: email.to_string(),
        subject: "Verify email".to_string(),
        html: format!(r#"<a target="_blank" href="{link}">Click to verify your email</a>"#),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_enthaelt_token() {
        let mail = verifikations_mail("https://api.example.com", "a@x.com", "tok_123");
        assert_eq!(mail.to, "a@x.com");
        assert_eq!(mail.subject, "Verify email");
        assert!(mail
            .html
            .contains("https://api.example.com/api/auth/users/verify/tok_123"));
    }

    #[test]
    fn doppelter_slash_vermieden() {
        let mail = verifikations_mail("https://api.example.com/", "a@x.com", "tok");
        assert!(!mail.html.contains("com//api"));
    }
}
