//! Deterministische Ableitung der Standard-Avatar-URL
//!
//! Bei der Registrierung bekommt jedes Konto eine aus der E-Mail abgeleitete
//! Gravatar-URL. Gravatar erwartet den Hex-Digest der getrimmten,
//! kleingeschriebenen Adresse (SHA-256).

use sha2::{Digest, Sha256};

/// Leitet die Standard-Avatar-URL aus der E-Mail-Adresse ab
pub fn standard_avatar_url(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("https://www.gravatar.com/avatar/{digest}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ableitung_ist_deterministisch() {
        let a = standard_avatar_url("a@x.com");
        let b = standard_avatar_url("a@x.com");
        assert_eq!(a, b);
        assert!(a.starts_with("https://www.gravatar.com/avatar/"));
    }

    #[test]
    fn gross_klein_und_whitespace_normalisiert() {
        assert_eq!(
            standard_avatar_url("  A@X.com "),
            standard_avatar_url("a@x.com")
        );
    }

    #[test]
    fn verschiedene_adressen_verschiedene_urls() {
        assert_ne!(standard_avatar_url("a@x.com"), standard_avatar_url("b@x.com"));
    }
}
