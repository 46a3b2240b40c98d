//! Token-Erzeugung: Verifikations-Tokens und Session-JWTs
//!
//! Verifikations-Tokens sind opake, unratbare Zufallswerte (32 Byte,
//! URL-sicheres Base64). Session-Tokens sind HS256-signierte JWTs mit
//! fester 23-Stunden-Gueltigkeit, gebunden an die Konto-ID. Der
//! Signaturschluessel wird bei der Konstruktion injiziert, nicht aus
//! ambientem Prozess-Zustand gelesen.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Session-Gueltigkeit: 23 Stunden
const SESSION_TTL_STUNDEN: i64 = 23;

/// Generiert einen kryptografisch sicheren Verifikations-Token
pub fn verifikations_token_generieren() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}

/// Claims des Session-JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Konto-ID
    pub sub: String,
    /// Ausgestellt am (Unix-Sekunden)
    pub iat: i64,
    /// Laeuft ab am (Unix-Sekunden)
    pub exp: i64,
}

/// Signiert und prueft Session-JWTs (HS256)
#[derive(Clone)]
pub struct SessionSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionSigner {
    /// Erstellt einen Signer aus dem konfigurierten Geheimnis
    pub fn neu(geheimnis: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(geheimnis.as_bytes()),
            decoding: DecodingKey::from_secret(geheimnis.as_bytes()),
        }
    }

    /// Stellt einen Session-Token fuer das Konto aus (exp = jetzt + 23h)
    pub fn signieren(&self, konto_id: Uuid) -> AuthResult<String> {
        let jetzt = Utc::now();
        let claims = SessionClaims {
            sub: konto_id.to_string(),
            iat: jetzt.timestamp(),
            exp: (jetzt + chrono::Duration::hours(SESSION_TTL_STUNDEN)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenSignierung(e.to_string()))
    }

    /// Prueft Signatur und Ablauf, gibt die Konto-ID zurueck
    ///
    /// Jeder Defekt (manipuliert, abgelaufen, falscher Schluessel) wird auf
    /// `SessionUngueltig` abgebildet.
    pub fn pruefen(&self, token: &str) -> AuthResult<Uuid> {
        let daten = decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AuthError::SessionUngueltig)?;

        Uuid::parse_str(&daten.claims.sub).map_err(|_| AuthError::SessionUngueltig)
    }
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Schluesselmaterial nie ausgeben
        f.debug_struct("SessionSigner").finish_non_exhaustive()
    }
}
