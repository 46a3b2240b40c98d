//! pfoertner-auth – Konto-Lifecycle und Session-Verwaltung
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Verifikations-Tokens (opak, unratbar) und Session-JWTs (HS256, 23h)
//! - KontoService (Registrierung, Verifikation, Login, Logout,
//!   Abo-Wechsel, Avatar-Aktualisierung, Session-Validierung)

pub mod error;
pub mod password;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use password::{passwort_hashen, passwort_verifizieren};
pub use service::{KontoService, Profil};
pub use token::{verifikations_token_generieren, SessionClaims, SessionSigner};
