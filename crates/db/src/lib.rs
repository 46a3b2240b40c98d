//! pfoertner-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern bereit, das den konkreten
//! SQLite-Zugriff hinter dem `KontoRepository`-Trait verbirgt. Die
//! Geschaeftslogik (pfoertner-auth) kennt nur das Trait, sodass Tests
//! mit In-Memory-Fakes arbeiten koennen.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

// Bequeme Re-Exporte
pub use error::{DbError, DbResult};
pub use models::{AboStufe, KontoRecord, KontoUpdate, NeuesKonto};
pub use repository::{DatabaseConfig, KontoRepository};
pub use sqlite::SqliteDb;
