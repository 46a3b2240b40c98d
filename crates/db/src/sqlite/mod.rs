//! SQLite-Backend-Implementierung des Konto-Repositorys

pub mod konten;
pub mod pool;

pub use pool::SqliteDb;
