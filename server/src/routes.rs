//! Route-Definitionen fuer die REST-API (/api/auth/...)

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, AppState};

/// Erstellt den vollstaendigen /api/auth/-Router
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Lifecycle ohne Session
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route(
            "/api/auth/users/verify/:verification_token",
            get(handlers::verifizieren),
        )
        .route("/api/auth/users/verify", post(handlers::erneut_senden))
        // Session-gebundene Endpunkte
        .route("/api/auth/current", get(handlers::current))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/users", patch(handlers::abo_aendern))
        .route(
            "/api/auth/users/avatars",
            patch(handlers::avatar_aktualisieren),
        )
}
