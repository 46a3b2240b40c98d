//! Auth-Middleware fuer die REST-API
//!
//! Extrahiert den Bearer-Token aus dem Authorization-Header und loest ihn
//! ueber den Konto-Service zum Konto auf. Fehlender, ungueltiger,
//! abgelaufener oder durch neuen Login ersetzter Token ergeben 401.

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use pfoertner_auth::AuthError;
use pfoertner_db::KontoRecord;

use crate::AppState;

/// Extrahiert den Bearer-Token aus dem Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Fehlerantwort fuer die REST-API
pub fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (status, Json(json!({ "message": nachricht }))).into_response()
}

/// Bildet einen AuthError auf die HTTP-Antwort ab
pub fn auth_fehler_antwort(fehler: &AuthError) -> Response {
    let status = StatusCode::from_u16(fehler.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        // Interne Details gehoeren ins Log, nicht in die Antwort
        tracing::error!(fehler = %fehler, "Interner Fehler bei Request-Verarbeitung");
        return fehler_antwort(status, "Interner Serverfehler");
    }

    fehler_antwort(status, &fehler.to_string())
}

/// Loest den Bearer-Token zum authentifizierten Konto auf
pub async fn konto_aus_headers(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<KontoRecord, Response> {
    let Some(token) = bearer_token(headers) else {
        return Err(fehler_antwort(
            StatusCode::UNAUTHORIZED,
            "Authorization-Header fehlt",
        ));
    };

    state
        .service
        .session_validieren(token)
        .await
        .map_err(|e| auth_fehler_antwort(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_extrahieren() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_static("Bearer mein_token_123"),
        );
        assert_eq!(bearer_token(&headers), Some("mein_token_123"));
    }

    #[test]
    fn bearer_token_fehlt() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn bearer_token_falsches_schema() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);
    }
}
