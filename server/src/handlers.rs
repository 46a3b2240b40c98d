//! REST-Handler fuer die Konto-Endpunkte
//!
//! Die Handler validieren die Request-Form (Schema, Minimal-Laengen),
//! delegieren an den KontoService und bilden dessen typisierte Fehler auf
//! HTTP-Statuscodes ab. Geschaeftslogik lebt ausschliesslich im Service.

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use pfoertner_auth::Profil;
use pfoertner_db::AboStufe;

use crate::middleware::{auth_fehler_antwort, fehler_antwort, konto_aus_headers};
use crate::AppState;

/// Mindestlaenge fuer Passwoerter (aus der bestehenden Schema-Validierung)
const PASSWORT_MINDESTLAENGE: usize = 6;

#[derive(Debug, Deserialize)]
pub struct AnmeldedatenBody {
    pub email: String,
    pub password: String,
}

/// Minimale Schema-Pruefung fuer E-Mail + Passwort
fn anmeldedaten_pruefen(body: &AnmeldedatenBody) -> Result<(), Response> {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(fehler_antwort(
            StatusCode::BAD_REQUEST,
            "Ungueltige E-Mail-Adresse",
        ));
    }
    if body.password.len() < PASSWORT_MINDESTLAENGE {
        return Err(fehler_antwort(
            StatusCode::BAD_REQUEST,
            "Passwort zu kurz (mindestens 6 Zeichen)",
        ));
    }
    Ok(())
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<AnmeldedatenBody>,
) -> Response {
    if let Err(r) = anmeldedaten_pruefen(&body) {
        return r;
    }

    match state
        .service
        .registrieren(body.email.trim(), &body.password)
        .await
    {
        Ok(konto) => (
            StatusCode::CREATED,
            Json(json!({
                "status": "User created",
                "code": 201,
                "data": Profil::from(&konto),
            })),
        )
            .into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

/// POST /api/auth/login
pub async fn login(State(state): State<AppState>, Json(body): Json<AnmeldedatenBody>) -> Response {
    if let Err(r) = anmeldedaten_pruefen(&body) {
        return r;
    }

    match state
        .service
        .anmelden(body.email.trim(), &body.password)
        .await
    {
        Ok((token, konto)) => (
            StatusCode::OK,
            Json(json!({
                "token": token,
                "user": Profil::from(&konto),
            })),
        )
            .into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

/// GET /api/auth/users/verify/:verification_token
pub async fn verifizieren(State(state): State<AppState>, Path(token): Path<String>) -> Response {
    match state.service.verifizieren(&token).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Verification successful." })),
        )
            .into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ErneutSendenBody {
    pub email: String,
}

/// POST /api/auth/users/verify
pub async fn erneut_senden(
    State(state): State<AppState>,
    Json(body): Json<ErneutSendenBody>,
) -> Response {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return fehler_antwort(StatusCode::BAD_REQUEST, "Ungueltige E-Mail-Adresse");
    }

    match state.service.verifikation_erneut_senden(email).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Verification email sent." })),
        )
            .into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

/// GET /api/auth/current
pub async fn current(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let konto = match konto_aus_headers(&headers, &state).await {
        Ok(k) => k,
        Err(r) => return r,
    };

    (StatusCode::OK, Json(Profil::from(&konto))).into_response()
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let konto = match konto_aus_headers(&headers, &state).await {
        Ok(k) => k,
        Err(r) => return r,
    };

    match state.service.abmelden(konto.id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct AboBody {
    pub subscription: AboStufe,
}

/// PATCH /api/auth/users
pub async fn abo_aendern(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AboBody>,
) -> Response {
    let konto = match konto_aus_headers(&headers, &state).await {
        Ok(k) => k,
        Err(r) => return r,
    };

    match state.service.abo_aendern(konto.id, body.subscription).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "code": 200,
                "message": "Subscription was updated successfully.",
            })),
        )
            .into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

/// PATCH /api/auth/users/avatars (multipart, Feld "avatar")
pub async fn avatar_aktualisieren(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let konto = match konto_aus_headers(&headers, &state).await {
        Ok(k) => k,
        Err(r) => return r,
    };

    // Erstes Feld namens "avatar" verwenden
    let mut upload: Option<(String, Vec<u8>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("avatar") => {
                let dateiname = field.file_name().unwrap_or("avatar").to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((dateiname, bytes.to_vec()));
                        break;
                    }
                    Err(e) => {
                        return fehler_antwort(
                            StatusCode::BAD_REQUEST,
                            &format!("Upload unlesbar: {e}"),
                        )
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => {
                return fehler_antwort(
                    StatusCode::BAD_REQUEST,
                    &format!("Ungueltiger Multipart-Request: {e}"),
                )
            }
        }
    }

    let Some((dateiname, daten)) = upload else {
        return fehler_antwort(StatusCode::BAD_REQUEST, "Keine Avatar-Datei angehaengt");
    };

    match state
        .service
        .avatar_aktualisieren(konto.id, &dateiname, &daten)
        .await
    {
        Ok(avatar_url) => {
            (StatusCode::OK, Json(json!({ "avatarURL": avatar_url }))).into_response()
        }
        Err(e) => auth_fehler_antwort(&e),
    }
}
