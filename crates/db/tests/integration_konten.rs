//! Integration-Tests fuer KontoRepository (In-Memory SQLite)

use pfoertner_db::{AboStufe, KontoRepository, KontoUpdate, NeuesKonto, SqliteDb};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

fn neues_konto<'a>(email: &'a str, token: &'a str) -> NeuesKonto<'a> {
    NeuesKonto {
        email,
        password_hash: "$argon2id$platzhalter",
        avatar_url: "https://www.gravatar.com/avatar/abc",
        verification_token: token,
    }
}

#[tokio::test]
async fn konto_erstellen_und_laden() {
    let db = db().await;

    let konto = db
        .create(neues_konto("alice@example.com", "tok_alice"))
        .await
        .expect("Konto erstellen fehlgeschlagen");

    assert_eq!(konto.email, "alice@example.com");
    assert_eq!(konto.abo, AboStufe::Starter);
    assert!(!konto.verifiziert);
    assert_eq!(konto.verification_token, "tok_alice");
    assert!(konto.session_token.is_empty());

    let geladen = db
        .get_by_id(konto.id)
        .await
        .expect("get_by_id fehlgeschlagen")
        .expect("Konto sollte gefunden werden");

    assert_eq!(geladen.id, konto.id);
    assert_eq!(geladen.email, "alice@example.com");
}

#[tokio::test]
async fn konto_nach_email_laden() {
    let db = db().await;

    db.create(neues_konto("bob@example.com", "tok_bob"))
        .await
        .unwrap();

    let gefunden = db
        .get_by_email("bob@example.com")
        .await
        .unwrap()
        .expect("Konto 'bob' sollte gefunden werden");
    assert_eq!(gefunden.email, "bob@example.com");

    let nicht_gefunden = db.get_by_email("unbekannt@example.com").await.unwrap();
    assert!(nicht_gefunden.is_none());
}

#[tokio::test]
async fn email_ist_eindeutig() {
    let db = db().await;

    db.create(neues_konto("charlie@example.com", "tok1"))
        .await
        .unwrap();

    let err = db
        .create(neues_konto("charlie@example.com", "tok2"))
        .await
        .expect_err("Doppelte E-Mail muss fehlschlagen");

    assert!(err.ist_eindeutigkeit(), "Erwartet Eindeutigkeitsfehler: {err}");
}

#[tokio::test]
async fn lookup_nach_verification_token() {
    let db = db().await;

    let konto = db
        .create(neues_konto("dora@example.com", "tok_dora"))
        .await
        .unwrap();

    let gefunden = db
        .get_by_verification_token("tok_dora")
        .await
        .unwrap()
        .expect("Token sollte gefunden werden");
    assert_eq!(gefunden.id, konto.id);

    assert!(db
        .get_by_verification_token("anderes_token")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn leerer_token_matcht_nie() {
    let db = db().await;

    let konto = db
        .create(neues_konto("emil@example.com", "tok_emil"))
        .await
        .unwrap();

    // Verifizieren: Token leeren
    db.update(
        konto.id,
        KontoUpdate {
            verifiziert: Some(true),
            verification_token: Some(String::new()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Der leere Token darf das verifizierte Konto nicht wiederfinden
    assert!(db.get_by_verification_token("").await.unwrap().is_none());
    assert!(db
        .get_by_verification_token("tok_emil")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn update_nur_gesetzte_felder() {
    let db = db().await;

    let konto = db
        .create(neues_konto("frida@example.com", "tok_frida"))
        .await
        .unwrap();

    let aktualisiert = db
        .update(
            konto.id,
            KontoUpdate {
                abo: Some(AboStufe::Pro),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(aktualisiert.abo, AboStufe::Pro);
    // Unberuehrte Felder bleiben erhalten
    assert_eq!(aktualisiert.email, "frida@example.com");
    assert_eq!(aktualisiert.verification_token, "tok_frida");
    assert!(!aktualisiert.verifiziert);
}

#[tokio::test]
async fn session_token_setzen_und_leeren() {
    let db = db().await;

    let konto = db
        .create(neues_konto("greta@example.com", "tok_greta"))
        .await
        .unwrap();

    let mit_session = db
        .update(
            konto.id,
            KontoUpdate {
                session_token: Some("jwt_abc".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(mit_session.session_token, "jwt_abc");

    let ohne_session = db
        .update(
            konto.id,
            KontoUpdate {
                session_token: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(ohne_session.session_token.is_empty());
}

#[tokio::test]
async fn update_unbekanntes_konto() {
    let db = db().await;

    let err = db
        .update(
            uuid::Uuid::new_v4(),
            KontoUpdate {
                abo: Some(AboStufe::Business),
                ..Default::default()
            },
        )
        .await
        .expect_err("Update auf unbekanntes Konto muss fehlschlagen");

    assert!(matches!(err, pfoertner_db::DbError::NichtGefunden(_)));
}
