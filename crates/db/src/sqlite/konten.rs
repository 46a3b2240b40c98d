//! SQLite-Implementierung des KontoRepository

use std::str::FromStr;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{AboStufe, KontoRecord, KontoUpdate, NeuesKonto};
use crate::repository::KontoRepository;
use crate::sqlite::pool::SqliteDb;

const KONTO_SPALTEN: &str = "id, email, password_hash, avatar_url, abo, verifiziert, \
                             verification_token, session_token, created_at";

impl KontoRepository for SqliteDb {
    async fn create(&self, data: NeuesKonto<'_>) -> DbResult<KontoRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO konten (id, email, password_hash, avatar_url, abo, verifiziert, \
             verification_token, session_token, created_at)
             VALUES (?, ?, ?, ?, 'starter', 0, ?, '', ?)",
        )
        .bind(id.to_string())
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.avatar_url)
        .bind(data.verification_token)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits vergeben", data.email))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(KontoRecord {
            id,
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            avatar_url: data.avatar_url.to_string(),
            abo: AboStufe::Starter,
            verifiziert: false,
            verification_token: data.verification_token.to_string(),
            session_token: String::new(),
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<KontoRecord>> {
        let sql = format!("SELECT {KONTO_SPALTEN} FROM konten WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<KontoRecord>> {
        let sql = format!("SELECT {KONTO_SPALTEN} FROM konten WHERE email = ?");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn get_by_verification_token(&self, token: &str) -> DbResult<Option<KontoRecord>> {
        // Leerer Token darf nie matchen: ein konsumierter Token wird in der
        // Spalte auf '' gesetzt und waere sonst wieder auffindbar.
        if token.is_empty() {
            return Ok(None);
        }

        let sql = format!("SELECT {KONTO_SPALTEN} FROM konten WHERE verification_token = ?");
        let row = sqlx::query(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn update(&self, id: Uuid, data: KontoUpdate) -> DbResult<KontoRecord> {
        // Dynamisches UPDATE – nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if data.abo.is_some() {
            sets.push("abo = ?");
        }
        if data.verifiziert.is_some() {
            sets.push("verifiziert = ?");
        }
        if data.verification_token.is_some() {
            sets.push("verification_token = ?");
        }
        if data.session_token.is_some() {
            sets.push("session_token = ?");
        }
        if data.avatar_url.is_some() {
            sets.push("avatar_url = ?");
        }

        if sets.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Konto {id}")));
        }

        let sql = format!("UPDATE konten SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(v) = data.abo {
            q = q.bind(v.als_str());
        }
        if let Some(v) = data.verifiziert {
            q = q.bind(v as i64);
        }
        if let Some(ref v) = data.verification_token {
            q = q.bind(v);
        }
        if let Some(ref v) = data.session_token {
            q = q.bind(v);
        }
        if let Some(ref v) = data.avatar_url {
            q = q.bind(v);
        }
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Konto {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Konto nach Update nicht gefunden"))
    }
}

fn row_to_konto(row: &sqlx::sqlite::SqliteRow) -> DbResult<KontoRecord> {
    use sqlx::Row as _;

    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let abo_str: String = row.try_get("abo")?;
    let abo = AboStufe::from_str(&abo_str).map_err(DbError::UngueltigeDaten)?;

    let verifiziert: i64 = row.try_get("verifiziert")?;

    Ok(KontoRecord {
        id,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        avatar_url: row.try_get("avatar_url")?,
        abo,
        verifiziert: verifiziert != 0,
        verification_token: row.try_get("verification_token")?,
        session_token: row.try_get("session_token")?,
        created_at,
    })
}
