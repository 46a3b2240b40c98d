//! Konto-Service fuer Pfoertner
//!
//! Zentraler Service fuer den gesamten Konto-Lifecycle: Registrierung,
//! E-Mail-Verifikation, Login/Logout, Abo-Wechsel und Avatar-Aktualisierung.
//! Nutzt das Konto-Repository, den Mail-Versand und die Avatar-Ablage.
//!
//! Es gilt hoechstens eine aktive Session pro Konto: ein neuer Login
//! ueberschreibt den gespeicherten Session-Token und invalidiert damit
//! jede aeltere Session. Die Validierung prueft deshalb neben Signatur
//! und Ablauf auch, ob der vorgelegte Token noch der gespeicherte ist.

use std::sync::Arc;

use uuid::Uuid;

use pfoertner_avatar::{
    auf_leinwand_normalisieren, standard_avatar_url, AvatarError, AvatarSpeicher,
};
use pfoertner_db::{AboStufe, KontoRecord, KontoRepository, KontoUpdate, NeuesKonto};
use pfoertner_mail::{verifikations_mail, Mailer};

use crate::{
    error::{AuthError, AuthResult},
    password::{passwort_hashen, passwort_verifizieren},
    token::{verifikations_token_generieren, SessionSigner},
};

/// Projektion eines Kontos fuer API-Antworten
///
/// Auf dem Draht heisst die Abo-Stufe "subscription" (bestehende API).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Profil {
    pub email: String,
    #[serde(rename = "subscription")]
    pub abo: AboStufe,
}

impl From<&KontoRecord> for Profil {
    fn from(konto: &KontoRecord) -> Self {
        Self {
            email: konto.email.clone(),
            abo: konto.abo,
        }
    }
}

/// Konto-Service – zentraler Einstiegspunkt fuer alle Konto-Vorgaenge
pub struct KontoService<R: KontoRepository, M: Mailer> {
    repo: Arc<R>,
    mailer: Arc<M>,
    signer: SessionSigner,
    avatare: AvatarSpeicher,
    base_url: String,
}

impl<R: KontoRepository, M: Mailer> KontoService<R, M> {
    /// Erstellt einen neuen KontoService
    pub fn neu(
        repo: Arc<R>,
        mailer: Arc<M>,
        signer: SessionSigner,
        avatare: AvatarSpeicher,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            mailer,
            signer,
            avatare,
            base_url: base_url.into(),
        }
    }

    /// Registriert ein neues Konto
    ///
    /// Prueft ob die E-Mail vergeben ist, hasht das Passwort, leitet die
    /// Standard-Avatar-URL ab, erzeugt einen frischen Verifikations-Token
    /// und versendet die Verifikations-Mail. Ein Mail-Fehlschlag rollt die
    /// Konto-Erstellung nicht zurueck (Fire-and-Forget).
    pub async fn registrieren(&self, email: &str, passwort: &str) -> AuthResult<KontoRecord> {
        if self.repo.get_by_email(email).await?.is_some() {
            return Err(AuthError::EmailVergeben);
        }

        let passwort_hash = passwort_hashen(passwort)?;
        let avatar_url = standard_avatar_url(email);
        let token = verifikations_token_generieren();

        // Zwischen Existenz-Pruefung und INSERT gibt es keine Transaktion;
        // das UNIQUE-Constraint der DB faengt das Rennen ab.
        let konto = self
            .repo
            .create(NeuesKonto {
                email,
                password_hash: &passwort_hash,
                avatar_url: &avatar_url,
                verification_token: &token,
            })
            .await
            .map_err(|e| {
                if e.ist_eindeutigkeit() {
                    AuthError::EmailVergeben
                } else {
                    AuthError::Datenbank(e)
                }
            })?;

        let mail = verifikations_mail(&self.base_url, email, &token);
        if let Err(e) = self.mailer.senden(&mail).await {
            tracing::warn!(
                konto_id = %konto.id,
                fehler = %e,
                "Verifikations-Mail fehlgeschlagen, Konto bleibt bestehen"
            );
        }

        tracing::info!(
            konto_id = %konto.id,
            email = %konto.email,
            "Neues Konto registriert"
        );

        Ok(konto)
    }

    /// Verifiziert ein Konto anhand des Tokens
    ///
    /// Der Token ist einmal verwendbar: beim Erfolg wird er geleert,
    /// ein zweiter Aufruf findet ihn nicht mehr.
    pub async fn verifizieren(&self, token: &str) -> AuthResult<()> {
        let konto = self
            .repo
            .get_by_verification_token(token)
            .await?
            .ok_or(AuthError::TokenUnbekannt)?;

        self.repo
            .update(
                konto.id,
                KontoUpdate {
                    verifiziert: Some(true),
                    verification_token: Some(String::new()),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(konto_id = %konto.id, "Konto verifiziert");
        Ok(())
    }

    /// Versendet die Verifikations-Mail erneut
    ///
    /// Lookup erfolgt ueber die E-Mail; der bereits gespeicherte Token wird
    /// wiederverwendet, es wird kein neuer gemuenzt.
    pub async fn verifikation_erneut_senden(&self, email: &str) -> AuthResult<()> {
        let konto = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or(AuthError::KontoNichtGefunden)?;

        if konto.verifiziert {
            return Err(AuthError::BereitsVerifiziert);
        }

        let mail = verifikations_mail(&self.base_url, &konto.email, &konto.verification_token);
        self.mailer.senden(&mail).await?;

        tracing::info!(konto_id = %konto.id, "Verifikations-Mail erneut versendet");
        Ok(())
    }

    /// Meldet ein Konto an und stellt einen neuen Session-Token aus
    ///
    /// Der neue Token ueberschreibt den gespeicherten und invalidiert damit
    /// jede fruehere Session. Unbekannte E-Mail und falsches Passwort geben
    /// denselben Fehler zurueck.
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<(String, KontoRecord)> {
        let konto = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or(AuthError::UngueltigeAnmeldedaten)?;

        if !konto.verifiziert {
            return Err(AuthError::NichtVerifiziert);
        }

        let korrekt = passwort_verifizieren(passwort, &konto.password_hash)?;
        if !korrekt {
            tracing::warn!(email = %email, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let token = self.signer.signieren(konto.id)?;

        let konto = self
            .repo
            .update(
                konto.id,
                KontoUpdate {
                    session_token: Some(token.clone()),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(konto_id = %konto.id, "Konto angemeldet");
        Ok((token, konto))
    }

    /// Validiert einen vorgelegten Session-Token und gibt das Konto zurueck
    ///
    /// Prueft Signatur und Ablauf des JWT und anschliessend, ob der Token
    /// noch der aktuell gespeicherte ist – ein aelterer, durch neuen Login
    /// ersetzter Token faellt hier durch.
    pub async fn session_validieren(&self, token: &str) -> AuthResult<KontoRecord> {
        let konto_id = self.signer.pruefen(token)?;

        let konto = self
            .repo
            .get_by_id(konto_id)
            .await?
            .ok_or(AuthError::SessionUngueltig)?;

        if konto.session_token != token {
            return Err(AuthError::SessionUngueltig);
        }

        Ok(konto)
    }

    /// Meldet ein Konto ab (leert den Session-Token)
    ///
    /// Idempotent: abmelden ohne aktive Session ist ein No-Op-Erfolg.
    pub async fn abmelden(&self, konto_id: Uuid) -> AuthResult<()> {
        self.repo
            .update(
                konto_id,
                KontoUpdate {
                    session_token: Some(String::new()),
                    ..Default::default()
                },
            )
            .await?;

        tracing::debug!(konto_id = %konto_id, "Konto abgemeldet");
        Ok(())
    }

    /// Aendert die Abo-Stufe eines Kontos
    ///
    /// Bewusst nur das eine Feld – kein generisches Partial-Update, damit
    /// geschuetzte Felder nicht ueber diesen Weg ueberschrieben werden koennen.
    pub async fn abo_aendern(&self, konto_id: Uuid, stufe: AboStufe) -> AuthResult<()> {
        self.repo
            .update(
                konto_id,
                KontoUpdate {
                    abo: Some(stufe),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(konto_id = %konto_id, abo = stufe.als_str(), "Abo-Stufe geaendert");
        Ok(())
    }

    /// Ersetzt den Avatar eines Kontos durch die hochgeladene Datei
    ///
    /// Legt die Datei unter `<konto_id>_<name>` ab, normalisiert sie
    /// Best-Effort auf 250x250 und persistiert die neue URL. Die zuvor
    /// abgelegte Datei wird nach erfolgreichem Ersatz geloescht.
    pub async fn avatar_aktualisieren(
        &self,
        konto_id: Uuid,
        original_name: &str,
        daten: &[u8],
    ) -> AuthResult<String> {
        if daten.is_empty() {
            return Err(AuthError::KeineDateiAngehaengt);
        }

        let konto = self
            .repo
            .get_by_id(konto_id)
            .await?
            .ok_or(AuthError::KontoNichtGefunden)?;

        let dateiname = AvatarSpeicher::dateiname(konto_id, original_name).map_err(|e| match e {
            AvatarError::UngueltigerDateiname(n) => {
                AuthError::UngueltigeEingabe(format!("Ungueltiger Dateiname: {n}"))
            }
            other => AuthError::Avatar(other),
        })?;

        let pfad = self.avatare.speichern(&dateiname, daten).await?;

        // Best-Effort: ein Dekodier-/Skalierfehler bricht den Vorgang nicht
        // ab, die URL zeigt dann auf die unskalierte Datei.
        if let Err(e) = auf_leinwand_normalisieren(pfad).await {
            tracing::warn!(
                konto_id = %konto_id,
                fehler = %e,
                "Avatar-Normalisierung fehlgeschlagen, Datei bleibt unskaliert"
            );
        }

        let avatar_url = AvatarSpeicher::relative_url(&dateiname);
        let alte_url = konto.avatar_url;

        self.repo
            .update(
                konto_id,
                KontoUpdate {
                    avatar_url: Some(avatar_url.clone()),
                    ..Default::default()
                },
            )
            .await?;

        // Alte Datei freigeben; externe URLs (Gravatar-Standard) ignoriert
        // die Ablage von selbst.
        if alte_url != avatar_url {
            if let Err(e) = self.avatare.loeschen(&alte_url).await {
                tracing::warn!(konto_id = %konto_id, fehler = %e, "Alter Avatar nicht loeschbar");
            }
        }

        tracing::info!(konto_id = %konto_id, avatar_url = %avatar_url, "Avatar aktualisiert");
        Ok(avatar_url)
    }
}
