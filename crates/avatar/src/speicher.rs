//! Datei-Ablage fuer Avatare
//!
//! Speichert Avatar-Dateien unter `verzeichnis/<konto_id>_<dateiname>`.
//! Das Konto-ID-Praefix macht Dateinamen kollisionsfrei zwischen Konten.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{AvatarError, AvatarResult};

/// Oeffentlicher Pfad-Praefix unter dem Avatare ausgeliefert werden
pub const AVATAR_URL_PRAEFIX: &str = "avatars";

/// Disk-Ablage fuer Avatar-Dateien
#[derive(Debug, Clone)]
pub struct AvatarSpeicher {
    verzeichnis: PathBuf,
}

impl AvatarSpeicher {
    /// Neue Ablage mit dem angegebenen Basisverzeichnis erstellen
    pub fn neu(verzeichnis: impl Into<PathBuf>) -> Self {
        Self {
            verzeichnis: verzeichnis.into(),
        }
    }

    /// Basisverzeichnis der Ablage
    pub fn verzeichnis(&self) -> &Path {
        &self.verzeichnis
    }

    /// Dateiname fuer ein Konto: `<konto_id>_<bereinigter_name>`
    ///
    /// Pfad-Bestandteile im Original-Namen werden verworfen, damit ein
    /// Upload nicht aus dem Avatar-Verzeichnis ausbrechen kann.
    pub fn dateiname(konto_id: Uuid, original_name: &str) -> AvatarResult<String> {
        let basis = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");

        if basis.is_empty() || basis == "." || basis == ".." {
            return Err(AvatarError::UngueltigerDateiname(original_name.into()));
        }

        Ok(format!("{konto_id}_{basis}"))
    }

    /// Relative URL unter der ein Dateiname ausgeliefert wird
    pub fn relative_url(dateiname: &str) -> String {
        format!("{AVATAR_URL_PRAEFIX}/{dateiname}")
    }

    /// Speichert die Bytes und gibt den vollstaendigen Pfad zurueck
    pub async fn speichern(&self, dateiname: &str, daten: &[u8]) -> AvatarResult<PathBuf> {
        tokio::fs::create_dir_all(&self.verzeichnis).await?;

        let pfad = self.verzeichnis.join(dateiname);
        tokio::fs::write(&pfad, daten).await?;
        tracing::debug!(pfad = %pfad.display(), bytes = daten.len(), "Avatar gespeichert");
        Ok(pfad)
    }

    /// Loescht eine zuvor abgelegte Avatar-Datei anhand ihrer relativen URL
    ///
    /// URLs ausserhalb des Avatar-Praefix (z.B. die externe Gravatar-URL)
    /// werden ignoriert. Eine bereits fehlende Datei ist kein Fehler.
    pub async fn loeschen(&self, relative_url: &str) -> AvatarResult<()> {
        let Some(dateiname) = relative_url.strip_prefix(&format!("{AVATAR_URL_PRAEFIX}/")) else {
            return Ok(());
        };
        // Nach dem Praefix darf kein weiterer Pfadanteil folgen
        if dateiname.is_empty() || dateiname.contains('/') || dateiname.contains("..") {
            return Ok(());
        }

        let pfad = self.verzeichnis.join(dateiname);
        match tokio::fs::remove_file(&pfad).await {
            Ok(()) => {
                tracing::debug!(pfad = %pfad.display(), "Alter Avatar geloescht");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dateiname_mit_praefix() {
        let id = Uuid::new_v4();
        let name = AvatarSpeicher::dateiname(id, "foto.png").unwrap();
        assert_eq!(name, format!("{id}_foto.png"));
    }

    #[test]
    fn dateiname_verwirft_pfadanteile() {
        let id = Uuid::new_v4();
        let name = AvatarSpeicher::dateiname(id, "../../etc/passwd").unwrap();
        assert_eq!(name, format!("{id}_passwd"));
    }

    #[test]
    fn leerer_dateiname_abgelehnt() {
        let id = Uuid::new_v4();
        assert!(AvatarSpeicher::dateiname(id, "").is_err());
        assert!(AvatarSpeicher::dateiname(id, "..").is_err());
    }

    #[tokio::test]
    async fn speichern_und_loeschen() {
        let dir = tempfile::tempdir().unwrap();
        let speicher = AvatarSpeicher::neu(dir.path());

        let pfad = speicher.speichern("k1_foto.png", b"daten").await.unwrap();
        assert!(pfad.exists());

        speicher
            .loeschen(&AvatarSpeicher::relative_url("k1_foto.png"))
            .await
            .unwrap();
        assert!(!pfad.exists());
    }

    #[tokio::test]
    async fn loeschen_ignoriert_externe_urls() {
        let dir = tempfile::tempdir().unwrap();
        let speicher = AvatarSpeicher::neu(dir.path());

        // Gravatar-URL und fehlende Datei: beides kein Fehler
        speicher
            .loeschen("https://www.gravatar.com/avatar/abc")
            .await
            .unwrap();
        speicher.loeschen("avatars/nicht_da.png").await.unwrap();
    }
}
