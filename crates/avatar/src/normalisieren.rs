//! Normalisierung hochgeladener Avatare auf eine feste Leinwand
//!
//! Dekodieren und Skalieren sind blockierende Operationen und laufen
//! deshalb auf dem Blocking-Threadpool, nicht im Request-Pfad.

use std::path::PathBuf;

use image::imageops::FilterType;

use crate::error::{AvatarError, AvatarResult};

/// Kantenlaenge der Avatar-Leinwand in Pixeln
pub const LEINWAND_PIXEL: u32 = 250;

/// Dekodiert das Bild unter `pfad`, skaliert es auf 250x250 und
/// ueberschreibt die Datei in-place
///
/// Das Zielformat ergibt sich aus der Dateiendung. Der Aufrufer
/// entscheidet, ob ein Fehler fatal ist; der Lifecycle-Manager behandelt
/// ihn als Best-Effort (loggen, URL trotzdem persistieren).
pub async fn auf_leinwand_normalisieren(pfad: PathBuf) -> AvatarResult<()> {
    let ergebnis = tokio::task::spawn_blocking(move || -> AvatarResult<()> {
        let bild = image::open(&pfad)?;
        let skaliert = bild.resize_exact(LEINWAND_PIXEL, LEINWAND_PIXEL, FilterType::Triangle);
        skaliert.save(&pfad)?;
        Ok(())
    })
    .await
    .map_err(|e| AvatarError::Intern(format!("Blocking-Task abgebrochen: {e}")))?;

    ergebnis
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[tokio::test]
    async fn bild_wird_auf_leinwand_skaliert() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("avatar.png");

        // 10x20-Testbild schreiben
        let bild: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(10, 20, |_, _| Rgb([120u8, 40, 200]));
        bild.save(&pfad).unwrap();

        auf_leinwand_normalisieren(pfad.clone()).await.unwrap();

        let normalisiert = image::open(&pfad).unwrap();
        assert_eq!(normalisiert.width(), LEINWAND_PIXEL);
        assert_eq!(normalisiert.height(), LEINWAND_PIXEL);
    }

    #[tokio::test]
    async fn kein_bild_gibt_fehler() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("kein_bild.png");
        tokio::fs::write(&pfad, b"das ist kein PNG").await.unwrap();

        let ergebnis = auf_leinwand_normalisieren(pfad).await;
        assert!(matches!(ergebnis, Err(AvatarError::Bild(_))));
    }

    #[tokio::test]
    async fn fehlende_datei_gibt_fehler() {
        let ergebnis = auf_leinwand_normalisieren(PathBuf::from("/nicht/vorhanden.png")).await;
        assert!(ergebnis.is_err());
    }
}
