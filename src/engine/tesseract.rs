//! Tesseract command-line backend.
//!
//! Each recognition drives one short-lived `tesseract` process; spawning the
//! process is the document acquisition, process exit releases it. The probe
//! runs `tesseract --version` once at feature initialization.

use std::io;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::{EngineAvailability, EngineError, OcrEngine, OcrJobConfig};

const TESSERACT_BIN: &str = "tesseract";

/// Canonical language name to traineddata code. The canonical names are what
/// the settings dialog shows and what the config file stores (after
/// normalization); the codes are what tesseract wants on the command line.
const LANGUAGES: &[(&str, &str)] = &[
    ("CHINESE SIMPLIFIED", "chi_sim"),
    ("CHINESE TRADITIONAL", "chi_tra"),
    ("CZECH", "ces"),
    ("DANISH", "dan"),
    ("DUTCH", "nld"),
    ("ENGLISH", "eng"),
    ("FINNISH", "fin"),
    ("FRENCH", "fra"),
    ("GERMAN", "deu"),
    ("GREEK", "ell"),
    ("HUNGARIAN", "hun"),
    ("ITALIAN", "ita"),
    ("JAPANESE", "jpn"),
    ("KOREAN", "kor"),
    ("NORWEGIAN", "nor"),
    ("POLISH", "pol"),
    ("PORTUGUESE", "por"),
    ("RUSSIAN", "rus"),
    ("SPANISH", "spa"),
    ("SWEDISH", "swe"),
    ("TURKISH", "tur"),
];

/// Canonical language names the backend can map, for the settings dialog.
pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().map(|(name, _)| *name)
}

fn language_code(canonical: &str) -> Result<&'static str, EngineError> {
    LANGUAGES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, code)| *code)
        .ok_or_else(|| EngineError::LanguageMapping(canonical.to_string()))
}

/// Page segmentation mode: with orientation correction enabled we ask for
/// automatic segmentation with orientation and script detection.
fn page_segmentation_mode(orient: bool) -> &'static str {
    if orient {
        "1"
    } else {
        "3"
    }
}

#[derive(Debug, Default)]
pub struct TesseractEngine;

impl TesseractEngine {
    pub fn new() -> Self {
        Self
    }
}

impl OcrEngine for TesseractEngine {
    fn probe(&self) -> EngineAvailability {
        match Command::new(TESSERACT_BIN).arg("--version").output() {
            Ok(output) if output.status.success() => {
                let banner = String::from_utf8_lossy(&output.stdout);
                let version = banner.lines().next().unwrap_or("tesseract").to_string();
                debug!(version = %version, "OCR engine probe succeeded");
                EngineAvailability::usable(version)
            }
            Ok(output) => EngineAvailability::unusable(format!(
                "tesseract --version exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )),
            Err(e) => EngineAvailability::unusable(format!("tesseract not runnable: {e}")),
        }
    }

    fn recognize(&self, path: &Path, job: &OcrJobConfig) -> Result<String, EngineError> {
        let code = language_code(&job.language)?;
        let psm = page_segmentation_mode(job.orient);
        if job.straighten {
            // Tesseract deskews internally; the flag needs no argument.
            debug!("Straighten requested, handled by the engine's internal deskew");
        }

        debug!(path = %path.display(), language = code, psm, "Starting OCR");
        let output = Command::new(TESSERACT_BIN)
            .arg(path)
            .arg("stdout")
            .args(["-l", code, "--psm", psm])
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    EngineError::Unavailable("tesseract binary not found".to_string())
                }
                _ => EngineError::Invocation(format!("failed to spawn tesseract: {e}")),
            })?;

        if !output.status.success() {
            // The adapter logs this once; the detail travels in the error.
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::Invocation(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        // Keep interior newlines from the layout, only drop the trailing one.
        Ok(String::from_utf8_lossy(&output.stdout)
            .trim_end()
            .to_string())
    }
}
