//! OCR engine boundary.
//!
//! The external engine is reached through the `OcrEngine` trait so any
//! backend (local binary, library, remote service) can sit behind it. Calls
//! through this boundary can fail unpredictably; `OcrEngineAdapter` is the
//! single place where those failures are absorbed. Everything downstream of
//! the adapter sees text-or-empty, never an error.

pub mod tesseract;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Per-invocation recognition parameters, assembled from persisted settings.
#[derive(Debug, Clone)]
pub struct OcrJobConfig {
    /// Canonical engine language name, e.g. `ENGLISH` or `CHINESE SIMPLIFIED`.
    pub language: String,
    /// Let the engine detect and correct page orientation.
    pub orient: bool,
    /// Let the engine straighten (deskew) the page.
    pub straighten: bool,
}

/// Result of the one-time capability probe.
#[derive(Debug, Clone)]
pub struct EngineAvailability {
    pub usable: bool,
    pub diagnostic: String,
}

impl EngineAvailability {
    pub fn usable(diagnostic: impl Into<String>) -> Self {
        Self {
            usable: true,
            diagnostic: diagnostic.into(),
        }
    }

    pub fn unusable(diagnostic: impl Into<String>) -> Self {
        Self {
            usable: false,
            diagnostic: diagnostic.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("OCR engine not available: {0}")]
    Unavailable(String),
    #[error("OCR invocation failed: {0}")]
    Invocation(String),
    #[error("No engine language mapping for {0:?}")]
    LanguageMapping(String),
}

/// A concrete OCR backend. `recognize` is synchronous and may take seconds.
pub trait OcrEngine {
    /// Cheap capability check: acquire and immediately release one engine
    /// instance. Called once at feature initialization, not per request.
    fn probe(&self) -> EngineAvailability;

    /// Runs recognition over the image file at `path`.
    fn recognize(&self, path: &Path, job: &OcrJobConfig) -> Result<String, EngineError>;
}

/// Fail-soft wrapper around a backend: every backend error is logged with
/// its diagnostic and collapsed into an empty result. The rest of the
/// pipeline never special-cases engine failures.
pub struct OcrEngineAdapter<E> {
    engine: E,
}

impl<E: OcrEngine> OcrEngineAdapter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn probe(&self) -> EngineAvailability {
        self.engine.probe()
    }

    /// Recognizes text in the file at `path`. Never fails: an engine fault
    /// yields `""`, indistinguishable from a capture that contains no text
    /// except in the log.
    pub fn recognize_text(&self, path: &Path, job: &OcrJobConfig) -> String {
        match self.engine.recognize(path, job) {
            Ok(text) => {
                if text.is_empty() {
                    debug!("Engine found no text in capture");
                } else {
                    info!(chars = text.len(), "OCR completed");
                }
                text
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "OCR failed, treating as no text");
                String::new()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use image::GenericImageView;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Scripted backend for tests: answers the probe and recognition from
    /// canned values, recording what it was asked to do.
    pub struct ScriptedEngine {
        pub available: bool,
        pub outcome: Result<String, fn() -> EngineError>,
        pub seen_paths: Arc<Mutex<Vec<PathBuf>>>,
        pub seen_dimensions: Arc<Mutex<Vec<(u32, u32)>>>,
    }

    impl ScriptedEngine {
        pub fn returning(text: &str) -> Self {
            Self {
                available: true,
                outcome: Ok(text.to_string()),
                seen_paths: Arc::new(Mutex::new(Vec::new())),
                seen_dimensions: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn faulting(make_error: fn() -> EngineError) -> Self {
            Self {
                available: true,
                outcome: Err(make_error),
                seen_paths: Arc::new(Mutex::new(Vec::new())),
                seen_dimensions: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn unavailable() -> Self {
            Self {
                available: false,
                outcome: Err(|| EngineError::Unavailable("not installed".into())),
                seen_paths: Arc::new(Mutex::new(Vec::new())),
                seen_dimensions: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl OcrEngine for ScriptedEngine {
        fn probe(&self) -> EngineAvailability {
            if self.available {
                EngineAvailability::usable("scripted engine")
            } else {
                EngineAvailability::unusable("scripted engine marked unavailable")
            }
        }

        fn recognize(&self, path: &Path, _job: &OcrJobConfig) -> Result<String, EngineError> {
            self.seen_paths.lock().unwrap().push(path.to_path_buf());
            if let Ok(decoded) = image::open(path) {
                self.seen_dimensions
                    .lock()
                    .unwrap()
                    .push((decoded.width(), decoded.height()));
            }
            match &self.outcome {
                Ok(text) => Ok(text.clone()),
                Err(make_error) => Err(make_error()),
            }
        }
    }
}
