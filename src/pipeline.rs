//! The capture-to-clipboard pipeline.
//!
//! One linear invocation per capture event: normalize, save to a temp BMP,
//! recognize, clean up, publish. The whole invocation is fail-soft: nothing
//! in here ever surfaces an error to the trigger site, a failed step just
//! means nothing lands on the clipboard.

use tracing::{debug, warn};

use crate::artifact;
use crate::capture::RegionCapture;
use crate::clipboard::{ClipboardPublisher, ClipboardWriter};
use crate::engine::{OcrEngine, OcrEngineAdapter, OcrJobConfig};
use crate::normalize;

/// Runs one pipeline invocation. `capture` is `None` when the user cancelled
/// the region selection, in which case nothing at all happens.
///
/// The temp artifact is removed before any clipboard publish, on engine
/// faults included (guard drop). Empty recognition output is a valid
/// outcome: the publisher is simply never invoked.
pub fn run_invocation<E, W>(
    capture: Option<RegionCapture>,
    adapter: &OcrEngineAdapter<E>,
    publisher: &mut ClipboardPublisher<W>,
    job: &OcrJobConfig,
) where
    E: OcrEngine,
    W: ClipboardWriter,
{
    let Some(capture) = capture else {
        debug!("Capture cancelled, nothing to do");
        return;
    };
    debug!(
        id = %capture.details.id,
        window = ?capture.details.window_title,
        taken_at = ?capture.details.taken_at,
        "Processing capture"
    );

    let normalized = normalize::normalize(&capture.image);

    let artifact = match artifact::save(&normalized, &capture.details) {
        Ok(artifact) => artifact,
        Err(e) => {
            warn!(error = %e, "Failed to save capture for OCR, aborting invocation");
            return;
        }
    };

    let text = adapter.recognize_text(artifact.path(), job);
    drop(artifact);

    if text.trim().is_empty() {
        debug!("No text recognized, leaving clipboard untouched");
        return;
    }
    publisher.publish(&text);
}
