//! Publishing recognized text to the system clipboard.
//!
//! One attempt per invocation, no retry. The clipboard is a shared resource
//! other processes write to as well; contention is logged and swallowed.

use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard error: {0}")]
    Backend(String),
}

/// Seam between the publisher and the platform clipboard, so tests can
/// record writes instead of touching the real clipboard.
pub trait ClipboardWriter {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The real clipboard via arboard. A fresh handle per write: holding one
/// open would keep clipboard ownership between invocations.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Backend(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Backend(e.to_string()))
    }
}

/// Writes recognized text as a plain-text clipboard entry. Empty or
/// all-whitespace text never opens the clipboard at all.
pub struct ClipboardPublisher<W> {
    writer: W,
}

impl<W: ClipboardWriter> ClipboardPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn publish(&mut self, text: &str) {
        if text.trim().is_empty() {
            debug!("No text to publish, leaving clipboard untouched");
            return;
        }
        // Log only the length, not the content: recognized text can be
        // anything visible on the user's screen.
        match self.writer.set_text(text) {
            Ok(()) => info!(chars = text.len(), "Recognized text placed on clipboard"),
            Err(e) => warn!(error = %e, "Failed to write clipboard, giving up"),
        }
    }
}
