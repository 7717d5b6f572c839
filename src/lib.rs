//! textgrab: region-capture OCR to the clipboard.
//!
//! The host owns screen capture, menus and global hotkeys; this crate owns
//! everything between a finished capture and the clipboard: growing
//! undersized captures to the engine's 130x130 minimum, the temp BMP
//! handoff, the fail-soft engine call, and the single clipboard write.

pub mod artifact;
pub mod capture;
pub mod clipboard;
pub mod config;
pub mod engine;
pub mod normalize;
pub mod pipeline;
pub mod plugin;

pub use capture::{CaptureDetails, CaptureHost, RegionCapture};
pub use clipboard::{ClipboardPublisher, ClipboardWriter, SystemClipboard};
pub use config::{HotkeyBinding, OcrSettings};
pub use engine::tesseract::TesseractEngine;
pub use engine::{EngineAvailability, OcrEngine, OcrEngineAdapter, OcrJobConfig};
pub use plugin::{HotkeyHandle, HotkeyRegistrar, OcrPlugin};
