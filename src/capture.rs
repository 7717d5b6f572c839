//! Capture input types and the host seam that delivers region captures.
//!
//! The crate never takes screenshots itself; a host (menu entry, global
//! hotkey handler, or the CLI driver) hands a finished `RegionCapture` to the
//! pipeline through the `CaptureHost` callback.

use std::time::SystemTime;

use image::DynamicImage;
use nanoid::nanoid;

/// Metadata accompanying one region capture. The `id` is what makes the
/// invocation's temp artifact filename unique.
#[derive(Debug, Clone)]
pub struct CaptureDetails {
    pub id: String,
    pub window_title: Option<String>,
    pub taken_at: SystemTime,
}

impl CaptureDetails {
    pub fn new(window_title: Option<String>) -> Self {
        Self {
            id: nanoid!(12),
            window_title,
            taken_at: SystemTime::now(),
        }
    }
}

/// A finished region capture: pixel data plus its metadata. Read-only input
/// to one pipeline invocation.
#[derive(Debug)]
pub struct RegionCapture {
    pub image: DynamicImage,
    pub details: CaptureDetails,
}

impl RegionCapture {
    pub fn new(image: DynamicImage, details: CaptureDetails) -> Self {
        Self { image, details }
    }
}

/// One-shot completion callback: `None` means the user cancelled the capture.
pub type CaptureCallback<'a> = Box<dyn FnOnce(Option<RegionCapture>) + 'a>;

/// Implemented by the host that owns the actual screen-capture UI.
/// `capture_region` must invoke the callback exactly once, on whatever thread
/// the capture completes on.
pub trait CaptureHost {
    fn capture_region(&mut self, on_capture: CaptureCallback<'_>);
}
