//! Host-less driver: runs one pipeline invocation over an image file given
//! on the command line, standing in for a host's region capture.

use std::path::Path;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use textgrab::{
    config, pipeline, CaptureDetails, ClipboardPublisher, OcrEngineAdapter, RegionCapture,
    SystemClipboard, TesseractEngine,
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(image_path) = std::env::args().nth(1) else {
        eprintln!("Usage: textgrab <image-file>");
        return ExitCode::from(2);
    };

    let adapter = OcrEngineAdapter::new(TesseractEngine::new());
    let availability = adapter.probe();
    if !availability.usable {
        // Mirrors the disabled-feature path in a host: no engine, no OCR.
        error!(diagnostic = %availability.diagnostic, "OCR engine not usable");
        return ExitCode::FAILURE;
    }

    let image = match image::open(Path::new(&image_path)) {
        Ok(image) => image,
        Err(e) => {
            error!(error = %e, path = %image_path, "Failed to open image");
            return ExitCode::FAILURE;
        }
    };

    let settings = config::load_settings();
    let capture = RegionCapture::new(image, CaptureDetails::new(None));
    let mut publisher = ClipboardPublisher::new(SystemClipboard);

    pipeline::run_invocation(
        Some(capture),
        &adapter,
        &mut publisher,
        &settings.job_config(),
    );
    ExitCode::SUCCESS
}
