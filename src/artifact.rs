//! Temp artifact handling: the engine reads its input from disk, so each
//! invocation writes one uniquely named BMP under the OS temp directory and
//! removes it again afterwards.

use std::env;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use thiserror::Error;
use tracing::{debug, warn};

use crate::capture::CaptureDetails;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("BMP encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Scoped temp file: deleting it is tied to this value's lifetime, so the
/// file is gone on every exit path of an invocation, engine faults and
/// panics included. A failed delete is logged, never propagated.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(error = %e, path = %self.path.display(), "Failed to remove temporary image file");
        } else {
            debug!(path = %self.path.display(), "Cleaned up temporary image file");
        }
    }
}

/// Writes `image` as an uncompressed BMP to
/// `<temp_dir>/textgrab-<capture id>.bmp` and returns the owning guard.
pub fn save(image: &DynamicImage, details: &CaptureDetails) -> Result<TempArtifact, ArtifactError> {
    let path = env::temp_dir().join(format!("textgrab-{}.bmp", details.id));

    // The BMP encoder only takes 8-bit buffers; anything else goes through
    // an RGB8 conversion first.
    let converted;
    let encodable = match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => {
            image
        }
        _ => {
            converted = DynamicImage::ImageRgb8(image.to_rgb8());
            &converted
        }
    };

    let file = fs::File::create(&path)?;
    let mut writer = BufWriter::new(file);
    encodable.write_to(&mut writer, ImageFormat::Bmp)?;

    debug!(path = %path.display(), "Saved capture to temp file");
    Ok(TempArtifact { path })
}
