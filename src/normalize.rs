//! Minimum-dimension normalization for engine input.
//!
//! The OCR engine refuses images smaller than 130x130. Undersized captures
//! are drawn at the top-left of a white canvas grown to the minimum; anything
//! already large enough passes through untouched (borrowed, no copy).

use std::borrow::Cow;

use image::{imageops, DynamicImage, GenericImageView, ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};
use tracing::debug;

/// Engine minimums. Fixed policy, not configuration.
pub const MIN_WIDTH: u32 = 130;
pub const MIN_HEIGHT: u32 = 130;

/// Grows `image` to at least 130x130 on a white canvas, source at the origin,
/// no scaling. Returns the input borrowed when it already meets the minimums.
pub fn normalize(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    let (width, height) = image.dimensions();
    if width >= MIN_WIDTH && height >= MIN_HEIGHT {
        return Cow::Borrowed(image);
    }

    let new_width = width.max(MIN_WIDTH);
    let new_height = height.max(MIN_HEIGHT);
    debug!(
        width,
        height, new_width, new_height, "Capture below engine minimum, growing onto white canvas"
    );

    // Canvas keeps the source pixel format for the common 8- and 16-bit
    // variants; exotic variants fall back to RGBA8 (`DynamicImage` is
    // non-exhaustive). White over a source alpha channel is a known quirk
    // carried over from the original behavior.
    let grown = match image {
        DynamicImage::ImageLuma8(buf) => {
            DynamicImage::ImageLuma8(padded(buf, Luma([u8::MAX]), new_width, new_height))
        }
        DynamicImage::ImageLumaA8(buf) => {
            DynamicImage::ImageLumaA8(padded(buf, LumaA([u8::MAX; 2]), new_width, new_height))
        }
        DynamicImage::ImageRgb8(buf) => {
            DynamicImage::ImageRgb8(padded(buf, Rgb([u8::MAX; 3]), new_width, new_height))
        }
        DynamicImage::ImageRgba8(buf) => {
            DynamicImage::ImageRgba8(padded(buf, Rgba([u8::MAX; 4]), new_width, new_height))
        }
        DynamicImage::ImageLuma16(buf) => {
            DynamicImage::ImageLuma16(padded(buf, Luma([u16::MAX]), new_width, new_height))
        }
        DynamicImage::ImageLumaA16(buf) => {
            DynamicImage::ImageLumaA16(padded(buf, LumaA([u16::MAX; 2]), new_width, new_height))
        }
        DynamicImage::ImageRgb16(buf) => {
            DynamicImage::ImageRgb16(padded(buf, Rgb([u16::MAX; 3]), new_width, new_height))
        }
        DynamicImage::ImageRgba16(buf) => {
            DynamicImage::ImageRgba16(padded(buf, Rgba([u16::MAX; 4]), new_width, new_height))
        }
        other => DynamicImage::ImageRgba8(padded(
            &other.to_rgba8(),
            Rgba([u8::MAX; 4]),
            new_width,
            new_height,
        )),
    };

    Cow::Owned(grown)
}

fn padded<P>(
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    fill: P,
    width: u32,
    height: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
{
    let mut canvas = ImageBuffer::from_pixel(width, height, fill);
    imageops::replace(&mut canvas, source, 0, 0);
    canvas
}
