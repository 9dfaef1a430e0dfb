//! Capture pipeline: pending input types and the image crop step.
//!
//! A capture is a pending, not-yet-submitted unit of input. Image payloads
//! travel as base64-encoded bytes; dictated text is stored verbatim (no
//! transcription happens here, the text is supplied externally).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::error::{Result, TutorError};

/// The kind of a pending capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureKind {
    Image,
    Voice,
}

/// A pending unit of input owned by the session.
///
/// Only one capture exists at a time: selecting a capture of one kind
/// discards a pending capture of the other kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub kind: CaptureKind,
    /// Base64-encoded image bytes for `Image`, raw text for `Voice`.
    pub payload: String,
}

impl Capture {
    pub fn image(payload: impl Into<String>) -> Self {
        Self {
            kind: CaptureKind::Image,
            payload: payload.into(),
        }
    }

    pub fn voice(text: impl Into<String>) -> Self {
        Self {
            kind: CaptureKind::Voice,
            payload: text.into(),
        }
    }
}

/// A rectangular sub-region of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Defaults for the interactive crop anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSettings {
    /// Fraction of the image width the default region covers (0.0..=1.0).
    pub width_fraction: f64,
    /// Fixed width / height ratio of the region.
    pub aspect_ratio: f64,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            width_fraction: 0.9,
            aspect_ratio: 1.0,
        }
    }
}

/// Computes the default crop anchor: a centered region covering
/// `width_fraction` of the image width at the fixed aspect ratio,
/// clamped to the image bounds.
pub fn centered_region(image_width: u32, image_height: u32, settings: &CropSettings) -> CropRegion {
    let fraction = settings.width_fraction.clamp(0.0, 1.0);
    let mut width = (f64::from(image_width) * fraction).round() as u32;
    width = width.clamp(1, image_width.max(1));

    let mut height = (f64::from(width) / settings.aspect_ratio.max(f64::EPSILON)).round() as u32;
    height = height.clamp(1, image_height.max(1));

    // Shrink width back if the clamped height broke the aspect ratio badly
    let ratio_width = (f64::from(height) * settings.aspect_ratio).round() as u32;
    if ratio_width < width {
        width = ratio_width.max(1);
    }

    CropRegion {
        x: (image_width - width) / 2,
        y: (image_height - height) / 2,
        width,
        height,
    }
}

/// Decodes a base64 image payload and returns its pixel dimensions.
pub fn image_dimensions(payload: &str) -> Result<(u32, u32)> {
    let bytes = BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| TutorError::capture(format!("Invalid base64 image payload: {e}")))?;
    let img = image::load_from_memory(&bytes)?;
    Ok((img.width(), img.height()))
}

/// Crops a base64 image payload to `region` and re-encodes it as PNG.
///
/// The same payload and region always produce the same output, so
/// confirming a crop is idempotent. The region is clamped to the image
/// bounds before cropping.
pub fn crop_image_payload(payload: &str, region: CropRegion) -> Result<String> {
    let bytes = BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| TutorError::capture(format!("Invalid base64 image payload: {e}")))?;
    let img = image::load_from_memory(&bytes)?;

    let x = region.x.min(img.width().saturating_sub(1));
    let y = region.y.min(img.height().saturating_sub(1));
    let width = region.width.clamp(1, img.width() - x);
    let height = region.height.clamp(1, img.height() - y);

    let cropped = img.crop_imm(x, y, width, height);
    let mut out = Vec::new();
    cropped.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)?;
    Ok(BASE64_STANDARD.encode(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn sample_payload(width: u32, height: u32) -> String {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(width, height, |x, y| {
                Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
            });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        BASE64_STANDARD.encode(bytes)
    }

    #[test]
    fn test_centered_region_covers_width_fraction() {
        let region = centered_region(100, 100, &CropSettings::default());
        assert_eq!(region.width, 90);
        assert_eq!(region.height, 90);
        assert_eq!(region.x, 5);
        assert_eq!(region.y, 5);
    }

    #[test]
    fn test_centered_region_clamps_to_short_images() {
        // 1:1 aspect on a wide, short image: height limits the square
        let region = centered_region(200, 50, &CropSettings::default());
        assert_eq!(region.height, 50);
        assert_eq!(region.width, 50);
        assert_eq!(region.y, 0);
        assert_eq!(region.x, 75);
    }

    #[test]
    fn test_crop_produces_region_sized_image() {
        let payload = sample_payload(40, 40);
        let region = CropRegion {
            x: 10,
            y: 10,
            width: 20,
            height: 20,
        };
        let cropped = crop_image_payload(&payload, region).unwrap();
        assert_eq!(image_dimensions(&cropped).unwrap(), (20, 20));
    }

    #[test]
    fn test_crop_is_idempotent_for_same_source_and_region() {
        let payload = sample_payload(32, 24);
        let region = centered_region(32, 24, &CropSettings::default());
        let first = crop_image_payload(&payload, region).unwrap();
        let second = crop_image_payload(&payload, region).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_crop_clamps_out_of_bounds_region() {
        let payload = sample_payload(16, 16);
        let region = CropRegion {
            x: 8,
            y: 8,
            width: 100,
            height: 100,
        };
        let cropped = crop_image_payload(&payload, region).unwrap();
        assert_eq!(image_dimensions(&cropped).unwrap(), (8, 8));
    }

    #[test]
    fn test_crop_rejects_undecodable_payload() {
        let err = crop_image_payload(
            "not base64!!",
            CropRegion {
                x: 0,
                y: 0,
                width: 1,
                height: 1,
            },
        )
        .unwrap_err();
        assert!(matches!(err, TutorError::Capture(_)));
    }
}
