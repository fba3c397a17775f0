//! Shrinks photos so completion payloads stay under a size ceiling.
//!
//! Images are re-encoded as JPEG, first at falling quality and then at
//! falling dimensions, until the encoded bytes fit the budget.

use crate::error::GatewayError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType};
use serde::Deserialize;

const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Size ceiling and reduction schedule for outbound images.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageBudget {
    /// Maximum encoded JPEG size in bytes.
    pub max_bytes: usize,
    pub start_quality: u8,
    pub min_quality: u8,
    pub quality_step: u8,
    /// Factor applied to both dimensions once quality is exhausted.
    pub scale_step: f32,
    /// Shrinking stops when the longer side would fall below this.
    pub min_dimension: u32,
}

impl Default for ImageBudget {
    fn default() -> Self {
        Self {
            max_bytes: 800 * 1024,
            start_quality: 85,
            min_quality: 40,
            quality_step: 15,
            scale_step: 0.8,
            min_dimension: 64,
        }
    }
}

impl ImageBudget {
    /// Rejects schedules that could never shrink an image.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if !(self.scale_step > 0.0 && self.scale_step < 1.0) {
            return Err(GatewayError::InvalidBudget(format!(
                "scale_step must be between 0 and 1 exclusive, got {}",
                self.scale_step
            )));
        }
        if self.min_quality < 1 || self.min_quality > self.start_quality || self.start_quality > 100 {
            return Err(GatewayError::InvalidBudget(format!(
                "qualities must satisfy 1 <= min ({}) <= start ({}) <= 100",
                self.min_quality, self.start_quality
            )));
        }
        Ok(())
    }

    fn qualities(&self) -> Vec<u8> {
        let step = self.quality_step.max(1);
        let mut out = Vec::new();
        let mut q = self.start_quality.max(self.min_quality);
        loop {
            out.push(q);
            if q <= self.min_quality {
                break;
            }
            q = q.saturating_sub(step).max(self.min_quality);
        }
        out
    }
}

/// A JPEG that fits the budget.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl PreparedImage {
    pub fn to_data_url(&self) -> String {
        format!("{JPEG_DATA_URL_PREFIX}{}", STANDARD.encode(&self.jpeg))
    }
}

/// Decodes `bytes` and re-encodes until the JPEG fits `budget`.
pub fn prepare_image(bytes: &[u8], budget: &ImageBudget) -> Result<PreparedImage, GatewayError> {
    let img = image::load_from_memory(bytes)?;
    prepare_decoded(&img, budget)
}

/// Like [`prepare_image`] but takes and returns data URLs.
pub fn prepare_data_url(data_url: &str, budget: &ImageBudget) -> Result<String, GatewayError> {
    let (_mime, bytes) = parse_data_url(data_url)?;
    Ok(prepare_image(&bytes, budget)?.to_data_url())
}

fn prepare_decoded(img: &DynamicImage, budget: &ImageBudget) -> Result<PreparedImage, GatewayError> {
    budget.validate()?;
    let qualities = budget.qualities();
    let mut smallest = usize::MAX;

    // Full size at falling quality
    for &quality in &qualities {
        let jpeg = encode_jpeg(img, quality)?;
        if jpeg.len() <= budget.max_bytes {
            return Ok(fitted(jpeg, img, quality));
        }
        smallest = smallest.min(jpeg.len());
    }

    // Minimum quality at falling dimensions
    let quality = budget.min_quality;
    let mut current = img.clone();
    loop {
        let width = (current.width() as f32 * budget.scale_step) as u32;
        let height = (current.height() as f32 * budget.scale_step) as u32;
        if width.max(height) < budget.min_dimension || width == 0 || height == 0 {
            return Err(GatewayError::ImageTooLarge {
                limit: budget.max_bytes,
                smallest,
            });
        }
        current = current.resize_exact(width, height, FilterType::Lanczos3);
        let jpeg = encode_jpeg(&current, quality)?;
        log::debug!(
            "Reduced image to {}x{} at q{}: {} bytes",
            width,
            height,
            quality,
            jpeg.len()
        );
        if jpeg.len() <= budget.max_bytes {
            return Ok(fitted(jpeg, &current, quality));
        }
        smallest = smallest.min(jpeg.len());
    }
}

fn fitted(jpeg: Vec<u8>, img: &DynamicImage, quality: u8) -> PreparedImage {
    PreparedImage {
        jpeg,
        width: img.width(),
        height: img.height(),
        quality,
    }
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, GatewayError> {
    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
        encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    }
    Ok(out)
}

/// Splits a `data:<mime>;base64,<payload>` URL into its mime type and bytes.
pub fn parse_data_url(data_url: &str) -> Result<(String, Vec<u8>), GatewayError> {
    let rest = data_url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| GatewayError::Image("not a data URL".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| GatewayError::Image("data URL has no payload".into()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| GatewayError::Image("data URL is not base64-encoded".into()))?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| GatewayError::Image(format!("invalid base64 payload: {e}")))?;
    Ok((mime.to_string(), bytes))
}
