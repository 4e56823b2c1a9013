//! Production image backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, TIFF) | `image` crate, format sniffed from content |
//! | Encode → WebP (lossy) | `webp` crate (libwebp), quality 85, method 6 |
//!
//! The `image` crate's own WebP encoder is lossless only, so lossy output
//! goes through libwebp's advanced config API.

use super::backend::{BackendError, ImageBackend};
use super::params::EncodeParams;
use image::{DynamicImage, ImageReader, RgbImage};
use std::path::Path;

/// libwebp compression method: 0 = fastest, 6 = smallest output.
const METHOD_DEFAULT: i32 = 4;
const METHOD_OPTIMIZE: i32 = 6;

/// Backend built on the `image` decoders and libwebp.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
///
/// The format is guessed from the file's leading bytes, falling back to the
/// extension, so a mislabelled PNG still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode as lossy WebP and write to `params.output`.
fn save_webp(image: &RgbImage, params: &EncodeParams) -> Result<(), BackendError> {
    let mut config = webp::WebPConfig::new()
        .map_err(|_| BackendError::ProcessingFailed("WebP config init failed".into()))?;
    config.lossless = 0;
    config.quality = params.quality.value() as f32;
    config.method = if params.optimize {
        METHOD_OPTIMIZE
    } else {
        METHOD_DEFAULT
    };

    let encoder = webp::Encoder::from_rgb(image.as_raw(), image.width(), image.height());
    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {e:?}")))?;

    std::fs::write(&params.output, &*encoded)?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        load_image(path)
    }

    fn encode(&self, image: &RgbImage, params: &EncodeParams) -> Result<(), BackendError> {
        save_webp(image, params)
    }
}
