//! High-level image operations.
//!
//! These functions combine the dimension calculations with pixel work and
//! backend execution: flatten the decoded source once, then derive every
//! size variant from the flattened copy.

use super::backend::{BackendError, ImageBackend};
use super::calculations::variant_dimensions;
use super::params::{EncodeParams, Quality, SizeVariant};
use crate::naming::{to_web_path, variant_file_name};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Flatten any alpha channel onto opaque white and return 8-bit RGB.
///
/// Images without alpha are only converted to RGB8; their pixels are kept.
pub fn flatten_alpha(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
    })
}

/// Composite one channel over white: `c·a + 255·(1 − a)`, rounded.
fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (channel as u32, alpha as u32);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// A rendition written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVariant {
    pub variant: SizeVariant,
    /// Output path with `/` separators, as given (not canonicalized).
    pub path: String,
    pub width: u32,
    pub height: u32,
}

/// Configuration for variant generation.
#[derive(Debug, Clone)]
pub struct VariantConfig {
    pub quality: Quality,
    pub optimize: bool,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            optimize: true,
        }
    }
}

/// Write all four size variants of an already-flattened image.
///
/// Outputs go to `<output_dir>/<stem>_<variant>.webp`; `stem` may contain
/// `/`-separated directories, which are created as needed. Bounded variants
/// are Lanczos3-resampled only when they actually shrink; `original` is
/// encoded from the flattened pixels as is.
pub fn create_variants(
    backend: &impl ImageBackend,
    image: &RgbImage,
    output_dir: &Path,
    stem: &str,
    config: &VariantConfig,
) -> Result<Vec<GeneratedVariant>> {
    let source_dims = image.dimensions();
    let mut variants = Vec::with_capacity(SizeVariant::ALL.len());

    for variant in SizeVariant::ALL {
        let (width, height) = variant_dimensions(source_dims, variant);
        let output = output_dir.join(variant_file_name(stem, variant));
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let params = EncodeParams {
            output,
            quality: config.quality,
            optimize: config.optimize,
        };

        if (width, height) == source_dims {
            backend.encode(image, &params)?;
        } else {
            let resized = imageops::resize(image, width, height, FilterType::Lanczos3);
            backend.encode(&resized, &params)?;
        }

        variants.push(GeneratedVariant {
            variant,
            path: to_web_path(&params.output),
            width,
            height,
        });
    }

    Ok(variants)
}
