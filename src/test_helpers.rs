//! Shared test utilities for the portfolio-assets test suite.
//!
//! Provides synthetic image writers, a small file-tree builder, and lookup
//! helpers that work with the portfolio manifest.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! create_test_jpeg(&tmp.path().join("a/board.jpg"), 800, 600);
//! touch(&tmp.path().join("Images&videos/PCB designing/clip.mp4"));
//!
//! let category = find_category(&manifest, "pcb");
//! assert_eq!(image_srcs(category), vec!["Images&videos/PCB designing/clip.mp4"]);
//! ```

use std::path::Path;

use image::{ImageEncoder, RgbImage, RgbaImage};

use crate::portfolio::{CategoryManifest, PortfolioManifest};

// =========================================================================
// Synthetic files
// =========================================================================

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
}

/// Write a small valid RGB JPEG with a gradient, creating parent dirs.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write an RGBA PNG whose left half is fully transparent, creating parent dirs.
pub fn create_test_png_rgba(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = RgbaImage::from_fn(width, height, |x, _| {
        let alpha = if x < width / 2 { 0 } else { 255 };
        image::Rgba([0, 0, 0, alpha])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Create a file with placeholder contents, creating parent dirs.
pub fn touch(path: &Path) {
    ensure_parent(path);
    std::fs::write(path, b"placeholder").unwrap();
}

// =========================================================================
// Manifest lookups (panic with a clear message on miss)
// =========================================================================

/// Find a category by id. Panics if not found.
pub fn find_category<'a>(manifest: &'a PortfolioManifest, id: &str) -> &'a CategoryManifest {
    manifest.get(id).unwrap_or_else(|| {
        let ids: Vec<&str> = manifest.ids().collect();
        panic!("category '{id}' not found. Available: {ids:?}")
    })
}

/// All `src` values of a category, in manifest order.
pub fn image_srcs(category: &CategoryManifest) -> Vec<&str> {
    category.images.iter().map(|i| i.src.as_str()).collect()
}
