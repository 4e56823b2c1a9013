//! Parameter types for image operations.
//!
//! These describe *what* to produce, not *how*. The
//! [`operations`](super::operations) module decides which renditions to make
//! and hands [`EncodeParams`] to the [`backend`](super::backend), which does
//! the actual encoding. Tests swap in a mock backend without touching the
//! operation logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 85). Clamped on construction.
//! - [`SizeVariant`]: The four named renditions and their longer-edge bounds.
//! - [`EncodeParams`]: Output path, quality and effort for one encode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(crate::config::WEBP_QUALITY)
    }
}

/// A named rendition bounding the longer edge of the source.
///
/// Declaration order is the order variants are produced and serialized in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SizeVariant {
    Thumbnail,
    Medium,
    Large,
    Original,
}

impl SizeVariant {
    pub const ALL: [SizeVariant; 4] = [
        SizeVariant::Thumbnail,
        SizeVariant::Medium,
        SizeVariant::Large,
        SizeVariant::Original,
    ];

    /// Name used in output filenames and manifest keys.
    pub fn name(self) -> &'static str {
        match self {
            SizeVariant::Thumbnail => "thumbnail",
            SizeVariant::Medium => "medium",
            SizeVariant::Large => "large",
            SizeVariant::Original => "original",
        }
    }

    /// Longer-edge bound in pixels; `None` keeps the source size.
    pub fn bound(self) -> Option<u32> {
        match self {
            SizeVariant::Thumbnail => Some(300),
            SizeVariant::Medium => Some(600),
            SizeVariant::Large => Some(1200),
            SizeVariant::Original => None,
        }
    }
}

impl fmt::Display for SizeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for writing one encoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub output: PathBuf,
    pub quality: Quality,
    /// Spend more encoder effort for smaller files.
    pub optimize: bool,
}
