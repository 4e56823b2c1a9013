//! Image processing.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format sniffed from content) |
//! | **Flatten alpha** | per-pixel composite over white |
//! | **Resize** | `image::imageops::resize`, Lanczos3, shrink-only |
//! | **Encode → WebP** | libwebp via the `webp` crate, lossy q85 |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Quality, size variants, encode parameters
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Flattening and variant generation on top of a backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{fit_within, variant_dimensions};
pub use operations::{GeneratedVariant, VariantConfig, create_variants, flatten_alpha};
pub use params::{EncodeParams, Quality, SizeVariant};
pub use rust_backend::RustBackend;
