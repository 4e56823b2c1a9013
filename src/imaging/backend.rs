//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two operations that touch encoded
//! bytes: decoding a source file and writing an encoded rendition. Alpha
//! flattening and resampling are plain pixel math and live in
//! [`operations`](super::operations), so they run the same under every
//! backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::EncodeParams;
use image::{DynamicImage, RgbImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode a source file into pixels, keeping its colour type.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode an opaque RGB image and write it to `params.output`.
    ///
    /// The parent directory must already exist.
    fn encode(&self, image: &RgbImage, params: &EncodeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Quality;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Mock backend that records operations without executing them.
    ///
    /// Decodes are served from an in-memory table keyed by file name; a file
    /// with no entry fails to decode, which is how tests simulate corrupt
    /// inputs.
    #[derive(Default)]
    pub struct MockBackend {
        pub images: RefCell<HashMap<String, DynamicImage>>,
        pub operations: RefCell<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Encode {
            output: String,
            width: u32,
            height: u32,
            quality: u32,
            optimize: bool,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_images(images: Vec<(&str, DynamicImage)>) -> Self {
            Self {
                images: RefCell::new(
                    images
                        .into_iter()
                        .map(|(name, img)| (name.to_string(), img))
                        .collect(),
                ),
                operations: RefCell::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }

        pub fn encoded_outputs(&self) -> Vec<String> {
            self.operations
                .borrow()
                .iter()
                .filter_map(|op| match op {
                    RecordedOp::Encode { output, .. } => Some(output.clone()),
                    RecordedOp::Decode(_) => None,
                })
                .collect()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
            self.operations
                .borrow_mut()
                .push(RecordedOp::Decode(path.to_string_lossy().to_string()));

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            self.images.borrow().get(&name).cloned().ok_or_else(|| {
                BackendError::ProcessingFailed(format!("cannot identify image file {name}"))
            })
        }

        fn encode(&self, image: &RgbImage, params: &EncodeParams) -> Result<(), BackendError> {
            self.operations.borrow_mut().push(RecordedOp::Encode {
                output: params.output.to_string_lossy().to_string(),
                width: image.width(),
                height: image.height(),
                quality: params.quality.value(),
                optimize: params.optimize,
            });
            Ok(())
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_images(vec![(
            "image.jpg",
            DynamicImage::new_rgb8(800, 600),
        )]);

        let result = backend.decode(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width(), 800);
        assert_eq!(result.height(), 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_unknown_file_fails_decode() {
        let backend = MockBackend::new();
        let result = backend.decode(Path::new("/test/corrupt.png"));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn mock_records_encode() {
        let backend = MockBackend::new();

        backend
            .encode(
                &RgbImage::new(300, 200),
                &EncodeParams {
                    output: "/out/photo_thumbnail.webp".into(),
                    quality: Quality::new(85),
                    optimize: true,
                },
            )
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode {
                width: 300,
                height: 200,
                quality: 85,
                optimize: true,
                ..
            }
        ));
    }
}
