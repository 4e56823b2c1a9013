//! Image optimization and responsive variant generation.
//!
//! Walks a source tree recursively and turns every supported image into four
//! WebP renditions plus a manifest describing them.
//!
//! ## Per-Image Pipeline
//!
//! 1. Decode the source (format sniffed from content).
//! 2. Flatten any alpha channel onto white → opaque RGB.
//! 3. For `thumbnail` (300px), `medium` (600px), `large` (1200px): shrink-only
//!    fit of the longer edge. For `original`: unchanged.
//! 4. Encode each rendition as lossy WebP (quality 85, max effort).
//!
//! ## Output Structure
//!
//! ```text
//! optimized_images/
//! ├── optimization_manifest.json
//! ├── logo_thumbnail.webp
//! ├── logo_medium.webp
//! ├── logo_large.webp
//! ├── logo_original.webp
//! └── PCB designing/
//!     ├── board_thumbnail.webp
//!     └── ...
//! ```
//!
//! ## Manifest
//!
//! ```json
//! {
//!   "PCB designing/board.jpg": {
//!     "thumbnail": { "path": "optimized_images/PCB designing/board_thumbnail.webp", "width": 300, "height": 200 },
//!     "medium":    { ... },
//!     "large":     { ... },
//!     "original":  { ... }
//!   }
//! }
//! ```
//!
//! Keys are relative source paths with `/` separators, sorted. A file that
//! fails anywhere in the pipeline is reported and left out entirely.

use crate::config::{OPTIMIZATION_MANIFEST, OPTIMIZER_DEPTH, OPTIMIZER_EXTENSIONS};
use crate::imaging::{
    BackendError, ImageBackend, RustBackend, SizeVariant, VariantConfig, create_variants,
    flatten_alpha,
};
use crate::naming::{has_extension, to_web_path};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Source directory '{}' not found!", .0.display())]
    SourceNotFound(PathBuf),
}

/// One written rendition as recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedAsset {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

/// All renditions of one source, in variant order.
pub type VariantSet = BTreeMap<SizeVariant, OptimizedAsset>;

/// Relative source path → its renditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptimizationManifest {
    pub files: BTreeMap<String, VariantSet>,
}

impl OptimizationManifest {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, relative_path: &str) -> Option<&VariantSet> {
        self.files.get(relative_path)
    }
}

/// A discovered input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    /// Path relative to the source root, `/`-separated.
    pub relative_path: String,
}

impl SourceImage {
    /// Relative path without its extension; the base of every output name.
    pub fn relative_stem(&self) -> String {
        to_web_path(&Path::new(&self.relative_path).with_extension(""))
    }
}

/// A file that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct OptimizeResult {
    pub manifest: OptimizationManifest,
    pub manifest_path: PathBuf,
    pub failures: Vec<FileFailure>,
}

/// Progress events emitted while optimizing.
#[derive(Debug, Clone)]
pub enum OptimizeEvent {
    Started {
        source: PathBuf,
        file_count: usize,
    },
    FileOptimized {
        relative_path: String,
        variants: VariantSet,
    },
    FileFailed {
        path: PathBuf,
        error: String,
    },
    Finished {
        manifest_path: PathBuf,
        optimized: usize,
        failed: usize,
    },
}

/// Find every supported image under `source`, sorted by path.
///
/// Unreadable directory entries are skipped.
pub fn discover_images(source: &Path) -> Vec<SourceImage> {
    WalkDir::new(source)
        .max_depth(OPTIMIZER_DEPTH.max_depth())
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && has_extension(e.path(), OPTIMIZER_EXTENSIONS))
        .map(|e| {
            let relative = e.path().strip_prefix(source).unwrap_or(e.path());
            SourceImage {
                relative_path: to_web_path(relative),
                path: e.path().to_path_buf(),
            }
        })
        .collect()
}

/// Run the optimizer with the production backend.
pub fn optimize(
    source: &Path,
    output_dir: &Path,
    on_event: impl FnMut(&OptimizeEvent),
) -> Result<OptimizeResult, OptimizeError> {
    optimize_with_backend(&RustBackend::new(), source, output_dir, on_event)
}

/// Run the optimizer on a specific backend (allows testing with mock).
///
/// Fails only for run-level problems: a missing source directory (checked
/// before anything is created) or an unwritable output directory/manifest.
/// Per-file problems become [`OptimizeEvent::FileFailed`] and a
/// [`FileFailure`] in the result.
pub fn optimize_with_backend(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    mut on_event: impl FnMut(&OptimizeEvent),
) -> Result<OptimizeResult, OptimizeError> {
    if !source.is_dir() {
        return Err(OptimizeError::SourceNotFound(source.to_path_buf()));
    }
    std::fs::create_dir_all(output_dir)?;

    let images = discover_images(source);
    on_event(&OptimizeEvent::Started {
        source: source.to_path_buf(),
        file_count: images.len(),
    });

    let config = VariantConfig::default();
    let mut manifest = OptimizationManifest::default();
    let mut failures = Vec::new();

    for image in &images {
        match optimize_file(backend, image, output_dir, &config) {
            Ok(variants) => {
                on_event(&OptimizeEvent::FileOptimized {
                    relative_path: image.relative_path.clone(),
                    variants: variants.clone(),
                });
                manifest.files.insert(image.relative_path.clone(), variants);
            }
            Err(e) => {
                let failure = FileFailure {
                    path: image.path.clone(),
                    error: e.to_string(),
                };
                on_event(&OptimizeEvent::FileFailed {
                    path: failure.path.clone(),
                    error: failure.error.clone(),
                });
                failures.push(failure);
            }
        }
    }

    let manifest_path = output_dir.join(OPTIMIZATION_MANIFEST);
    write_manifest(&manifest, &manifest_path)?;

    on_event(&OptimizeEvent::Finished {
        manifest_path: manifest_path.clone(),
        optimized: manifest.len(),
        failed: failures.len(),
    });

    Ok(OptimizeResult {
        manifest,
        manifest_path,
        failures,
    })
}

/// Decode, flatten and write all variants of one source.
fn optimize_file(
    backend: &impl ImageBackend,
    image: &SourceImage,
    output_dir: &Path,
    config: &VariantConfig,
) -> Result<VariantSet, BackendError> {
    let decoded = backend.decode(&image.path)?;
    let flattened = flatten_alpha(decoded);
    let variants = create_variants(
        backend,
        &flattened,
        output_dir,
        &image.relative_stem(),
        config,
    )?;

    Ok(variants
        .into_iter()
        .map(|v| {
            (
                v.variant,
                OptimizedAsset {
                    path: v.path,
                    width: v.width,
                    height: v.height,
                },
            )
        })
        .collect())
}

/// Serialize the manifest as indented JSON.
pub fn write_manifest(manifest: &OptimizationManifest, path: &Path) -> Result<(), OptimizeError> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::touch;
    use image::{DynamicImage, RgbaImage};
    use tempfile::TempDir;

    fn rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::new_rgb8(width, height)
    }

    /// Source tree with placeholder files; decoding is served by the mock.
    fn source_tree(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for file in files {
            touch(&tmp.path().join("src").join(file));
        }
        tmp
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    #[test]
    fn discover_is_recursive_and_filters_extensions() {
        let tmp = source_tree(&[
            "a.jpg",
            "b.PNG",
            "notes.txt",
            "clip.mp4",
            "already.webp",
            "deep/nested/c.TIFF",
            "deep/d.bmp",
            "e.gif",
            "f.jpeg",
        ]);

        let found: Vec<String> = discover_images(&tmp.path().join("src"))
            .into_iter()
            .map(|i| i.relative_path)
            .collect();

        assert_eq!(
            found,
            vec![
                "a.jpg",
                "b.PNG",
                "deep/d.bmp",
                "deep/nested/c.TIFF",
                "e.gif",
                "f.jpeg",
            ]
        );
    }

    #[test]
    fn discover_ignores_directories_named_like_images() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("src/folder.jpg")).unwrap();

        assert!(discover_images(&tmp.path().join("src")).is_empty());
    }

    #[test]
    fn relative_stem_drops_only_last_extension() {
        let image = SourceImage {
            path: PathBuf::from("/x/PCB designing/rev.2.board.png"),
            relative_path: "PCB designing/rev.2.board.png".into(),
        };
        assert_eq!(image.relative_stem(), "PCB designing/rev.2.board");
    }

    // =========================================================================
    // Runs against the mock backend
    // =========================================================================

    #[test]
    fn missing_source_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("out");

        let result =
            optimize_with_backend(&MockBackend::new(), &tmp.path().join("nope"), &output, |_| {});

        assert!(matches!(result, Err(OptimizeError::SourceNotFound(_))));
        assert!(!output.exists());
    }

    #[test]
    fn source_not_found_message() {
        let err = OptimizeError::SourceNotFound(PathBuf::from("Images&videos"));
        assert_eq!(err.to_string(), "Source directory 'Images&videos' not found!");
    }

    #[test]
    fn each_image_gets_four_variants() {
        let tmp = source_tree(&["a.jpg", "sub/b.png"]);
        let backend =
            MockBackend::with_images(vec![("a.jpg", rgb(2400, 1600)), ("b.png", rgb(100, 50))]);
        let output = tmp.path().join("out");

        let result =
            optimize_with_backend(&backend, &tmp.path().join("src"), &output, |_| {}).unwrap();

        assert_eq!(result.manifest.len(), 2);
        assert!(result.failures.is_empty());
        assert_eq!(backend.encoded_outputs().len(), 8);

        let a = result.manifest.get("a.jpg").unwrap();
        let keys: Vec<SizeVariant> = a.keys().copied().collect();
        assert_eq!(keys, SizeVariant::ALL.to_vec());
        assert_eq!((a[&SizeVariant::Thumbnail].width, a[&SizeVariant::Thumbnail].height), (300, 200));
        assert_eq!((a[&SizeVariant::Original].width, a[&SizeVariant::Original].height), (2400, 1600));

        let b = result.manifest.get("sub/b.png").unwrap();
        assert!(b.values().all(|asset| (asset.width, asset.height) == (100, 50)));
        assert!(b[&SizeVariant::Medium].path.ends_with("out/sub/b_medium.webp"));
    }

    #[test]
    fn decode_failure_is_isolated() {
        let tmp = source_tree(&["a.jpg", "broken.png", "c.jpg"]);
        let backend = MockBackend::with_images(vec![("a.jpg", rgb(40, 30)), ("c.jpg", rgb(40, 30))]);

        let mut events = Vec::new();
        let result = optimize_with_backend(
            &backend,
            &tmp.path().join("src"),
            &tmp.path().join("out"),
            |e| events.push(e.clone()),
        )
        .unwrap();

        assert_eq!(result.manifest.len(), 2);
        assert!(result.manifest.get("broken.png").is_none());
        assert_eq!(result.failures.len(), 1);
        assert!(result.failures[0].path.ends_with("broken.png"));
        assert!(result.failures[0].error.contains("broken.png"));

        // broken.png sits between the two good files and doesn't stop c.jpg
        let decoded: Vec<String> = backend
            .get_operations()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Decode(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(decoded.len(), 3);
        assert!(decoded[2].ends_with("c.jpg"));

        assert!(events.iter().any(|e| matches!(e, OptimizeEvent::FileFailed { .. })));
        assert!(matches!(
            events.last(),
            Some(OptimizeEvent::Finished {
                optimized: 2,
                failed: 1,
                ..
            })
        ));
    }

    #[test]
    fn alpha_sources_are_flattened_before_encode() {
        let tmp = source_tree(&["logo.png"]);
        let backend = MockBackend::with_images(vec![(
            "logo.png",
            DynamicImage::ImageRgba8(RgbaImage::new(64, 64)),
        )]);

        let result = optimize_with_backend(
            &backend,
            &tmp.path().join("src"),
            &tmp.path().join("out"),
            |_| {},
        )
        .unwrap();

        // The backend only accepts RgbImage, so reaching encode means flattened.
        assert_eq!(backend.encoded_outputs().len(), 4);
        assert_eq!(result.manifest.len(), 1);
    }

    #[test]
    fn empty_source_still_writes_manifest() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("src")).unwrap();
        let output = tmp.path().join("out");

        let result =
            optimize_with_backend(&MockBackend::new(), &tmp.path().join("src"), &output, |_| {})
                .unwrap();

        assert!(result.manifest.is_empty());
        let written = std::fs::read_to_string(output.join(OPTIMIZATION_MANIFEST)).unwrap();
        assert_eq!(written, "{}");
    }

    #[test]
    fn manifest_json_shape_and_order() {
        let tmp = source_tree(&["z.jpg", "a.jpg"]);
        let backend = MockBackend::with_images(vec![("z.jpg", rgb(10, 10)), ("a.jpg", rgb(10, 10))]);

        let result = optimize_with_backend(
            &backend,
            &tmp.path().join("src"),
            &tmp.path().join("out"),
            |_| {},
        )
        .unwrap();

        let written = std::fs::read_to_string(&result.manifest_path).unwrap();
        assert!(written.find("\"a.jpg\"").unwrap() < written.find("\"z.jpg\"").unwrap());
        let thumb = written.find("\"thumbnail\"").unwrap();
        let medium = written.find("\"medium\"").unwrap();
        let large = written.find("\"large\"").unwrap();
        let original = written.find("\"original\"").unwrap();
        assert!(thumb < medium && medium < large && large < original);

        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        let asset = &value["a.jpg"]["thumbnail"];
        assert!(asset["path"].as_str().unwrap().ends_with("a_thumbnail.webp"));
        assert_eq!(asset["width"], 10);
        assert_eq!(asset["height"], 10);

        let roundtrip: OptimizationManifest = serde_json::from_str(&written).unwrap();
        assert_eq!(roundtrip, result.manifest);
    }

    #[test]
    fn rerun_produces_identical_manifest() {
        let tmp = source_tree(&["a.jpg", "b/c.gif"]);
        let images = vec![("a.jpg", rgb(1300, 700)), ("c.gif", rgb(20, 900))];
        let source = tmp.path().join("src");
        let output = tmp.path().join("out");

        let first = optimize_with_backend(
            &MockBackend::with_images(images.clone()),
            &source,
            &output,
            |_| {},
        )
        .unwrap();
        let first_json = std::fs::read(&first.manifest_path).unwrap();

        let second =
            optimize_with_backend(&MockBackend::with_images(images), &source, &output, |_| {})
                .unwrap();
        let second_json = std::fs::read(&second.manifest_path).unwrap();

        assert_eq!(first_json, second_json);
    }

    #[test]
    fn events_follow_run_order() {
        let tmp = source_tree(&["a.jpg"]);
        let backend = MockBackend::with_images(vec![("a.jpg", rgb(10, 10))]);
        let mut events = Vec::new();

        optimize_with_backend(
            &backend,
            &tmp.path().join("src"),
            &tmp.path().join("out"),
            |e| events.push(e.clone()),
        )
        .unwrap();

        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], OptimizeEvent::Started { file_count: 1, .. }));
        assert!(matches!(&events[1], OptimizeEvent::FileOptimized { relative_path, .. } if relative_path == "a.jpg"));
        assert!(matches!(&events[2], OptimizeEvent::Finished { optimized: 1, failed: 0, .. }));
    }
}
