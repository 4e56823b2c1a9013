//! Portfolio manifest generation.
//!
//! Lists the media files of each configured category folder and produces the
//! JSON manifest the website's gallery loads.
//!
//! ## Directory Structure
//!
//! ```text
//! Images&videos/
//! ├── Embedded Software Development/
//! │   ├── dsPIC33 of Motor Control drivers.png    # Curated description
//! │   └── motor_control-v2.jpg                    # Derived description
//! ├── PCB designing/
//! │   ├── Board design for a complex coffee machine PCB.mp4
//! │   └── archive/                                # Ignored: scan is shallow
//! ├── Graphical User Interface Software/
//! └── Test box for systems simulation/
//! ```
//!
//! ## Output
//!
//! ```json
//! {
//!   "embedded": {
//!     "title": "Embedded Software Development",
//!     "description": "...",
//!     "images": [
//!       {
//!         "src": "Images&videos/Embedded Software Development/motor_control-v2.jpg",
//!         "alt": "Motor Control V2",
//!         "description": "motor control v2"
//!       }
//!     ]
//!   },
//!   "pcb": { "title": "...", "description": "...", "images": [] }
//! }
//! ```
//!
//! Every configured category appears, in configuration order, even when its
//! folder is empty or missing. Files within a category are ordered by name.

use crate::config::{
    CategoryConfig, MEDIA_EXTENSIONS, PORTFOLIO_DEPTH, PortfolioConfig, VIDEO_EXTENSIONS,
};
use crate::naming::{alt_text, has_extension, to_web_path};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Whether a media file is a still image or a video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> Self {
        if has_extension(path, VIDEO_EXTENSIONS) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// One media file in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// Category folder joined with the file name, `/`-separated.
    pub src: String,
    pub alt: String,
    pub description: String,
    #[serde(skip)]
    pub kind: MediaKind,
}

/// One category's block in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryManifest {
    pub title: String,
    pub description: String,
    pub images: Vec<MediaEntry>,
}

/// Category id → category block, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioManifest {
    pub categories: Vec<(String, CategoryManifest)>,
}

impl PortfolioManifest {
    pub fn get(&self, id: &str) -> Option<&CategoryManifest> {
        self.categories
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, category)| category)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(id, _)| id.as_str())
    }

    /// Total media entries across all categories.
    pub fn media_count(&self) -> usize {
        self.categories.iter().map(|(_, c)| c.images.len()).sum()
    }
}

// Serialized as a JSON object; serde's derive would produce an array of pairs.
impl Serialize for PortfolioManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (id, category) in &self.categories {
            map.serialize_entry(id, category)?;
        }
        map.end()
    }
}

/// Progress events emitted while scanning.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    CategoryStarted {
        id: String,
        title: String,
        path: String,
    },
    Found {
        src: String,
        kind: MediaKind,
    },
    MissingFolder {
        path: String,
    },
    CategoryFinished {
        id: String,
        count: usize,
    },
}

/// Build the manifest for every configured category.
///
/// Category folders are resolved against `root` (the working directory in
/// normal use); `src` values stay relative to it.
pub fn generate(
    root: &Path,
    config: &PortfolioConfig,
    mut on_event: impl FnMut(&ScanEvent),
) -> Result<PortfolioManifest, ScanError> {
    let mut manifest = PortfolioManifest::default();

    for category in &config.categories {
        on_event(&ScanEvent::CategoryStarted {
            id: category.id.clone(),
            title: category.title.clone(),
            path: category.path.clone(),
        });

        let images = scan_category(root, category, config, &mut on_event)?;

        on_event(&ScanEvent::CategoryFinished {
            id: category.id.clone(),
            count: images.len(),
        });

        manifest.categories.push((
            category.id.clone(),
            CategoryManifest {
                title: category.title.clone(),
                description: category.description.clone(),
                images,
            },
        ));
    }

    Ok(manifest)
}

/// List the media files directly inside one category folder.
///
/// A missing folder is reported through [`ScanEvent::MissingFolder`] and
/// yields an empty list. Subdirectories are not descended into.
pub fn scan_category(
    root: &Path,
    category: &CategoryConfig,
    config: &PortfolioConfig,
    mut on_event: impl FnMut(&ScanEvent),
) -> Result<Vec<MediaEntry>, ScanError> {
    let folder = root.join(&category.path);
    if !folder.is_dir() {
        on_event(&ScanEvent::MissingFolder {
            path: category.path.clone(),
        });
        return Ok(Vec::new());
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(&folder)
        .min_depth(1)
        .max_depth(PORTFOLIO_DEPTH.max_depth())
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_extension(path, MEDIA_EXTENSIONS) {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let src = to_web_path(&Path::new(&category.path).join(entry.file_name()));
        let kind = MediaKind::from_path(path);

        on_event(&ScanEvent::Found {
            src: src.clone(),
            kind,
        });
        images.push(MediaEntry {
            src,
            alt: alt_text(&stem),
            description: config.describe(&stem),
            kind,
        });
    }

    Ok(images)
}

/// Serialize the manifest as indented JSON, non-ASCII kept as is.
pub fn write_manifest(manifest: &PortfolioManifest, path: &Path) -> Result<(), ScanError> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json)?;
    Ok(())
}
