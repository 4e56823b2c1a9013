//! CLI output formatting for both jobs.
//!
//! # Output Format
//!
//! ## Optimize
//!
//! ```text
//! Optimizing Images&videos (3 images)
//! Optimized: PCB designing/board.jpg
//!     thumbnail: 300x200
//!     medium: 600x400
//!     large: 1200x800
//!     original: 2400x1600
//! Error processing Images&videos/broken.png: Processing failed: ...
//!
//! Optimization complete! 2 optimized, 1 failed
//! Manifest saved to optimized_images/optimization_manifest.json
//! ```
//!
//! ## Manifest
//!
//! ```text
//! Scanning Professional PCB Design (Images&videos/PCB designing/)...
//!     Found: Images&videos/PCB designing/board.png
//!     Found: Images&videos/PCB designing/demo.mp4 (video)
//! Found 2 images for pcb
//!
//! Scanning Industrial GUI & HMI Solutions (Images&videos/Graphical User Interface Software/)...
//!     Warning: Folder Images&videos/Graphical User Interface Software/ does not exist
//! Found 0 images for gui
//! ```
//!
//! # Architecture
//!
//! Each event has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.

use crate::optimize::OptimizeEvent;
use crate::portfolio::{MediaKind, ScanEvent};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

// ============================================================================
// Optimize
// ============================================================================

/// Format a single optimizer event as display lines.
pub fn format_optimize_event(event: &OptimizeEvent) -> Vec<String> {
    match event {
        OptimizeEvent::Started { source, file_count } => vec![format!(
            "Optimizing {} ({})",
            source.display(),
            plural(*file_count, "image")
        )],
        OptimizeEvent::FileOptimized {
            relative_path,
            variants,
        } => {
            let mut lines = vec![format!("Optimized: {}", relative_path)];
            for (variant, asset) in variants {
                lines.push(format!(
                    "{}{}: {}x{}",
                    indent(1),
                    variant,
                    asset.width,
                    asset.height
                ));
            }
            lines
        }
        OptimizeEvent::FileFailed { path, error } => {
            vec![format!("Error processing {}: {}", path.display(), error)]
        }
        OptimizeEvent::Finished {
            manifest_path,
            optimized,
            failed,
        } => vec![
            String::new(),
            format!(
                "Optimization complete! {} optimized, {} failed",
                optimized, failed
            ),
            format!("Manifest saved to {}", manifest_path.display()),
        ],
    }
}

/// Print an optimizer event to stdout.
pub fn print_optimize_event(event: &OptimizeEvent) {
    for line in format_optimize_event(event) {
        println!("{}", line);
    }
}

/// Line shown when the optimizer's source directory is absent.
pub fn format_source_missing(source: &Path) -> String {
    format!("Source directory '{}' not found!", source.display())
}

pub fn print_source_missing(source: &Path) {
    println!("{}", format_source_missing(source));
}

// ============================================================================
// Manifest
// ============================================================================

/// Format a single portfolio scan event as display lines.
pub fn format_scan_event(event: &ScanEvent) -> Vec<String> {
    match event {
        ScanEvent::CategoryStarted { title, path, .. } => {
            vec![String::new(), format!("Scanning {} ({})...", title, path)]
        }
        ScanEvent::Found { src, kind } => {
            let marker = match kind {
                MediaKind::Video => " (video)",
                MediaKind::Image => "",
            };
            vec![format!("{}Found: {}{}", indent(1), src, marker)]
        }
        ScanEvent::MissingFolder { path } => {
            vec![format!("{}Warning: Folder {} does not exist", indent(1), path)]
        }
        ScanEvent::CategoryFinished { id, count } => {
            vec![format!("Found {} images for {}", count, id)]
        }
    }
}

/// Print a portfolio scan event to stdout.
pub fn print_scan_event(event: &ScanEvent) {
    for line in format_scan_event(event) {
        println!("{}", line);
    }
}

/// Closing lines after the portfolio manifest is written.
pub fn format_manifest_written(path: &Path, media_count: usize) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "Manifest written to {} ({})",
            path.display(),
            plural(media_count, "entry").replace("entrys", "entries")
        ),
        "You can now refresh your website to see the updated portfolio!".to_string(),
    ]
}

pub fn print_manifest_written(path: &Path, media_count: usize) {
    for line in format_manifest_written(path, media_count) {
        println!("{}", line);
    }
}
