//! Filename and path conventions shared by both jobs.
//!
//! ## Display Text From Stems
//!
//! Underscores and dashes in a filename stem are word separators. The stem
//! becomes display text in two flavours:
//!
//! - **Alt text**: separators → spaces, then title-cased.
//!   `motor_control-v2` → "Motor Control V2"
//! - **Plain description**: separators → spaces, case untouched.
//!   `foo_bar` → "foo bar"
//!
//! ## Web Paths
//!
//! Manifests are read by a browser, so every path written into one uses `/`
//! regardless of the separator the host platform produced.

use crate::imaging::SizeVariant;
use std::path::Path;

/// Replace `_` and `-` with spaces.
pub fn spaced(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
}

/// Title-case a string.
///
/// Every letter that follows a non-letter (start of string, space, digit,
/// punctuation) is upper-cased and every other letter is lower-cased, so
/// `"v2x"` becomes `"V2X"` and `"PCB"` becomes `"Pcb"`.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if prev_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    result
}

/// Alt text for a media file, derived from its stem.
pub fn alt_text(stem: &str) -> String {
    title_case(&spaced(stem))
}

/// Description fallback for stems without curated text.
pub fn plain_description(stem: &str) -> String {
    spaced(stem)
}

/// Render a path with `/` separators.
pub fn to_web_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Whether `path` has one of `extensions` (compared case-insensitively, no dot).
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Output filename for one variant of a source image.
///
/// `stem` is the source's relative path without extension and may contain
/// directories: `("projects/board", Medium)` → `projects/board_medium.webp`.
pub fn variant_file_name(stem: &str, variant: SizeVariant) -> String {
    format!("{}_{}.webp", stem, variant.name())
}
