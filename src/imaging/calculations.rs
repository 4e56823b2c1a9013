//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::SizeVariant;

/// Shrink-only fit of `original` inside a `bound` × `bound` box.
///
/// The longer edge becomes `bound` and the shorter edge is scaled by the same
/// ratio (rounded, never below 1px). Images that already fit are returned
/// unchanged; nothing is ever enlarged.
///
/// # Examples
/// ```
/// # use portfolio_assets::imaging::fit_within;
/// assert_eq!(fit_within((2400, 1600), 600), (600, 400));
/// assert_eq!(fit_within((200, 100), 600), (200, 100));
/// ```
pub fn fit_within(original: (u32, u32), bound: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    if orig_w.max(orig_h) <= bound {
        return original;
    }

    if orig_w >= orig_h {
        // Landscape or square
        let ratio = bound as f64 / orig_w as f64;
        (bound, scaled(orig_h, ratio))
    } else {
        // Portrait
        let ratio = bound as f64 / orig_h as f64;
        (scaled(orig_w, ratio), bound)
    }
}

fn scaled(edge: u32, ratio: f64) -> u32 {
    ((edge as f64 * ratio).round() as u32).max(1)
}

/// Output dimensions of `variant` for a source of size `original`.
pub fn variant_dimensions(original: (u32, u32), variant: SizeVariant) -> (u32, u32) {
    match variant.bound() {
        Some(bound) => fit_within(original, bound),
        None => original,
    }
}
