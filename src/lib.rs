//! # Portfolio Assets
//!
//! Static asset and metadata generation for a portfolio website. The
//! filesystem is the data source: a tree of source images becomes a set of
//! web-sized WebP renditions, and a handful of category folders become the
//! JSON manifest the site's gallery script loads at runtime.
//!
//! # Architecture: Two Independent Jobs
//!
//! ```text
//! optimize   Images&videos/**   →  optimized_images/  (WebP variants + optimization_manifest.json)
//! manifest   category folders   →  portfolio-manifest.json
//! ```
//!
//! The jobs share no state. Each one is a synchronous batch run: files are
//! visited in a deterministic order, processed one at a time, and the
//! manifest is written once at the end. Progress is reported through typed
//! events so the CLI can print them and tests can assert on them.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Built-in constants and the embedded portfolio table (categories, curated descriptions) |
//! | [`naming`] | Filename-stem derivations: alt text, description fallback, variant file names, web paths |
//! | [`imaging`] | Decode, alpha flattening, shrink-only resize and WebP encode behind [`imaging::ImageBackend`] |
//! | [`optimize`] | Image optimizer job: recursive discovery, per-file isolation, manifest write |
//! | [`portfolio`] | Portfolio manifest job: shallow category scan, manifest assembly and write |
//! | [`output`] | CLI output formatting for both jobs |
//!
//! # Design Decisions
//!
//! ## Per-File Isolation
//!
//! A corrupt or undecodable file never aborts a run. Every file is processed
//! into its own `Result`; failures are reported with the file path and
//! skipped, and the manifest only lists files whose four variants were all
//! written.
//!
//! ## Deterministic Output
//!
//! Directory walks are sorted by file name, manifest keys are ordered, and
//! variants always serialize as `thumbnail`, `medium`, `large`, `original`.
//! Re-running either job over unchanged input produces a byte-identical
//! manifest.
//!
//! ## Forward-Slash Paths
//!
//! Every path written into a manifest is converted with
//! [`naming::to_web_path`], whatever separator the host platform used while
//! walking.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod optimize;
pub mod output;
pub mod portfolio;

#[cfg(test)]
pub(crate) mod test_helpers;
