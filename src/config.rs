//! Built-in configuration.
//!
//! There is no user-facing config file. Everything the two jobs need is
//! compiled into the binary:
//!
//! - **Optimizer constants**: source and output directories, the manifest
//!   filename, WebP quality and the accepted input extensions.
//! - **Portfolio table**: the category folders and the curated description
//!   lookup, shipped as an embedded TOML document (see
//!   [`stock_config_toml`]) and parsed once at startup into
//!   [`PortfolioConfig`].
//!
//! ## Portfolio Table Format
//!
//! ```toml
//! [[categories]]              # Order here is the order in the manifest
//! id = "pcb"
//! path = "Images&videos/PCB designing/"
//! title = "Professional PCB Design"
//! description = "..."
//!
//! [descriptions]              # Exact filename stem → curated text
//! "dsPIC33 of Motor Control drivers" = "dsPIC33 Motor Control drivers for ..."
//! ```
//!
//! Unknown keys are rejected.
//!
//! ## Walk Depth
//!
//! The optimizer walks its source tree recursively while the portfolio
//! generator only lists the top level of each category folder. The two
//! depths are kept as separate constants ([`OPTIMIZER_DEPTH`],
//! [`PORTFOLIO_DEPTH`]) rather than a shared setting.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Directory the optimizer reads when no `--source` is given.
pub const DEFAULT_SOURCE_DIR: &str = "Images&videos";

/// Directory the optimizer writes when no `--output` is given.
pub const DEFAULT_OUTPUT_DIR: &str = "optimized_images";

/// Manifest filename inside the optimizer's output directory.
pub const OPTIMIZATION_MANIFEST: &str = "optimization_manifest.json";

/// Manifest filename written by the portfolio generator.
pub const PORTFOLIO_MANIFEST: &str = "portfolio-manifest.json";

/// Lossy WebP quality for every variant.
pub const WEBP_QUALITY: u32 = 85;

/// Input extensions the optimizer picks up (matched case-insensitively).
pub const OPTIMIZER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff"];

/// Media extensions listed in the portfolio manifest (matched case-insensitively).
pub const MEDIA_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "mp4", "mov", "avi"];

/// Subset of [`MEDIA_EXTENSIONS`] that are videos.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// How far below a root directory a job looks for files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDepth {
    /// The whole tree.
    Recursive,
    /// Direct children only.
    Shallow,
}

impl ScanDepth {
    /// Value for `walkdir::WalkDir::max_depth` (the root itself is depth 0).
    pub fn max_depth(self) -> usize {
        match self {
            ScanDepth::Recursive => usize::MAX,
            ScanDepth::Shallow => 1,
        }
    }
}

pub const OPTIMIZER_DEPTH: ScanDepth = ScanDepth::Recursive;
pub const PORTFOLIO_DEPTH: ScanDepth = ScanDepth::Shallow;

/// The portfolio table: category folders plus curated descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortfolioConfig {
    /// Categories in manifest order.
    pub categories: Vec<CategoryConfig>,
    /// Exact filename stem → hand-written description.
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
}

/// One portfolio category and the folder it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    /// Manifest key, e.g. `pcb`.
    pub id: String,
    /// Folder relative to the working directory.
    pub path: String,
    pub title: String,
    pub description: String,
}

impl PortfolioConfig {
    /// Reject tables the generator can't produce a sane manifest from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Validation(
                "at least one category is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "category id must not be empty".into(),
                ));
            }
            if category.path.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{}' has an empty path",
                    category.id
                )));
            }
            if !seen.insert(category.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
        }
        Ok(())
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Description for a filename stem.
    ///
    /// Curated text wins on an exact stem match; anything else falls back to
    /// [`naming::plain_description`](crate::naming::plain_description).
    pub fn describe(&self, stem: &str) -> String {
        self.descriptions
            .get(stem)
            .cloned()
            .unwrap_or_else(|| crate::naming::plain_description(stem))
    }
}

/// Parse and validate a portfolio table from TOML.
pub fn parse_config(content: &str) -> Result<PortfolioConfig, ConfigError> {
    let config: PortfolioConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Parse the table compiled into the binary.
pub fn load_stock_config() -> Result<PortfolioConfig, ConfigError> {
    parse_config(stock_config_toml())
}

/// The embedded portfolio table.
///
/// Printed verbatim by the `show-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Portfolio table
# ===============
# Categories are scanned in the order listed. Each folder is read
# non-recursively; subdirectories are ignored.

[[categories]]
id = "embedded"
path = "Images&videos/Embedded Software Development/"
title = "Embedded Software Development"
description = "Advanced firmware solutions for industrial applications and IoT devices, delivering robust and scalable embedded systems"

[[categories]]
id = "pcb"
path = "Images&videos/PCB designing/"
title = "Professional PCB Design"
description = "High-complexity PCB solutions from concept to production, serving global industry leaders and cutting-edge applications"

[[categories]]
id = "gui"
path = "Images&videos/Graphical User Interface Software/"
title = "Industrial GUI & HMI Solutions"
description = "Professional graphical user interface development for industrial applications"

[[categories]]
id = "testbox"
path = "Images&videos/Test box for systems simulation/"
title = "Hardware-in-the-Loop Testing"
description = "Complete test automation systems for complex HVAC applications, enabling comprehensive validation and quality assurance"

# Curated descriptions, keyed by the exact filename stem (no extension).
# Files not listed here get their stem with underscores and dashes
# replaced by spaces.
[descriptions]
"STM32 microcontrollers for embedded systems, specifically in Munters dehumidifiers across a diverse range of sizes" = "STM32 microcontrollers for Munters dehumidifiers across diverse range of sizes"
"STM32 and AVR microcontrollers for one of the world's most renowned coffee machines company" = "STM32 and AVR microcontrollers for world's most renowned coffee machines company"
"nRF52 microcontrollers with LumenRadio Mira Modules for wireless temperature and humidity sensors and remote controls" = "nRF52 microcontrollers with LumenRadio Mira Modules for wireless sensors and remote controls"
"dsPIC33 of Motor Control drivers" = "dsPIC33 Motor Control drivers for high-performance applications"
"Extensive experience with various microcontroller families applied across a range of commercial products" = "Extensive experience with various microcontroller families across commercial products"
"Control board for 4 groups coffee machine. This PCB includes 4 layers, SMD on both sides, PTH on one side. Total of 470 components" = "Control board for 4 groups coffee machine - 4 layers, SMD on both sides, PTH on one side, 470 components total"
"Board design for a complex coffee machine PCB" = "Board design process for complex coffee machine PCB"
"High power motor control board. This Board supports Field-Oriented-Control (FOC) algorithm with Power-Factor-Corrector (PFC)" = "High power motor control board supporting Field-Oriented-Control (FOC) and Power-Factor-Corrector (PFC)"
"NFC board for high technology coffee machines with AI system for system recognition" = "NFC board for high technology coffee machines with AI system recognition"
"Dashboard PCB design to control a stepper motor and RGB LEDs for coffee machines" = "Dashboard PCB design to control stepper motor and RGB LEDs for coffee machines"
"PCB for low cost coffee machines attached directly to the machine heater to save space" = "PCB for low cost coffee machines attached directly to machine heater to save space"
"Developed a GUI application by LabVIEW, for coffee machine services and production factories worldwide." = "LabVIEW GUI application for coffee machine services and production factories worldwide"
"PyQT5 application for test box machine simulator" = "PyQT5 application for test box machine simulator with intuitive interface"
"Complete test box for complex humidification and dehumidification systems" = "Complete test box for complex humidification and dehumidification systems"
"3D model for the case" = "3D model design for the test box case with precision engineering"
"##
}
