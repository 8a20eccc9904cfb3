//! Application configuration
//!
//! Settings are read from a TOML file; every field has a default so a
//! partial file (or none at all) is valid:
//!
//! ```toml
//! templates_dir = "templates"
//! output_dir = "."
//!
//! [detection]
//! target = { r = 255, g = 0, b = 255 }
//! tolerance = 5
//! parallel_threshold = 1048576
//!
//! [compose]
//! dark_keywords = ["pepper", "black", "espresso"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::detection::{BoxDetector, Color, ScanStrategy, Tolerance, DEFAULT_PARALLEL_THRESHOLD};
use crate::errors::{MockupError, MockupResult};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "mockupkit.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `<name>.png` templates and their parameter files
    pub templates_dir: PathBuf,
    /// Directory generated mockups are written to when no output path is given
    pub output_dir: PathBuf,
    pub detection: DetectionConfig,
    pub compose: ComposeConfig,
}

/// Placeholder detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Per-channel tolerance
    pub tolerance: Tolerance,
    /// Pixel count from which the scan runs in parallel; 0 disables parallel scans
    pub parallel_threshold: u64,
    /// Placeholder color painted into box templates
    pub target: Color,
}

/// Compositing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Template name fragments marking dark garments whose designs get inverted
    pub dark_keywords: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("."),
            detection: DetectionConfig::default(),
            compose: ComposeConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            tolerance: Tolerance::DEFAULT,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            target: Color::MAGENTA,
        }
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        ComposeConfig {
            dark_keywords: vec!["pepper".to_string(), "black".to_string(), "espresso".to_string()],
        }
    }
}

impl DetectionConfig {
    /// Build a detector from these settings
    pub fn detector(&self) -> BoxDetector {
        let strategy = if self.parallel_threshold == 0 {
            ScanStrategy::Sequential
        } else {
            ScanStrategy::Auto { min_pixels: self.parallel_threshold }
        };
        BoxDetector::new(self.target, self.tolerance).with_strategy(strategy)
    }
}

impl AppConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> MockupResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> MockupResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MockupError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, otherwise `mockupkit.toml` when present, otherwise defaults
    pub fn load(path: Option<&Path>) -> MockupResult<Self> {
        match path {
            Some(p) => {
                info!("Loading configuration from {}", p.display());
                Self::from_file(p)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    info!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Serialize configuration as TOML
    pub fn to_toml_string(&self) -> MockupResult<String> {
        toml::to_string_pretty(self).map_err(|e| MockupError::ConfigError(e.to_string()))
    }
}
