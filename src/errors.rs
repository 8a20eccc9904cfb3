//! Custom error types for mockup processing

use std::fmt;
use std::io;

use crate::detection::{Color, Tolerance};

/// Error types for detection, template and compositing operations
#[derive(Debug)]
pub enum MockupError {
    /// I/O error
    IoError(io::Error),
    /// Image decoding or encoding failed
    ImageError(image::ImageError),
    /// The scan matched zero pixels for the target color
    NoMatchFound { target: Color, tolerance: Tolerance },
    /// Raster dimensions, channel count or buffer length are unusable
    InvalidRaster(String),
    /// A caller supplied parameter could not be parsed or is out of range
    InvalidParameter { name: String, value: String },
    /// Template name contains characters outside the allowed set
    InvalidTemplateName(String),
    /// Template image does not exist in the template directory
    TemplateNotFound(String),
    /// Placement parameter file could not be read or written
    ParamsError(String),
    /// Configuration file is malformed
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for MockupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockupError::IoError(e) => write!(f, "I/O error: {}", e),
            MockupError::ImageError(e) => write!(f, "Image error: {}", e),
            MockupError::NoMatchFound { target, tolerance } => write!(
                f,
                "No matching region found for RGB({}, {}, {}) within tolerance {}",
                target.r, target.g, target.b, tolerance.value()
            ),
            MockupError::InvalidRaster(msg) => write!(f, "Invalid raster: {}", msg),
            MockupError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter: {} = {}", name, value)
            }
            MockupError::InvalidTemplateName(name) => write!(f, "Invalid template name: {}", name),
            MockupError::TemplateNotFound(name) => write!(f, "Template not found: {}", name),
            MockupError::ParamsError(msg) => write!(f, "Placement parameters error: {}", msg),
            MockupError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MockupError::GenericError(msg) => write!(f, "Mockup error: {}", msg),
        }
    }
}

impl std::error::Error for MockupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MockupError::IoError(e) => Some(e),
            MockupError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MockupError {
    fn from(error: io::Error) -> Self {
        MockupError::IoError(error)
    }
}

impl From<image::ImageError> for MockupError {
    fn from(error: image::ImageError) -> Self {
        MockupError::ImageError(error)
    }
}

impl From<serde_json::Error> for MockupError {
    fn from(error: serde_json::Error) -> Self {
        MockupError::ParamsError(error.to_string())
    }
}

impl From<toml::de::Error> for MockupError {
    fn from(error: toml::de::Error) -> Self {
        MockupError::ConfigError(error.to_string())
    }
}

impl From<String> for MockupError {
    fn from(msg: String) -> Self {
        MockupError::GenericError(msg)
    }
}

impl MockupError {
    /// Build an `InvalidParameter` error from a name and the offending value
    pub fn invalid_parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
        MockupError::InvalidParameter {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Result type for mockup operations
pub type MockupResult<T> = Result<T, MockupError>;
