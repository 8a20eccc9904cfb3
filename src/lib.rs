pub mod errors;
pub mod detection;
pub mod template;
pub mod compose;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{BatchSummary, MockupKit};

pub use config::AppConfig;
pub use detection::{detect, BoundingBox, BoxDetector, Color, Detection, RasterImage, Tolerance};
pub use errors::{MockupError, MockupResult};
pub use template::{PlacementOverrides, PlacementParams, TemplateStore};
