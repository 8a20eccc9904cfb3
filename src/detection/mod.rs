//! Placeholder box detection
//!
//! This module locates the colored placeholder rectangle painted into box
//! templates and reports it as a pixel bounding box.

mod bbox;
mod color;
mod detector;
mod raster;

pub use self::bbox::BoundingBox;
pub(crate) use self::bbox::serialize_rotation;
pub use self::color::{Color, Tolerance};
pub use self::detector::{
    detect, detect_parallel, detect_parallel_with_stats, detect_with_stats, BoxDetector,
    Detection, ScanAccumulator, ScanStrategy, DEFAULT_PARALLEL_THRESHOLD,
};
pub use self::raster::RasterImage;
