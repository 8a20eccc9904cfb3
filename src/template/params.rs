//! Placement parameters stored next to templates

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detection::BoundingBox;
use crate::errors::{MockupError, MockupResult};

/// Where and how a design is placed on a mockup
///
/// Every field may be absent (or `null` in a parameter file); absent fields
/// fall back to defaults when the placement is resolved against real image
/// sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Clockwise rotation in degrees
    #[serde(serialize_with = "crate::detection::serialize_rotation")]
    pub rotation: f64,
}

/// Caller supplied values that take precedence over stored parameters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlacementOverrides {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub rotation: Option<f64>,
}

impl PlacementParams {
    /// Apply `overrides` on top of these parameters
    pub fn merged_with(&self, overrides: &PlacementOverrides) -> PlacementParams {
        PlacementParams {
            x: overrides.x.or(self.x),
            y: overrides.y.or(self.y),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            rotation: overrides.rotation.unwrap_or(self.rotation),
        }
    }
}

impl From<BoundingBox> for PlacementParams {
    fn from(bbox: BoundingBox) -> Self {
        PlacementParams {
            x: Some(bbox.x as i64),
            y: Some(bbox.y as i64),
            width: Some(bbox.width),
            height: Some(bbox.height),
            rotation: bbox.rotation,
        }
    }
}

impl From<PlacementOverrides> for PlacementParams {
    fn from(overrides: PlacementOverrides) -> Self {
        PlacementParams::default().merged_with(&overrides)
    }
}

/// Write a detected box as pretty-printed JSON
pub fn save_params(path: &Path, bbox: &BoundingBox) -> MockupResult<()> {
    let json = serde_json::to_string_pretty(bbox)?;
    fs::write(path, json).map_err(|e| {
        MockupError::ParamsError(format!("cannot write {}: {}", path.display(), e))
    })
}

/// Read placement parameters from a JSON file
pub fn read_params(path: &Path) -> MockupResult<PlacementParams> {
    let content = fs::read_to_string(path).map_err(|e| {
        MockupError::ParamsError(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&content)?)
}
