//! Bounding box produced by placeholder detection

use serde::{Deserialize, Serialize, Serializer};

/// Largest magnitude at which every integer is exactly representable in f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write an integral rotation as a JSON integer and anything else as a float
///
/// Parameter files written by earlier runs hold `"rotation": 0`.
pub(crate) fn serialize_rotation<S: Serializer>(rotation: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if rotation.fract() == 0.0 && rotation.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*rotation as i64)
    } else {
        serializer.serialize_f64(*rotation)
    }
}

/// Axis-aligned rectangle in pixel coordinates
///
/// `width` and `height` are the span between the first and last matching
/// pixel (`max - min`), not the pixel footprint. A box around a single pixel
/// therefore has zero width and height, and every box is one unit narrower
/// and shorter than the pixels it covers. Parameter files written by earlier
/// runs rely on this arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X coordinate of the top-left corner
    pub x: u32,
    /// Y coordinate of the top-left corner
    pub y: u32,
    /// Horizontal span (max_x - min_x)
    pub width: u32,
    /// Vertical span (max_y - min_y)
    pub height: u32,
    /// Rotation in degrees, always 0 for detected boxes
    #[serde(serialize_with = "serialize_rotation")]
    pub rotation: f64,
}

impl BoundingBox {
    /// Create a box from its inclusive corner coordinates
    ///
    /// The caller guarantees `min_x <= max_x` and `min_y <= max_y`.
    pub(crate) fn from_extent(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        debug_assert!(min_x <= max_x && min_y <= max_y, "inverted extent");
        BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
            rotation: 0.0,
        }
    }

    /// X coordinate of the last matching column
    pub fn max_x(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Y coordinate of the last matching row
    pub fn max_y(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the pixel at (x, y) lies inside the box, edges included
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x <= self.max_x() && y >= self.y && y <= self.max_y()
    }

    /// Whether this box fully encloses `other`
    pub fn encloses(&self, other: &BoundingBox) -> bool {
        self.contains(other.x, other.y) && self.contains(other.max_x(), other.max_y())
    }
}
