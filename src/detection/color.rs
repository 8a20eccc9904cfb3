//! Target color and per-channel tolerance matching

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Pure magenta, the placeholder color painted into box templates
    pub const MAGENTA: Color = Color { r: 255, g: 0, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Test whether the first three channels of `pixel` lie within `tolerance`
    /// of this color on every channel independently.
    ///
    /// `pixel` must hold at least three samples in R, G, B order.
    #[inline]
    pub fn matches(&self, pixel: &[u8], tolerance: Tolerance) -> bool {
        let t = tolerance.value();
        pixel[0].abs_diff(self.r) <= t
            && pixel[1].abs_diff(self.g) <= t
            && pixel[2].abs_diff(self.b) <= t
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::MAGENTA
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parse a color from "r,g,b"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err("Color must have 3 comma-separated values".to_string());
        }

        let channel = |name: &str, raw: &str| {
            raw.trim()
                .parse::<u8>()
                .map_err(|_| format!("Invalid {} channel value: {}", name, raw.trim()))
        };

        Ok(Color {
            r: channel("red", parts[0])?,
            g: channel("green", parts[1])?,
            b: channel("blue", parts[2])?,
        })
    }
}

/// Maximum allowed per-channel distance for a pixel to count as a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance(u8);

impl Tolerance {
    /// Tolerance used by box templates unless configured otherwise
    pub const DEFAULT: Tolerance = Tolerance(5);

    pub const fn new(value: u8) -> Self {
        Tolerance(value)
    }

    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::DEFAULT
    }
}
