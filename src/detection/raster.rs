//! Read-only view over a decoded pixel buffer
//!
//! The detector never owns pixel data. A `RasterImage` borrows an interleaved
//! buffer produced by the decode step and checks up front that its
//! dimensions, channel count and length agree, so the scan can index it
//! without further bounds reasoning.

use crate::errors::{MockupError, MockupResult};

/// Borrowed, interleaved raster whose first three channels are R, G, B
#[derive(Debug, Clone, Copy)]
pub struct RasterImage<'a> {
    width: u32,
    height: u32,
    channels: usize,
    data: &'a [u8],
}

impl<'a> RasterImage<'a> {
    /// Create a view over `data`
    ///
    /// # Arguments
    /// * `width` - Image width in pixels, must be positive
    /// * `height` - Image height in pixels, must be positive
    /// * `channels` - Samples per pixel, at least 3
    /// * `data` - Row-major buffer of exactly `width * height * channels` bytes
    ///
    /// # Returns
    /// The view, or `InvalidRaster` if any precondition fails
    pub fn new(width: u32, height: u32, channels: usize, data: &'a [u8]) -> MockupResult<Self> {
        if width == 0 || height == 0 {
            return Err(MockupError::InvalidRaster(format!(
                "dimensions must be positive, got {}x{}", width, height
            )));
        }

        if channels < 3 {
            return Err(MockupError::InvalidRaster(format!(
                "at least 3 channels required, got {}", channels
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| MockupError::InvalidRaster("buffer size overflows".to_string()))?;

        if data.len() != expected {
            return Err(MockupError::InvalidRaster(format!(
                "expected {} bytes for {}x{}x{}, got {}",
                expected, width, height, channels, data.len()
            )));
        }

        Ok(RasterImage { width, height, channels, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Number of bytes in one row
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels
    }

    /// The underlying buffer
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_raster() {
        let data = vec![0u8; 4 * 2 * 3];
        let raster = RasterImage::new(4, 2, 3, &data).unwrap();
        assert_eq!(raster.row_stride(), 12);
        assert_eq!(raster.pixel_count(), 8);
    }

    #[test]
    fn test_rejects_bad_preconditions() {
        let data = vec![0u8; 16];
        assert!(matches!(RasterImage::new(0, 4, 4, &data), Err(MockupError::InvalidRaster(_))));
        assert!(matches!(RasterImage::new(4, 0, 4, &data), Err(MockupError::InvalidRaster(_))));
        assert!(matches!(RasterImage::new(2, 2, 2, &data[..8]), Err(MockupError::InvalidRaster(_))));
        assert!(matches!(RasterImage::new(2, 2, 3, &data), Err(MockupError::InvalidRaster(_))));
    }
}
