//! Placeholder box detection
//!
//! Scans a raster for pixels within a per-channel tolerance of a target
//! color and reduces their coordinates to the smallest enclosing box.
//! The sequential and parallel scans share one accumulator type, so both
//! produce identical results for the same input.

use log::debug;
use rayon::prelude::*;

use crate::errors::{MockupError, MockupResult};

use super::bbox::BoundingBox;
use super::color::{Color, Tolerance};
use super::raster::RasterImage;

/// Images with at least this many pixels are scanned in parallel by `ScanStrategy::Auto`
pub const DEFAULT_PARALLEL_THRESHOLD: u64 = 1 << 20;

/// Running extent of matched pixels
///
/// Merging is elementwise min/max plus a summed count, which is commutative
/// and associative, so partial results from any row split combine to the
/// same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanAccumulator {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    pub count: u64,
}

impl ScanAccumulator {
    /// Empty accumulator for an image of the given size
    pub fn new(width: u32, height: u32) -> Self {
        ScanAccumulator {
            min_x: width,
            min_y: height,
            max_x: 0,
            max_y: 0,
            count: 0,
        }
    }

    #[inline]
    pub fn record(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.count += 1;
    }

    pub fn merge(self, other: ScanAccumulator) -> ScanAccumulator {
        ScanAccumulator {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
            count: self.count + other.count,
        }
    }

    /// Turn the accumulated extent into a detection, failing when nothing matched
    pub fn finish(self, target: Color, tolerance: Tolerance) -> MockupResult<Detection> {
        if self.count == 0 {
            return Err(MockupError::NoMatchFound { target, tolerance });
        }

        Ok(Detection {
            bounds: BoundingBox::from_extent(self.min_x, self.min_y, self.max_x, self.max_y),
            matched_pixels: self.count,
        })
    }
}

/// Result of a successful scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Smallest box enclosing every matching pixel
    pub bounds: BoundingBox,
    /// Number of pixels that matched the target color
    pub matched_pixels: u64,
}

/// Scan a run of whole rows starting at row `first_row`
fn scan_rows(
    rows: &[u8],
    first_row: u32,
    image: &RasterImage,
    target: Color,
    tolerance: Tolerance,
) -> ScanAccumulator {
    let mut acc = ScanAccumulator::new(image.width(), image.height());
    let channels = image.channels();

    for (row_offset, row) in rows.chunks_exact(image.row_stride()).enumerate() {
        let y = first_row + row_offset as u32;
        for (x, pixel) in row.chunks_exact(channels).enumerate() {
            if target.matches(pixel, tolerance) {
                acc.record(x as u32, y);
            }
        }
    }

    acc
}

/// Locate the bounding box of all pixels matching `target` within `tolerance`
///
/// Scans every pixel exactly once in row-major order.
///
/// # Returns
/// The enclosing box, or `NoMatchFound` when no pixel matches
pub fn detect(image: &RasterImage, target: Color, tolerance: Tolerance) -> MockupResult<BoundingBox> {
    detect_with_stats(image, target, tolerance).map(|d| d.bounds)
}

/// Same as [`detect`], also reporting how many pixels matched
pub fn detect_with_stats(image: &RasterImage, target: Color, tolerance: Tolerance) -> MockupResult<Detection> {
    scan_rows(image.data(), 0, image, target, tolerance).finish(target, tolerance)
}

/// Parallel form of [`detect`]: row bands are scanned on the rayon pool and
/// their accumulators merged
pub fn detect_parallel(image: &RasterImage, target: Color, tolerance: Tolerance) -> MockupResult<BoundingBox> {
    detect_parallel_with_stats(image, target, tolerance).map(|d| d.bounds)
}

/// Parallel form of [`detect_with_stats`]
pub fn detect_parallel_with_stats(image: &RasterImage, target: Color, tolerance: Tolerance) -> MockupResult<Detection> {
    let rows_per_band = rows_per_band(image.height());
    let band_bytes = image.row_stride() * rows_per_band as usize;

    image
        .data()
        .par_chunks(band_bytes)
        .enumerate()
        .map(|(band, rows)| scan_rows(rows, band as u32 * rows_per_band, image, target, tolerance))
        .reduce(
            || ScanAccumulator::new(image.width(), image.height()),
            ScanAccumulator::merge,
        )
        .finish(target, tolerance)
}

/// Several bands per worker so uneven rows still balance
fn rows_per_band(height: u32) -> u32 {
    let bands = (rayon::current_num_threads() * 4) as u32;
    (height / bands.max(1)).max(1)
}

/// How a `BoxDetector` walks the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Single-threaded row-major scan
    Sequential,
    /// Row bands on the rayon pool
    Parallel,
    /// Parallel once the image has at least `min_pixels` pixels
    Auto { min_pixels: u64 },
}

impl Default for ScanStrategy {
    fn default() -> Self {
        ScanStrategy::Auto { min_pixels: DEFAULT_PARALLEL_THRESHOLD }
    }
}

/// Detector configured once with a target color, tolerance and strategy
#[derive(Debug, Clone, Copy)]
pub struct BoxDetector {
    target: Color,
    tolerance: Tolerance,
    strategy: ScanStrategy,
}

impl BoxDetector {
    pub fn new(target: Color, tolerance: Tolerance) -> Self {
        BoxDetector {
            target,
            tolerance,
            strategy: ScanStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn strategy(&self) -> ScanStrategy {
        self.strategy
    }

    /// Detect the placeholder box in `image`
    pub fn detect(&self, image: &RasterImage) -> MockupResult<Detection> {
        let parallel = match self.strategy {
            ScanStrategy::Sequential => false,
            ScanStrategy::Parallel => true,
            ScanStrategy::Auto { min_pixels } => image.pixel_count() >= min_pixels,
        };

        debug!(
            "Scanning {}x{} raster ({} channels) for {} tolerance {} ({})",
            image.width(),
            image.height(),
            image.channels(),
            self.target,
            self.tolerance.value(),
            if parallel { "parallel" } else { "sequential" }
        );

        if parallel {
            detect_parallel_with_stats(image, self.target, self.tolerance)
        } else {
            detect_with_stats(image, self.target, self.tolerance)
        }
    }
}

impl Default for BoxDetector {
    fn default() -> Self {
        BoxDetector::new(Color::MAGENTA, Tolerance::DEFAULT)
    }
}
