//! Resolving placement parameters against actual image sizes

use crate::template::PlacementParams;

/// Fully resolved placement of a design on a mockup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Left edge on the mockup; may be negative, the overflow is clipped
    pub x: i64,
    /// Top edge on the mockup; may be negative, the overflow is clipped
    pub y: i64,
    /// Box the design is fitted into
    pub width: u32,
    pub height: u32,
    /// Clockwise rotation in degrees
    pub rotation: f64,
}

/// Fill in every missing parameter
///
/// * width/height: the stored value when present and non-zero, else the
///   design's natural size. A zero width from a degenerate detection therefore
///   falls back to the natural size as well.
/// * x/y: the stored value when present (zero included), else centered on
///   the mockup, rounding toward negative infinity.
pub fn resolve_placement(
    params: &PlacementParams,
    design_size: (u32, u32),
    mockup_size: (u32, u32),
) -> Placement {
    let width = params.width.filter(|w| *w > 0).unwrap_or(design_size.0);
    let height = params.height.filter(|h| *h > 0).unwrap_or(design_size.1);

    let x = params.x.unwrap_or_else(|| centered(mockup_size.0, width));
    let y = params.y.unwrap_or_else(|| centered(mockup_size.1, height));

    Placement {
        x,
        y,
        width,
        height,
        rotation: params.rotation,
    }
}

fn centered(outer: u32, inner: u32) -> i64 {
    (outer as i64 - inner as i64).div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_center_natural_size() {
        let placement = resolve_placement(&PlacementParams::default(), (200, 100), (1000, 801));
        assert_eq!(placement, Placement { x: 400, y: 350, width: 200, height: 100, rotation: 0.0 });
    }

    #[test]
    fn test_design_larger_than_mockup_centers_negative() {
        let placement = resolve_placement(&PlacementParams::default(), (301, 50), (100, 50));
        assert_eq!(placement.x, -101);
        assert_eq!(placement.y, 0);
    }

    #[test]
    fn test_stored_values_win() {
        let params = PlacementParams {
            x: Some(0),
            y: Some(12),
            width: Some(300),
            height: Some(400),
            rotation: 10.0,
        };
        let placement = resolve_placement(&params, (50, 50), (1000, 1000));
        assert_eq!(placement, Placement { x: 0, y: 12, width: 300, height: 400, rotation: 10.0 });
    }

    #[test]
    fn test_zero_size_falls_back_to_design() {
        let params = PlacementParams {
            width: Some(0),
            height: Some(0),
            ..Default::default()
        };
        let placement = resolve_placement(&params, (64, 32), (128, 128));
        assert_eq!((placement.width, placement.height), (64, 32));
        assert_eq!((placement.x, placement.y), (32, 48));
    }
}
