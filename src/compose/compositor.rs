//! Placing a design onto a mockup
//!
//! The design is fitted into the placement box, optionally rotated onto a
//! larger transparent canvas, and overlaid at the placement position.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use log::debug;

use crate::errors::{MockupError, MockupResult};
use crate::template::PlacementParams;

use super::placement::{resolve_placement, Placement};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Resize `design` to fit inside `width` x `height` keeping its aspect ratio,
/// centered on a transparent canvas of exactly that size
pub fn fit_contain(design: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let resized = design.resize(width, height, FilterType::Lanczos3).to_rgba8();

    let mut canvas = RgbaImage::from_pixel(width, height, TRANSPARENT);
    let offset_x = (width - resized.width().min(width)) / 2;
    let offset_y = (height - resized.height().min(height)) / 2;
    imageops::overlay(&mut canvas, &resized, offset_x as i64, offset_y as i64);
    canvas
}

/// Size of the box that holds a `width` x `height` image rotated by `degrees`
pub fn rotated_bounds(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (width as f64, height as f64);

    let rotated_w = (w * cos + h * sin).round().max(1.0) as u32;
    let rotated_h = (w * sin + h * cos).round().max(1.0) as u32;
    (rotated_w, rotated_h)
}

/// Rotate clockwise by `degrees`, growing the canvas so no corner is cut off
///
/// Uncovered areas are transparent.
pub fn rotate_expanded(image: &RgbaImage, degrees: f64) -> RgbaImage {
    let (rotated_w, rotated_h) = rotated_bounds(image.width(), image.height(), degrees);

    // Rotate on a canvas large enough for both orientations, then trim
    let canvas_w = rotated_w.max(image.width());
    let canvas_h = rotated_h.max(image.height());
    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, TRANSPARENT);
    imageops::overlay(
        &mut canvas,
        image,
        ((canvas_w - image.width()) / 2) as i64,
        ((canvas_h - image.height()) / 2) as i64,
    );

    let rotated = rotate_about_center(
        &canvas,
        degrees.to_radians() as f32,
        Interpolation::Bilinear,
        TRANSPARENT,
    );

    imageops::crop_imm(
        &rotated,
        (canvas_w - rotated_w) / 2,
        (canvas_h - rotated_h) / 2,
        rotated_w,
        rotated_h,
    )
    .to_image()
}

/// Overlay `design` onto a copy of `mockup` with its top-left corner at (x, y)
///
/// Parts of the design outside the mockup are clipped.
pub fn composite(mockup: &DynamicImage, design: &RgbaImage, x: i64, y: i64) -> RgbaImage {
    let mut base = mockup.to_rgba8();
    imageops::overlay(&mut base, design, x, y);
    base
}

/// Prepare the design for a resolved placement: fit, then rotate if needed
pub fn prepare_design(design: &DynamicImage, placement: &Placement) -> MockupResult<RgbaImage> {
    if !placement.rotation.is_finite() {
        return Err(MockupError::invalid_parameter("rotation", placement.rotation.to_string()));
    }

    let fitted = fit_contain(design, placement.width, placement.height);
    if placement.rotation == 0.0 {
        Ok(fitted)
    } else {
        Ok(rotate_expanded(&fitted, placement.rotation))
    }
}

/// Place `design` on `mockup` according to `params`
///
/// # Returns
/// The flattened RGBA result and the placement that was used
pub fn create_mockup(
    mockup: &DynamicImage,
    design: &DynamicImage,
    params: &PlacementParams,
) -> MockupResult<(RgbaImage, Placement)> {
    let placement = resolve_placement(
        params,
        (design.width(), design.height()),
        (mockup.width(), mockup.height()),
    );
    debug!("Resolved placement: {:?}", placement);

    let prepared = prepare_design(design, &placement)?;
    let result = composite(mockup, &prepared, placement.x, placement.y);
    Ok((result, placement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_fit_contain_letterboxes() {
        let fitted = fit_contain(&solid(100, 50, [255, 0, 0]), 40, 40);
        assert_eq!(fitted.dimensions(), (40, 40));
        // Design becomes 40x20, centered vertically
        assert_eq!(fitted.get_pixel(20, 0)[3], 0);
        assert_eq!(fitted.get_pixel(20, 20), &Rgba([255, 0, 0, 255]));
        assert_eq!(fitted.get_pixel(20, 39)[3], 0);
    }

    #[test]
    fn test_rotated_bounds() {
        assert_eq!(rotated_bounds(40, 20, 0.0), (40, 20));
        assert_eq!(rotated_bounds(40, 20, 90.0), (20, 40));
        assert_eq!(rotated_bounds(40, 20, 180.0), (40, 20));
        assert_eq!(rotated_bounds(10, 10, 45.0), (14, 14));
    }

    #[test]
    fn test_rotate_expanded_grows_canvas() {
        let image = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 255, 255]));
        let rotated = rotate_expanded(&image, 90.0);
        assert_eq!(rotated.dimensions(), (20, 40));
        assert!(rotated.get_pixel(10, 20)[3] > 250);

        let tilted = rotate_expanded(&image, 30.0);
        assert_eq!(tilted.dimensions(), rotated_bounds(40, 20, 30.0));
        // Corners of a tilted rectangle are uncovered
        assert_eq!(tilted.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_composite_clips_outside() {
        let mockup = solid(10, 10, [255, 255, 255]);
        let design = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));

        let result = composite(&mockup, &design, -2, 8);
        assert_eq!(result.dimensions(), (10, 10));
        assert_eq!(result.get_pixel(0, 9), &Rgba([0, 0, 0, 255]));
        assert_eq!(result.get_pixel(1, 8), &Rgba([0, 0, 0, 255]));
        assert_eq!(result.get_pixel(2, 9), &Rgba([255, 255, 255, 255]));
        assert_eq!(result.get_pixel(0, 7), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_create_mockup_uses_params() {
        let mockup = solid(50, 50, [255, 255, 255]);
        let design = solid(10, 10, [0, 255, 0]);
        let params = PlacementParams {
            x: Some(5),
            y: Some(10),
            width: Some(20),
            height: Some(20),
            rotation: 0.0,
        };

        let (result, placement) = create_mockup(&mockup, &design, &params).unwrap();
        assert_eq!((placement.x, placement.y, placement.width), (5, 10, 20));
        assert_eq!(result.get_pixel(14, 19), &Rgba([0, 255, 0, 255]));
        assert_eq!(result.get_pixel(4, 19), &Rgba([255, 255, 255, 255]));
        assert_eq!(result.get_pixel(25, 19), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_rejects_non_finite_rotation() {
        let params = PlacementParams { rotation: f64::NAN, ..Default::default() };
        let result = create_mockup(&solid(4, 4, [0, 0, 0]), &solid(2, 2, [0, 0, 0]), &params);
        assert!(matches!(result, Err(MockupError::InvalidParameter { .. })));
    }
}
