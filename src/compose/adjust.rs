//! Design adjustment for dark templates

use image::DynamicImage;
use log::info;

/// Whether `template` names a dark garment
///
/// Matching is a case-sensitive substring test against each keyword.
pub fn needs_inversion(template: &str, dark_keywords: &[String]) -> bool {
    dark_keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| template.contains(k.as_str()))
}

/// Invert the design's colors for dark templates, keeping alpha
///
/// Designs for other templates are returned unchanged.
pub fn adjust_design(design: &DynamicImage, template: &str, dark_keywords: &[String]) -> DynamicImage {
    let mut adjusted = design.clone();
    if needs_inversion(template, dark_keywords) {
        info!("Inverting design colors for dark template '{}'", template);
        adjusted.invert();
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn keywords() -> Vec<String> {
        vec!["pepper".to_string(), "black".to_string(), "espresso".to_string()]
    }

    #[test]
    fn test_needs_inversion() {
        assert!(needs_inversion("tshirt-black", &keywords()));
        assert!(needs_inversion("hoodie-espresso-front", &keywords()));
        assert!(!needs_inversion("Hoodie-Espresso-front", &keywords()));
        assert!(!needs_inversion("tshirt-white", &keywords()));
        assert!(!needs_inversion("tshirt-black", &[String::new()]));
    }

    #[test]
    fn test_inversion_keeps_alpha() {
        let design = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 200, 0, 77])));

        let dark = adjust_design(&design, "mug-pepper", &keywords()).to_rgba8();
        assert_eq!(dark.get_pixel(1, 1), &Rgba([245, 55, 255, 77]));

        let light = adjust_design(&design, "mug-white", &keywords()).to_rgba8();
        assert_eq!(light.get_pixel(1, 1), &Rgba([10, 200, 0, 77]));
    }
}
