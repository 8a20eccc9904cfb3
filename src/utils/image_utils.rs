//! Image decoding and encoding helpers
//!
//! Bridges the `image` crate and the detector's borrowed `RasterImage`
//! view, and provides PNG encoding plus output file naming.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, ImageFormat};
use log::debug;

use crate::detection::RasterImage;
use crate::errors::MockupResult;

/// Owned 8-bit interleaved pixels decoded from an image file
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Flatten a decoded image to RGB8, or RGBA8 when it carries alpha
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        if image.color().has_alpha() {
            DecodedImage { width, height, channels: 4, pixels: image.to_rgba8().into_raw() }
        } else {
            DecodedImage { width, height, channels: 3, pixels: image.to_rgb8().into_raw() }
        }
    }

    /// Borrow the pixels as a raster for detection
    pub fn raster(&self) -> MockupResult<RasterImage<'_>> {
        RasterImage::new(self.width, self.height, self.channels, &self.pixels)
    }
}

/// Decode an image file into raw pixels
pub fn decode_file(path: &Path) -> MockupResult<DecodedImage> {
    let image = image::open(path)?;
    debug!("Decoded {} ({}x{}, {:?})", path.display(), image.width(), image.height(), image.color());
    Ok(DecodedImage::from_dynamic(&image))
}

/// Encode an image as PNG in memory
pub fn encode_png(image: &DynamicImage) -> MockupResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Ensure a file path has a PNG extension
///
/// Output is always PNG-encoded, so any other extension is replaced.
pub fn ensure_png_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.to_string_lossy().eq_ignore_ascii_case("png") => path.to_path_buf(),
        _ => path.with_extension("png"),
    }
}

/// Build a `<prefix>-<unix millis>.png` file name
pub fn timestamped_png_name(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{}-{}.png", prefix, millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_decoded_channels_follow_alpha() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([1, 2, 3])));
        let decoded = DecodedImage::from_dynamic(&rgb);
        assert_eq!(decoded.channels, 3);
        assert_eq!(decoded.pixels.len(), 18);

        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4])));
        let decoded = DecodedImage::from_dynamic(&rgba);
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.raster().unwrap().row_stride(), 12);
    }

    #[test]
    fn test_encode_png_signature() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_ensure_png_extension() {
        assert_eq!(ensure_png_extension(Path::new("out/a.PNG")), PathBuf::from("out/a.PNG"));
        assert_eq!(ensure_png_extension(Path::new("out/a.jpg")), PathBuf::from("out/a.png"));
        assert_eq!(ensure_png_extension(Path::new("out/a")), PathBuf::from("out/a.png"));
    }

    #[test]
    fn test_timestamped_name() {
        let name = timestamped_png_name("shirt");
        assert!(name.starts_with("shirt-"));
        assert!(name.ends_with(".png"));
    }
}
