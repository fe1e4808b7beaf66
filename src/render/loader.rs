//! Source image loading and luminance conversion.
//!
//! Formats are sniffed from content rather than trusted from the file
//! extension. Only the first frame of animated formats is decoded.

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader};

use crate::error::PolkaError;

/// Decode the image at `path`.
pub fn open(path: &Path) -> Result<DynamicImage, PolkaError> {
    let load_err = |e: &dyn std::fmt::Display| {
        PolkaError::ImageLoad(format!("{}: {}", path.display(), e))
    };

    ImageReader::open(path)
        .map_err(|e| load_err(&e))?
        .with_guessed_format()
        .map_err(|e| load_err(&e))?
        .decode()
        .map_err(|e| load_err(&e))
}

/// Decode an in-memory image.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, PolkaError> {
    image::load_from_memory(bytes)
        .map_err(|e| PolkaError::ImageLoad(format!("Failed to decode image: {}", e)))
}

/// Single-channel 8-bit luminance of `image`, same dimensions.
pub fn luminance(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_missing_file() {
        let err = open(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, PolkaError::ImageLoad(_)));
        assert!(err.to_string().contains("not/here.png"));
    }

    #[test]
    fn test_undecodable_bytes() {
        assert!(matches!(
            decode(b"not an image at all"),
            Err(PolkaError::ImageLoad(_))
        ));
    }

    #[test]
    fn test_decode_png_to_luminance() {
        let rgb = RgbImage::from_pixel(4, 3, Rgb([255, 255, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let luma = luminance(&decode(&bytes).unwrap());
        assert_eq!(luma.dimensions(), (4, 3));
        assert!(luma.pixels().all(|p| p[0] == 255));
    }
}
