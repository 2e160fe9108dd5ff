//! Reads the declared pixel size of a base64-encoded floor image.
//!
//! Only the container header is parsed; pixel data is never decoded.

use std::io::Cursor;

use base64::Engine as _;
use image::ImageReader;

use crate::error::ImageDecodeError;

/// Width and height of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Decodes the base64 envelope of `payload` and returns its header dimensions.
///
/// ASCII whitespace inside the payload (line-wrapped base64) is ignored.
pub fn probe_dimensions(payload: &str) -> Result<Dimensions, ImageDecodeError> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(compact.as_bytes())?;

    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;

    if width == 0 || height == 0 {
        return Err(ImageDecodeError::ZeroDimension { width, height });
    }

    Ok(Dimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn encode(width: u32, height: u32, format: ImageFormat) -> String {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut out, format)
            .unwrap();
        base64::engine::general_purpose::STANDARD.encode(out.into_inner())
    }

    #[test]
    fn test_probe_png() {
        let dims = probe_dimensions(&encode(640, 480, ImageFormat::Png)).unwrap();
        assert_eq!(
            dims,
            Dimensions {
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn test_probe_jpeg() {
        let dims = probe_dimensions(&encode(17, 9, ImageFormat::Jpeg)).unwrap();
        assert_eq!((dims.width, dims.height), (17, 9));
    }

    #[test]
    fn test_probe_gif() {
        let dims = probe_dimensions(&encode(48, 30, ImageFormat::Gif)).unwrap();
        assert_eq!((dims.width, dims.height), (48, 30));
    }

    #[test]
    fn test_probe_bmp() {
        let dims = probe_dimensions(&encode(21, 13, ImageFormat::Bmp)).unwrap();
        assert_eq!((dims.width, dims.height), (21, 13));
    }

    #[test]
    fn test_probe_webp() {
        let dims = probe_dimensions(&encode(64, 40, ImageFormat::WebP)).unwrap();
        assert_eq!((dims.width, dims.height), (64, 40));
    }

    #[test]
    fn test_probe_wrapped_base64() {
        let payload = encode(32, 16, ImageFormat::Png);
        let wrapped: String = payload
            .as_bytes()
            .chunks(20)
            .map(|chunk| format!("{}\n", std::str::from_utf8(chunk).unwrap()))
            .collect();

        let dims = probe_dimensions(&wrapped).unwrap();
        assert_eq!((dims.width, dims.height), (32, 16));
    }

    #[test]
    fn test_probe_invalid_base64() {
        let err = probe_dimensions("not base64 at all!").unwrap_err();
        assert!(matches!(err, ImageDecodeError::Base64(_)));
    }

    #[test]
    fn test_probe_not_an_image() {
        let payload = base64::engine::general_purpose::STANDARD.encode(b"plain text, no header");
        let err = probe_dimensions(&payload).unwrap_err();
        assert!(matches!(err, ImageDecodeError::Image(_)));
    }

    #[test]
    fn test_probe_truncated_png() {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(8, 8).write_to(&mut out, ImageFormat::Png).unwrap();
        let bytes = out.into_inner();
        let payload = base64::engine::general_purpose::STANDARD.encode(&bytes[..12]);

        assert!(probe_dimensions(&payload).is_err());
    }
}
