//! PNG export for generated image payloads.
//!
//! Backends return images as base64 data URIs. The payload is decoded and
//! verified as a real raster image before anything touches the disk; a PNG
//! payload is written verbatim, anything else is transcoded.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};

use super::ExportError;
use crate::upload::DataUri;

/// Decode and verify an image payload.
pub fn decode(uri: &DataUri) -> Result<DynamicImage, ExportError> {
    if !uri.is_image() {
        return Err(ExportError::NotAnImage(uri.mime.clone()));
    }
    Ok(image::load_from_memory(&uri.data)?)
}

/// Write an image payload to a `.png` file.
pub fn write_file(uri: &DataUri, path: &Path) -> Result<(), ExportError> {
    let decoded = decode(uri)?;
    if uri.mime == "image/png" {
        std::fs::write(path, &uri.data)?;
    } else {
        let mut buf = Cursor::new(Vec::new());
        decoded.write_to(&mut buf, ImageFormat::Png)?;
        std::fs::write(path, buf.into_inner())?;
    }
    Ok(())
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    // 1x1 white PNG
    const PIXEL: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

    fn pixel_uri() -> DataUri {
        DataUri::new("image/png", BASE64.decode(PIXEL).unwrap())
    }

    #[test]
    fn test_decode_valid_png() {
        let img = decode(&pixel_uri()).unwrap();
        assert_eq!((img.width(), img.height()), (1, 1));
    }

    #[test]
    fn test_write_file_preserves_png_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.png");
        let uri = pixel_uri();
        write_file(&uri, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), uri.data);
    }

    #[test]
    fn test_rejects_non_image_mime() {
        let uri = DataUri::new("text/plain", b"hello".to_vec());
        assert!(matches!(decode(&uri), Err(ExportError::NotAnImage(_))));
    }

    #[test]
    fn test_rejects_corrupt_payload() {
        let uri = DataUri::new("image/png", b"not a png".to_vec());
        assert!(matches!(decode(&uri), Err(ExportError::Image(_))));
    }
}
