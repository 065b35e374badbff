use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use wc_core::ports::ImageNormalizerPort;
use wc_core::DecodeError;

/// Re-encodes clipboard images as 8-bit RGBA PNG.
///
/// Platforms disagree on how images sit on the clipboard (DIB, TIFF, PNG
/// with or without alpha); going through one canonical raster keeps the
/// write side predictable.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngImageNormalizer;

impl PngImageNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl ImageNormalizerPort for PngImageNormalizer {
    fn normalize(&self, encoded: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let decoded = image::load_from_memory(encoded)
            .map_err(|e| DecodeError::Image(format!("decode image bytes: {e}")))?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut png_bytes = Vec::new();
        PngEncoder::new(&mut png_bytes)
            .write_image(rgba.as_raw(), width, height, ColorType::Rgba8.into())
            .map_err(|e| DecodeError::Image(format!("encode png: {e}")))?;

        tracing::trace!(width, height, bytes = png_bytes.len(), "Normalized image");
        Ok(png_bytes)
    }
}
