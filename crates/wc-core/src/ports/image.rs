use crate::errors::DecodeError;

/// Canonicalises image bytes received from the relay before they are
/// written to the local clipboard.
pub trait ImageNormalizerPort: Send + Sync {
    /// Decode `encoded` (any supported raster format) and re-encode it as an
    /// alpha-aware PNG with the same pixel dimensions.
    fn normalize(&self, encoded: &[u8]) -> Result<Vec<u8>, DecodeError>;
}
