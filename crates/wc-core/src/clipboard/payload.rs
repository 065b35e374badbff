//! Conversions between raw clipboard bytes and snapshot `content`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::ClipKind;
use crate::errors::DecodeError;

/// Lossy UTF-8 decode and trim. `None` when nothing but whitespace is left.
pub fn normalize_text(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Turns a raw local clipboard payload into snapshot content.
///
/// Returns `None` for payloads that must not be propagated.
pub fn encode_local_payload(kind: ClipKind, raw: &[u8]) -> Option<String> {
    match kind {
        ClipKind::Text => normalize_text(raw),
        ClipKind::Image if raw.is_empty() => None,
        ClipKind::Image => Some(STANDARD.encode(raw)),
    }
}

/// Turns snapshot content back into bytes for the local clipboard.
///
/// Image bytes are returned as sent; canonicalising them is the job of the
/// image normalizer.
pub fn decode_remote_content(kind: ClipKind, content: &str) -> Result<Vec<u8>, DecodeError> {
    match kind {
        ClipKind::Text => Ok(content.as_bytes().to_vec()),
        ClipKind::Image => Ok(STANDARD.decode(content.trim())?),
    }
}
