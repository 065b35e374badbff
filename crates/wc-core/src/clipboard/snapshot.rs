use super::{ClipKind, OriginPlatform};

/// The single shared clipboard value.
///
/// `content` is plain text for [`ClipKind::Text`] and standard base64 of the
/// image bytes for [`ClipKind::Image`]. `timestamp` is in seconds since the
/// Unix epoch, stamped by the authoring device. The default value is the
/// "nothing set yet" snapshot a fresh relay serves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipSnapshot {
    pub content: String,
    pub mime: ClipKind,
    pub timestamp: i64,
    pub origin: Option<OriginPlatform>,
}

impl ClipSnapshot {
    pub fn new(mime: ClipKind, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            content: content.into(),
            mime,
            timestamp,
            origin: None,
        }
    }

    pub fn text(content: impl Into<String>, timestamp: i64) -> Self {
        Self::new(ClipKind::Text, content, timestamp)
    }

    pub fn with_origin(mut self, origin: OriginPlatform) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Empty or whitespace-only content is never stored or propagated.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
