use serde::{Deserialize, Serialize};

use crate::clipboard::{ClipKind, ClipSnapshot, OriginPlatform};
use crate::errors::DecodeError;

/// `{"content", "mime", "timestamp"}`, the encoding the relay serves.
///
/// A missing `timestamp` decodes as `0`, which the relay treats as "stamp
/// on receipt".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeWire {
    pub content: String,
    pub mime: ClipKind,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<OriginPlatform>,
}

/// `{"type", "content"}`: tagged by origin platform, text only, no
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformWire {
    #[serde(rename = "type")]
    pub platform: OriginPlatform,
    pub content: String,
}

/// Either accepted encoding of a [`ClipSnapshot`].
///
/// Decoding tries the mime form first, so a body carrying `mime` is never
/// read as platform-tagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireSnapshot {
    Mime(MimeWire),
    Platform(PlatformWire),
}

/// Encoding an agent pushes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    Mime,
    Platform(OriginPlatform),
}

impl From<ClipSnapshot> for MimeWire {
    fn from(snapshot: ClipSnapshot) -> Self {
        Self {
            content: snapshot.content,
            mime: snapshot.mime,
            timestamp: snapshot.timestamp,
            origin: snapshot.origin,
        }
    }
}

impl WireSnapshot {
    /// Encodes `snapshot` for pushing.
    ///
    /// The platform form cannot carry images or timestamps, so images are
    /// always sent in the mime form with the origin attached.
    pub fn encode(snapshot: &ClipSnapshot, format: WireFormat) -> Self {
        match format {
            WireFormat::Mime => WireSnapshot::Mime(MimeWire::from(snapshot.clone())),
            WireFormat::Platform(platform) => match snapshot.mime {
                ClipKind::Text => WireSnapshot::Platform(PlatformWire {
                    platform,
                    content: snapshot.content.clone(),
                }),
                ClipKind::Image => WireSnapshot::Mime(MimeWire::from(
                    snapshot.clone().with_origin(platform),
                )),
            },
        }
    }

    /// Converts a decoded body into the domain snapshot.
    ///
    /// `received_at` stamps encodings that carry no timestamp.
    pub fn into_snapshot(self, received_at: i64) -> ClipSnapshot {
        match self {
            WireSnapshot::Mime(wire) => ClipSnapshot {
                content: wire.content,
                mime: wire.mime,
                timestamp: wire.timestamp,
                origin: wire.origin,
            },
            WireSnapshot::Platform(wire) => ClipSnapshot {
                content: wire.content,
                mime: ClipKind::Text,
                timestamp: received_at,
                origin: Some(wire.platform),
            },
        }
    }

    pub fn from_json(body: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, DecodeError> {
        Ok(serde_json::to_vec(self)?)
    }
}
