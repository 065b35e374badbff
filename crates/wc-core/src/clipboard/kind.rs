use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DecodeError;

/// Closed set of content kinds the relay carries.
///
/// Serialized as the mime string used on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClipKind {
    #[default]
    #[serde(rename = "text/plain")]
    Text,
    #[serde(rename = "image/png")]
    Image,
}

impl ClipKind {
    pub const ALL: [ClipKind; 2] = [ClipKind::Text, ClipKind::Image];

    pub fn as_mime(&self) -> &'static str {
        match self {
            ClipKind::Text => "text/plain",
            ClipKind::Image => "image/png",
        }
    }
}

impl fmt::Display for ClipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

impl FromStr for ClipKind {
    type Err = DecodeError;

    /// Accepts the bare mime and tolerates parameters such as
    /// `text/plain; charset=utf-8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("text/plain") {
            Ok(ClipKind::Text)
        } else if essence.eq_ignore_ascii_case("image/png") {
            Ok(ClipKind::Image)
        } else {
            Err(DecodeError::UnknownMime(s.to_string()))
        }
    }
}
