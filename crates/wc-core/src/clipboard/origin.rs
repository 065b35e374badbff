use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DecodeError;

/// Platform a snapshot was authored on, used by the platform-tagged wire
/// encoding (`{"type": ..., "content": ...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginPlatform {
    Windows,
    Apple,
    Android,
    Linux,
}

impl OriginPlatform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            OriginPlatform::Windows
        } else if cfg!(any(target_os = "macos", target_os = "ios")) {
            OriginPlatform::Apple
        } else if cfg!(target_os = "android") {
            OriginPlatform::Android
        } else {
            OriginPlatform::Linux
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OriginPlatform::Windows => "windows",
            OriginPlatform::Apple => "apple",
            OriginPlatform::Android => "android",
            OriginPlatform::Linux => "linux",
        }
    }
}

impl fmt::Display for OriginPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OriginPlatform {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" => Ok(OriginPlatform::Windows),
            "apple" | "macos" | "ios" => Ok(OriginPlatform::Apple),
            "android" => Ok(OriginPlatform::Android),
            "linux" => Ok(OriginPlatform::Linux),
            _ => Err(DecodeError::UnknownPlatform(s.to_string())),
        }
    }
}
