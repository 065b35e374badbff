//! Configuration DTOs.
//!
//! Pure data: every field has a default so a partial (or absent) file is a
//! valid configuration. Loading from disk happens in the bootstrap layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clipboard::{ClipKind, OriginPlatform};
use crate::protocol::WireFormat;

pub const DEFAULT_RELAY_PORT: u16 = 6233;
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:6233";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:6233";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub relay: RelayConfig,
}

/// Which JSON shape the agent pushes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormatKind {
    #[default]
    Mime,
    Platform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Relay base address, or the full `/clip` endpoint.
    pub relay_url: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    /// How long a pending self-write waits for its echo.
    pub echo_ttl_ms: u64,
    pub sync_text: bool,
    pub sync_images: bool,
    pub wire_format: WireFormatKind,
    /// Origin tag for the platform wire format. Defaults to the build target.
    pub platform: Option<OriginPlatform>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_ms: 5_000,
            echo_ttl_ms: 2_000,
            sync_text: true,
            sync_images: true,
            wire_format: WireFormatKind::Mime,
            platform: None,
        }
    }
}

impl AgentConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn echo_ttl(&self) -> Duration {
        Duration::from_millis(self.echo_ttl_ms)
    }

    pub fn wire_format(&self) -> WireFormat {
        match self.wire_format {
            WireFormatKind::Mime => WireFormat::Mime,
            WireFormatKind::Platform => {
                WireFormat::Platform(self.platform.unwrap_or_else(OriginPlatform::current))
            }
        }
    }

    /// Content kinds the agent synchronizes.
    pub fn kinds(&self) -> Vec<ClipKind> {
        ClipKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ClipKind::Text => self.sync_text,
                ClipKind::Image => self.sync_images,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub listen: String,
    /// Upper bound for request bodies; larger uploads are refused.
    pub max_body_bytes: usize,
    /// Refuse pushes whose timestamp is not newer than the stored one.
    /// Off by default: the relay is last-writer-wins.
    pub reject_stale: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN_ADDR.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            reject_stale: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.agent.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.relay.listen, "0.0.0.0:6233");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [agent]
            relay_url = "http://10.0.0.2:6233/clip"
            sync_images = false

            [relay]
            reject_stale = true
            "#,
        )
        .unwrap();

        assert_eq!(config.agent.relay_url, "http://10.0.0.2:6233/clip");
        assert_eq!(config.agent.kinds(), vec![ClipKind::Text]);
        assert_eq!(config.agent.echo_ttl_ms, 2_000);
        assert!(config.relay.reject_stale);
        assert_eq!(config.relay.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn platform_wire_format_uses_configured_tag() {
        let config: AgentConfig = toml::from_str(
            r#"
            wire_format = "platform"
            platform = "android"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.wire_format(),
            WireFormat::Platform(OriginPlatform::Android)
        );
    }
}
