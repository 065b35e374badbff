//! Assembles the sync engine from concrete adapters.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use wc_app::{SyncEngine, SyncEngineDeps, SyncEngineSettings};
use wc_core::ports::LocalClipboardPort;
use wc_core::AgentConfig;
use wc_infra::{PngImageNormalizer, SystemClock};
use wc_network::HttpSyncTransport;
use wc_platform::SystemClipboard;

/// Engine against the OS clipboard.
pub fn build_agent_engine(config: &AgentConfig) -> anyhow::Result<SyncEngine> {
    let clipboard = SystemClipboard::new().context("Failed to open the system clipboard")?;
    build_engine(config, Arc::new(clipboard))
}

/// Engine against any clipboard adapter, talking HTTP to the configured relay.
pub fn build_engine(
    config: &AgentConfig,
    local_clipboard: Arc<dyn LocalClipboardPort>,
) -> anyhow::Result<SyncEngine> {
    let clock = Arc::new(SystemClock);
    let transport = HttpSyncTransport::new(
        &config.relay_url,
        config.wire_format(),
        config.request_timeout(),
        clock.clone(),
    )
    .with_context(|| format!("Invalid relay address: {}", config.relay_url))?;

    info!(
        relay = %transport.endpoint(),
        wire_format = ?config.wire_format(),
        "Agent configured"
    );

    Ok(SyncEngine::new(
        SyncEngineDeps {
            local_clipboard,
            transport: Arc::new(transport),
            image_normalizer: Arc::new(PngImageNormalizer::new()),
            clock,
        },
        SyncEngineSettings {
            poll_interval: config.poll_interval(),
            echo_ttl: config.echo_ttl(),
            kinds: config.kinds(),
        },
    ))
}
