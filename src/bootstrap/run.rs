use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use wc_core::{AgentConfig, RelayConfig};
use wc_infra::SystemClock;
use wc_relay::RelayServer;

use super::wiring::build_agent_engine;

/// Resolves on Ctrl-C. If the handler cannot be installed the process keeps
/// running and must be stopped externally.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

/// Runs the agent until `shutdown` resolves, then stops both sync loops.
pub async fn run_agent<F>(config: AgentConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let engine = build_agent_engine(&config)?;
    let handle = engine
        .start(CancellationToken::new())
        .context("Failed to start clipboard sync")?;

    shutdown.await;
    handle.shutdown().await;
    Ok(())
}

pub async fn run_relay<F>(config: RelayConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let server = RelayServer::bind(&config, Arc::new(SystemClock))
        .await
        .with_context(|| format!("Failed to bind relay to {}", config.listen))?;
    server.run(shutdown).await.context("Relay server failed")
}
