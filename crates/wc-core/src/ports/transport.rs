use async_trait::async_trait;
use tracing::debug;

use crate::clipboard::ClipSnapshot;
use crate::errors::TransportError;

/// Client side of the relay protocol.
#[async_trait]
pub trait SyncTransportPort: Send + Sync {
    /// Fetch the relay's current snapshot.
    async fn pull(&self) -> Result<ClipSnapshot, TransportError>;

    /// Replace the relay's snapshot. Not retried by callers.
    async fn push(&self, snapshot: &ClipSnapshot) -> Result<(), TransportError>;

    /// [`pull`](Self::pull), with every failure mapped to the zero-value
    /// snapshot, which pollers read as "no update".
    async fn pull_or_default(&self) -> ClipSnapshot {
        match self.pull().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                debug!(error = %err, "Relay pull failed, treating as no update");
                ClipSnapshot::default()
            }
        }
    }
}
