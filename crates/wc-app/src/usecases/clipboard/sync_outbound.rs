use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, info_span, warn, Instrument};
use wc_core::clipboard::payload::encode_local_payload;
use wc_core::ports::{ClockPort, SyncTransportPort};
use wc_core::{ClipKind, ClipSnapshot};

use crate::state::SharedSyncState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundOutcome {
    /// The event was the echo of our own remote apply.
    EchoSuppressed,
    /// Nothing worth propagating (empty or whitespace-only).
    Empty,
    Pushed(ClipSnapshot),
    /// The relay did not accept the push; dropped, not retried.
    PushFailed(ClipSnapshot),
}

/// Push loop step: turns one local clipboard change into a relay push.
pub struct SyncOutboundClipboardUseCase {
    transport: Arc<dyn SyncTransportPort>,
    clock: Arc<dyn ClockPort>,
    state: SharedSyncState,
}

impl SyncOutboundClipboardUseCase {
    pub fn new(
        transport: Arc<dyn SyncTransportPort>,
        clock: Arc<dyn ClockPort>,
        state: SharedSyncState,
    ) -> Self {
        Self {
            transport,
            clock,
            state,
        }
    }

    pub async fn execute(&self, kind: ClipKind, payload: Vec<u8>) -> OutboundOutcome {
        let span = info_span!(
            "usecase.clipboard.sync_outbound.execute",
            kind = %kind,
            payload_bytes = payload.len(),
        );

        async move {
            let content = encode_local_payload(kind, &payload);

            let snapshot = {
                let mut state = self.state.lock();
                if state.take_echo(kind, Instant::now()) {
                    debug!("Suppressed echo of remote apply");
                    return OutboundOutcome::EchoSuppressed;
                }
                let Some(content) = content else {
                    debug!("Ignoring empty local clipboard change");
                    return OutboundOutcome::Empty;
                };
                let timestamp = state.stamp_push(self.clock.now_secs());
                ClipSnapshot::new(kind, content, timestamp)
            };

            match self.transport.push(&snapshot).await {
                Ok(()) => {
                    info!(timestamp = snapshot.timestamp, "Local clipboard change pushed");
                    OutboundOutcome::Pushed(snapshot)
                }
                Err(err) => {
                    warn!(error = %err, "Failed to push local clipboard change");
                    OutboundOutcome::PushFailed(snapshot)
                }
            }
        }
        .instrument(span)
        .await
    }
}
