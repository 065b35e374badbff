//! Per-agent sync engine.
//!
//! Runs two independent tasks: the push loop consumes local clipboard watch
//! events, the pull loop polls the relay on a fixed interval. They only
//! share [`SharedSyncState`]. Both stop when the cancellation token fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wc_core::ports::{
    ClipboardWatch, ClockPort, ImageNormalizerPort, LocalClipboardPort, SyncTransportPort,
};
use wc_core::{ClipKind, ClipboardAccessError};

use crate::state::SharedSyncState;
use crate::usecases::clipboard::{SyncInboundClipboardUseCase, SyncOutboundClipboardUseCase};

pub struct SyncEngineDeps {
    pub local_clipboard: Arc<dyn LocalClipboardPort>,
    pub transport: Arc<dyn SyncTransportPort>,
    pub image_normalizer: Arc<dyn ImageNormalizerPort>,
    pub clock: Arc<dyn ClockPort>,
}

#[derive(Debug, Clone)]
pub struct SyncEngineSettings {
    pub poll_interval: Duration,
    pub echo_ttl: Duration,
    pub kinds: Vec<ClipKind>,
}

impl Default for SyncEngineSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            echo_ttl: Duration::from_secs(2),
            kinds: ClipKind::ALL.to_vec(),
        }
    }
}

pub struct SyncEngine {
    local_clipboard: Arc<dyn LocalClipboardPort>,
    outbound: Arc<SyncOutboundClipboardUseCase>,
    inbound: Arc<SyncInboundClipboardUseCase>,
    settings: SyncEngineSettings,
}

/// Running engine. Dropping it does not stop the loops; cancel the token
/// or call [`SyncEngineHandle::shutdown`].
pub struct SyncEngineHandle {
    cancel: CancellationToken,
    push_task: JoinHandle<()>,
    pull_task: JoinHandle<()>,
}

impl SyncEngine {
    pub fn new(deps: SyncEngineDeps, settings: SyncEngineSettings) -> Self {
        let state = SharedSyncState::new(settings.echo_ttl);
        let outbound = Arc::new(SyncOutboundClipboardUseCase::new(
            deps.transport.clone(),
            deps.clock,
            state.clone(),
        ));
        let inbound = Arc::new(SyncInboundClipboardUseCase::new(
            deps.local_clipboard.clone(),
            deps.transport,
            deps.image_normalizer,
            state,
        ));

        Self {
            local_clipboard: deps.local_clipboard,
            outbound,
            inbound,
            settings,
        }
    }

    /// Subscribes to the clipboard and spawns both loops.
    ///
    /// Failing to subscribe is the one fatal error: without clipboard
    /// access there is nothing to synchronize.
    pub fn start(self, cancel: CancellationToken) -> Result<SyncEngineHandle, ClipboardAccessError> {
        let mut text_watch = None;
        let mut image_watch = None;
        for kind in &self.settings.kinds {
            let watch = self.local_clipboard.watch(*kind)?;
            match kind {
                ClipKind::Text => text_watch = Some(watch),
                ClipKind::Image => image_watch = Some(watch),
            }
        }

        info!(
            kinds = ?self.settings.kinds,
            poll_interval_ms = self.settings.poll_interval.as_millis() as u64,
            "Starting clipboard sync engine"
        );

        let push_task = tokio::spawn(push_loop(
            self.outbound,
            text_watch,
            image_watch,
            cancel.clone(),
        ));
        let pull_task = tokio::spawn(pull_loop(
            self.inbound,
            self.settings.poll_interval,
            cancel.clone(),
        ));

        Ok(SyncEngineHandle {
            cancel,
            push_task,
            pull_task,
        })
    }
}

impl SyncEngineHandle {
    /// Waits for both loops to finish without cancelling them.
    pub async fn join(self) {
        for (name, task) in [("push", self.push_task), ("pull", self.pull_task)] {
            if let Err(err) = task.await {
                warn!(loop_name = name, error = %err, "Sync loop ended abnormally");
            }
        }
    }

    pub async fn shutdown(self) {
        self.cancel.cancel();
        self.join().await;
        info!("Clipboard sync engine stopped");
    }
}

async fn push_loop(
    outbound: Arc<SyncOutboundClipboardUseCase>,
    mut text_watch: Option<ClipboardWatch>,
    mut image_watch: Option<ClipboardWatch>,
    cancel: CancellationToken,
) {
    loop {
        if text_watch.is_none() && image_watch.is_none() {
            debug!("No clipboard watches left, push loop idle until cancelled");
            cancel.cancelled().await;
            break;
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            event = next_event(&mut text_watch) => match event {
                Some(payload) => {
                    outbound.execute(ClipKind::Text, payload).await;
                }
                None => close_watch(&mut text_watch),
            },
            event = next_event(&mut image_watch) => match event {
                Some(payload) => {
                    outbound.execute(ClipKind::Image, payload).await;
                }
                None => close_watch(&mut image_watch),
            },
        }
    }
    debug!("Push loop stopped");
    // Watches drop here, stopping the OS watchers.
}

fn close_watch(watch: &mut Option<ClipboardWatch>) {
    if let Some(closed) = watch.take() {
        warn!(kind = %closed.kind(), "Clipboard watch closed");
    }
}

async fn next_event(watch: &mut Option<ClipboardWatch>) -> Option<Vec<u8>> {
    match watch {
        Some(watch) => watch.next().await,
        None => std::future::pending().await,
    }
}

async fn pull_loop(
    inbound: Arc<SyncInboundClipboardUseCase>,
    poll_interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let outcome = inbound.execute().await;
                tracing::trace!(?outcome, "Pull tick finished");
            }
        }
    }
    debug!("Pull loop stopped");
}
