use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, info_span, warn};
use wc_core::clipboard::payload::{decode_remote_content, normalize_text};
use wc_core::ports::{ImageNormalizerPort, LocalClipboardPort, SyncTransportPort};
use wc_core::{ClipKind, ClipSnapshot, DecodeError};

use crate::state::SharedSyncState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundOutcome {
    /// Relay unreachable, empty, or not newer than the cursor.
    NothingNew,
    /// The local clipboard already holds this content; no write issued.
    AlreadyPresent { timestamp: i64 },
    /// A local push moved the cursor while this apply was in flight.
    Superseded,
    DecodeFailed,
    WriteFailed,
    /// The blocking apply task panicked before reporting back.
    Interrupted,
    Applied { kind: ClipKind, timestamp: i64 },
}

/// Pull loop step: fetches the relay snapshot and applies it locally when
/// it is new and different.
#[derive(Clone)]
pub struct SyncInboundClipboardUseCase {
    local_clipboard: Arc<dyn LocalClipboardPort>,
    transport: Arc<dyn SyncTransportPort>,
    image_normalizer: Arc<dyn ImageNormalizerPort>,
    state: SharedSyncState,
}

impl SyncInboundClipboardUseCase {
    pub fn new(
        local_clipboard: Arc<dyn LocalClipboardPort>,
        transport: Arc<dyn SyncTransportPort>,
        image_normalizer: Arc<dyn ImageNormalizerPort>,
        state: SharedSyncState,
    ) -> Self {
        Self {
            local_clipboard,
            transport,
            image_normalizer,
            state,
        }
    }

    /// Clipboard access and image re-encoding block, so the apply step runs
    /// on the blocking pool rather than on a runtime worker.
    pub async fn execute(&self) -> InboundOutcome {
        let snapshot = self.transport.pull_or_default().await;
        if snapshot.is_blank() || !self.state.lock().is_newer(snapshot.timestamp) {
            return InboundOutcome::NothingNew;
        }

        let usecase = self.clone();
        match tokio::task::spawn_blocking(move || usecase.apply(snapshot)).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(error = %err, "Remote apply task failed");
                InboundOutcome::Interrupted
            }
        }
    }

    /// Applies an already fetched snapshot on the calling thread.
    pub fn apply(&self, snapshot: ClipSnapshot) -> InboundOutcome {
        let span = info_span!(
            "usecase.clipboard.sync_inbound.apply",
            kind = %snapshot.mime,
            timestamp = snapshot.timestamp,
        );
        let _entered = span.enter();

        if snapshot.is_blank() || !self.state.lock().is_newer(snapshot.timestamp) {
            return InboundOutcome::NothingNew;
        }

        let kind = snapshot.mime;
        let incoming = match self.decode(&snapshot) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "Failed to decode remote snapshot");
                return InboundOutcome::DecodeFailed;
            }
        };

        let current = match self.local_clipboard.read(kind) {
            Ok(current) => current,
            Err(err) => {
                warn!(error = %err, "Failed to read local clipboard for comparison");
                None
            }
        };
        if same_content(kind, current.as_deref(), &incoming) {
            debug!("Local clipboard already holds remote content");
            self.state.lock().mark_seen(snapshot.timestamp);
            return InboundOutcome::AlreadyPresent {
                timestamp: snapshot.timestamp,
            };
        }

        if !self
            .state
            .lock()
            .begin_remote_apply(kind, snapshot.timestamp, Instant::now())
        {
            debug!("Cursor moved on during apply, dropping remote snapshot");
            return InboundOutcome::Superseded;
        }

        if let Err(err) = self.local_clipboard.write(kind, &incoming) {
            self.state.lock().abort_remote_apply(kind);
            warn!(error = %err, "Failed to write remote snapshot to local clipboard");
            return InboundOutcome::WriteFailed;
        }

        info!("Remote clipboard snapshot applied");
        InboundOutcome::Applied {
            kind,
            timestamp: snapshot.timestamp,
        }
    }

    fn decode(&self, snapshot: &ClipSnapshot) -> Result<Vec<u8>, DecodeError> {
        let raw = decode_remote_content(snapshot.mime, &snapshot.content)?;
        match snapshot.mime {
            ClipKind::Text => Ok(raw),
            ClipKind::Image => self.image_normalizer.normalize(&raw),
        }
    }
}

fn same_content(kind: ClipKind, current: Option<&[u8]>, incoming: &[u8]) -> bool {
    let Some(current) = current else {
        return false;
    };
    match kind {
        ClipKind::Text => normalize_text(current) == normalize_text(incoming),
        ClipKind::Image => current == incoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use async_trait::async_trait;
    use wc_core::ports::ClipboardWatch;
    use wc_core::{ClipboardAccessError, TransportError};
    use wc_infra::{InMemoryClipboard, PngImageNormalizer};

    struct StaticTransport(Option<ClipSnapshot>);

    #[async_trait]
    impl SyncTransportPort for StaticTransport {
        async fn pull(&self) -> Result<ClipSnapshot, TransportError> {
            self.0
                .clone()
                .ok_or_else(|| TransportError::Connect("connection refused".into()))
        }

        async fn push(&self, _snapshot: &ClipSnapshot) -> Result<(), TransportError> {
            Ok(())
        }
    }

    struct UnreadableClipboard(InMemoryClipboard);

    impl LocalClipboardPort for UnreadableClipboard {
        fn watch(&self, kind: ClipKind) -> Result<ClipboardWatch, ClipboardAccessError> {
            self.0.watch(kind)
        }

        fn read(&self, _kind: ClipKind) -> Result<Option<Vec<u8>>, ClipboardAccessError> {
            Err(ClipboardAccessError::Read("denied".into()))
        }

        fn write(&self, kind: ClipKind, payload: &[u8]) -> Result<(), ClipboardAccessError> {
            self.0.write(kind, payload)
        }
    }

    fn usecase(
        clipboard: Arc<dyn LocalClipboardPort>,
        remote: Option<ClipSnapshot>,
    ) -> (SyncInboundClipboardUseCase, SharedSyncState) {
        let state = SharedSyncState::new(Duration::from_secs(5));
        let usecase = SyncInboundClipboardUseCase::new(
            clipboard,
            Arc::new(StaticTransport(remote)),
            Arc::new(PngImageNormalizer::new()),
            state.clone(),
        );
        (usecase, state)
    }

    #[tokio::test]
    async fn applies_new_text_and_arms_echo() {
        let clipboard = Arc::new(InMemoryClipboard::new());
        let (usecase, state) = usecase(clipboard.clone(), Some(ClipSnapshot::text("hi", 10)));

        let outcome = usecase.execute().await;

        assert_eq!(
            outcome,
            InboundOutcome::Applied {
                kind: ClipKind::Text,
                timestamp: 10
            }
        );
        assert_eq!(clipboard.writes(), vec![(ClipKind::Text, b"hi".to_vec())]);
        assert_eq!(state.last_applied_timestamp(), 10);
        assert!(state.lock().take_echo(ClipKind::Text, Instant::now()));
    }

    #[tokio::test]
    async fn pulling_the_same_snapshot_twice_writes_once() {
        let clipboard = Arc::new(InMemoryClipboard::new());
        let (usecase, _state) = usecase(clipboard.clone(), Some(ClipSnapshot::text("hi", 10)));

        usecase.execute().await;
        let second = usecase.execute().await;

        assert_eq!(second, InboundOutcome::NothingNew);
        assert_eq!(clipboard.writes().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_relay_is_nothing_new() {
        let clipboard = Arc::new(InMemoryClipboard::new());
        let (usecase, state) = usecase(clipboard.clone(), None);

        assert_eq!(usecase.execute().await, InboundOutcome::NothingNew);
        assert!(clipboard.writes().is_empty());
        assert_eq!(state.last_applied_timestamp(), 0);
    }

    #[tokio::test]
    async fn stale_or_tied_timestamps_never_write() {
        let clipboard = Arc::new(InMemoryClipboard::with_content(ClipKind::Text, "local"));
        let (usecase, state) = usecase(clipboard.clone(), None);
        state.lock().mark_seen(50);

        assert_eq!(
            usecase.apply(ClipSnapshot::text("  local  ", 50)),
            InboundOutcome::NothingNew
        );
        assert_eq!(
            usecase.apply(ClipSnapshot::text("different", 49)),
            InboundOutcome::NothingNew
        );
        assert!(clipboard.writes().is_empty());
    }

    #[tokio::test]
    async fn identical_local_content_skips_the_write_but_advances_cursor() {
        let clipboard = Arc::new(InMemoryClipboard::with_content(ClipKind::Text, "same\n"));
        let (usecase, state) = usecase(clipboard.clone(), Some(ClipSnapshot::text("same", 30)));

        let outcome = usecase.execute().await;

        assert_eq!(outcome, InboundOutcome::AlreadyPresent { timestamp: 30 });
        assert!(clipboard.writes().is_empty());
        assert_eq!(state.last_applied_timestamp(), 30);
        assert!(!state.lock().take_echo(ClipKind::Text, Instant::now()));
    }

    #[tokio::test]
    async fn blank_remote_content_is_ignored() {
        let clipboard = Arc::new(InMemoryClipboard::new());
        let (usecase, _state) = usecase(clipboard.clone(), Some(ClipSnapshot::text(" \n ", 99)));

        assert_eq!(usecase.execute().await, InboundOutcome::NothingNew);
        assert!(clipboard.writes().is_empty());
    }

    #[tokio::test]
    async fn malformed_image_abandons_the_cycle() {
        let clipboard = Arc::new(InMemoryClipboard::new());
        let (usecase, state) = usecase(
            clipboard.clone(),
            Some(ClipSnapshot::new(ClipKind::Image, "%%%", 5)),
        );

        assert_eq!(usecase.execute().await, InboundOutcome::DecodeFailed);
        assert!(clipboard.writes().is_empty());
        assert_eq!(state.last_applied_timestamp(), 0);
    }

    #[tokio::test]
    async fn failed_write_disarms_the_echo_guard() {
        let clipboard = Arc::new(InMemoryClipboard::new());
        clipboard.set_fail_writes(true);
        let (usecase, state) = usecase(clipboard.clone(), Some(ClipSnapshot::text("x", 7)));

        assert_eq!(usecase.execute().await, InboundOutcome::WriteFailed);
        assert!(!state.lock().take_echo(ClipKind::Text, Instant::now()));
    }

    /// Records which threads touched the clipboard.
    struct ThreadRecordingClipboard {
        inner: InMemoryClipboard,
        threads: std::sync::Mutex<Vec<std::thread::ThreadId>>,
    }

    impl ThreadRecordingClipboard {
        fn record(&self) {
            self.threads
                .lock()
                .unwrap()
                .push(std::thread::current().id());
        }
    }

    impl LocalClipboardPort for ThreadRecordingClipboard {
        fn watch(&self, kind: ClipKind) -> Result<ClipboardWatch, ClipboardAccessError> {
            self.inner.watch(kind)
        }

        fn read(&self, kind: ClipKind) -> Result<Option<Vec<u8>>, ClipboardAccessError> {
            self.record();
            self.inner.read(kind)
        }

        fn write(&self, kind: ClipKind, payload: &[u8]) -> Result<(), ClipboardAccessError> {
            self.record();
            self.inner.write(kind, payload)
        }
    }

    #[tokio::test]
    async fn clipboard_access_stays_off_the_runtime_thread() {
        let clipboard = Arc::new(ThreadRecordingClipboard {
            inner: InMemoryClipboard::new(),
            threads: Default::default(),
        });
        let (usecase, _state) = usecase(clipboard.clone(), Some(ClipSnapshot::text("x", 3)));
        let runtime_thread = std::thread::current().id();

        assert!(matches!(
            usecase.execute().await,
            InboundOutcome::Applied { .. }
        ));

        let threads = clipboard.threads.lock().unwrap().clone();
        assert_eq!(threads.len(), 2, "one read and one write");
        assert!(threads.iter().all(|id| *id != runtime_thread));
        assert_eq!(clipboard.inner.writes().len(), 1);
    }

    #[tokio::test]
    async fn slow_clipboard_does_not_stall_other_tasks() {
        struct SlowClipboard(InMemoryClipboard);

        impl LocalClipboardPort for SlowClipboard {
            fn watch(&self, kind: ClipKind) -> Result<ClipboardWatch, ClipboardAccessError> {
                self.0.watch(kind)
            }

            fn read(&self, kind: ClipKind) -> Result<Option<Vec<u8>>, ClipboardAccessError> {
                std::thread::sleep(Duration::from_millis(200));
                self.0.read(kind)
            }

            fn write(&self, kind: ClipKind, payload: &[u8]) -> Result<(), ClipboardAccessError> {
                self.0.write(kind, payload)
            }
        }

        let clipboard = Arc::new(SlowClipboard(InMemoryClipboard::new()));
        let (usecase, _state) = usecase(clipboard, Some(ClipSnapshot::text("x", 3)));

        let ticker = tokio::spawn(async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Instant::now()
        });
        usecase.execute().await;
        let applied_at = Instant::now();

        assert!(ticker.await.unwrap() < applied_at);
    }

    #[tokio::test]
    async fn unreadable_clipboard_still_applies() {
        let inner = InMemoryClipboard::new();
        let clipboard = Arc::new(UnreadableClipboard(inner));
        let (usecase, _state) = usecase(clipboard.clone(), Some(ClipSnapshot::text("x", 7)));

        assert!(matches!(
            usecase.execute().await,
            InboundOutcome::Applied { .. }
        ));
        assert_eq!(clipboard.0.writes().len(), 1);
    }
}
