use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use wc_core::ports::{ClipboardWatch, LocalClipboardPort};
use wc_core::{ClipKind, ClipboardAccessError};

const WATCH_BUFFER: usize = 32;

/// Process-local clipboard.
///
/// Behaves like an OS clipboard from the engine's point of view: every
/// write, including the engine's own, is reported to the watchers of that
/// kind. Serves as the clipboard double in the engine and relay tests.
#[derive(Default)]
pub struct InMemoryClipboard {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    values: HashMap<ClipKind, Vec<u8>>,
    watchers: HashMap<ClipKind, Vec<mpsc::Sender<Vec<u8>>>>,
    writes: Vec<(ClipKind, Vec<u8>)>,
    fail_writes: bool,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(kind: ClipKind, payload: impl Into<Vec<u8>>) -> Self {
        let clipboard = Self::new();
        clipboard.lock().values.insert(kind, payload.into());
        clipboard
    }

    /// Simulates a user copying `payload`: stores it and notifies watchers.
    /// Not recorded as an engine write.
    pub fn user_copy(&self, kind: ClipKind, payload: impl Into<Vec<u8>>) {
        let payload = payload.into();
        let mut inner = self.lock();
        inner.values.insert(kind, payload.clone());
        inner.notify(kind, payload);
    }

    /// Payloads passed to [`LocalClipboardPort::write`], in call order.
    pub fn writes(&self) -> Vec<(ClipKind, Vec<u8>)> {
        self.lock().writes.clone()
    }

    pub fn current(&self, kind: ClipKind) -> Option<Vec<u8>> {
        self.lock().values.get(&kind).cloned()
    }

    /// Makes subsequent writes fail, as if the OS denied access.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn notify(&mut self, kind: ClipKind, payload: Vec<u8>) {
        if let Some(senders) = self.watchers.get_mut(&kind) {
            senders.retain(|tx| match tx.try_send(payload.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::debug!(kind = %kind, "Watcher lagging, dropping clipboard event");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            });
        }
    }
}

impl LocalClipboardPort for InMemoryClipboard {
    fn watch(&self, kind: ClipKind) -> Result<ClipboardWatch, ClipboardAccessError> {
        let (tx, rx) = mpsc::channel(WATCH_BUFFER);
        self.lock().watchers.entry(kind).or_default().push(tx);
        Ok(ClipboardWatch::new(kind, rx))
    }

    fn read(&self, kind: ClipKind) -> Result<Option<Vec<u8>>, ClipboardAccessError> {
        Ok(self.current(kind))
    }

    fn write(&self, kind: ClipKind, payload: &[u8]) -> Result<(), ClipboardAccessError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(ClipboardAccessError::Write(
                "in-memory clipboard configured to fail".to_string(),
            ));
        }
        inner.values.insert(kind, payload.to_vec());
        inner.writes.push((kind, payload.to_vec()));
        inner.notify(kind, payload.to_vec());
        Ok(())
    }
}
