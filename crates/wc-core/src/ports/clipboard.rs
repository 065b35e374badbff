//! Clipboard port - abstracts local clipboard access
//!
//! This port defines the interface for reading, writing and watching the
//! OS clipboard, one content kind at a time.

use tokio::sync::mpsc;

use crate::clipboard::ClipKind;
use crate::errors::ClipboardAccessError;

/// Live subscription to local clipboard changes of one kind.
///
/// Each element is the full clipboard payload right after a change. The
/// sequence is lazy and never restarts: a new subscription only sees future
/// changes. Dropping the subscription stops the underlying watcher.
pub struct ClipboardWatch {
    kind: ClipKind,
    events: mpsc::Receiver<Vec<u8>>,
    stop: Option<Box<dyn FnOnce() + Send>>,
}

impl ClipboardWatch {
    pub fn new(kind: ClipKind, events: mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            kind,
            events,
            stop: None,
        }
    }

    /// Registers the action that tears the OS watcher down.
    pub fn with_stop(mut self, stop: impl FnOnce() + Send + 'static) -> Self {
        self.stop = Some(Box::new(stop));
        self
    }

    pub fn kind(&self) -> ClipKind {
        self.kind
    }

    /// Next changed payload, or `None` once the watcher has gone away.
    pub async fn next(&mut self) -> Option<Vec<u8>> {
        self.events.recv().await
    }
}

impl Drop for ClipboardWatch {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl std::fmt::Debug for ClipboardWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardWatch")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Platform-agnostic access to the local clipboard.
pub trait LocalClipboardPort: Send + Sync {
    /// Subscribe to changes of `kind`.
    fn watch(&self, kind: ClipKind) -> Result<ClipboardWatch, ClipboardAccessError>;

    /// Current payload for `kind`, `None` when the clipboard holds none.
    fn read(&self, kind: ClipKind) -> Result<Option<Vec<u8>>, ClipboardAccessError>;

    /// Replace the clipboard with `payload`.
    ///
    /// This usually triggers a watch event of its own.
    fn write(&self, kind: ClipKind, payload: &[u8]) -> Result<(), ClipboardAccessError>;
}
