use clipboard_rs::{ClipboardHandler, ClipboardWatcher, ClipboardWatcherContext};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use wc_core::ports::ClipboardWatch;
use wc_core::{ClipKind, ClipboardAccessError};

use super::system::{lock, read_kind, SharedContext};

const WATCH_BUFFER: usize = 32;

/// Forwards clipboard changes of one kind.
///
/// The OS notifies on every change regardless of format, so the handler
/// re-reads its kind and drops notifications whose payload did not change.
struct KindChangeHandler {
    kind: ClipKind,
    ctx: SharedContext,
    last: Option<Vec<u8>>,
    events: mpsc::Sender<Vec<u8>>,
}

impl ClipboardHandler for KindChangeHandler {
    fn on_clipboard_change(&mut self) {
        let payload = match read_kind(&lock(&self.ctx), self.kind) {
            Ok(Some(payload)) => payload,
            Ok(None) => return,
            Err(e) => {
                warn!(kind = %self.kind, error = %e, "Failed to read clipboard after change");
                return;
            }
        };

        if self.last.as_deref() == Some(payload.as_slice()) {
            return;
        }
        self.last = Some(payload.clone());

        if let Err(mpsc::error::TrySendError::Full(_)) = self.events.try_send(payload) {
            debug!(kind = %self.kind, "Clipboard event buffer full, dropping change");
        }
    }
}

/// Starts an OS watcher thread for `kind`. Dropping the returned
/// subscription shuts the thread down.
pub(crate) fn spawn(kind: ClipKind, ctx: SharedContext) -> Result<ClipboardWatch, ClipboardAccessError> {
    let mut watcher_ctx = ClipboardWatcherContext::new()
        .map_err(|e| ClipboardAccessError::Watch(format!("failed to create watcher context: {e}")))?;

    let last = read_kind(&lock(&ctx), kind).unwrap_or_default();
    let (tx, rx) = mpsc::channel(WATCH_BUFFER);
    let handler = KindChangeHandler {
        kind,
        ctx,
        last,
        events: tx,
    };
    let shutdown = watcher_ctx.add_handler(handler).get_shutdown_channel();

    std::thread::Builder::new()
        .name(format!("clipboard-watch-{}", kind_label(kind)))
        .spawn(move || {
            info!(kind = %kind, "Clipboard watch started");
            watcher_ctx.start_watch();
            info!(kind = %kind, "Clipboard watch stopped");
        })
        .map_err(|e| ClipboardAccessError::Watch(format!("failed to spawn watcher thread: {e}")))?;

    Ok(ClipboardWatch::new(kind, rx).with_stop(move || shutdown.stop()))
}

fn kind_label(kind: ClipKind) -> &'static str {
    match kind {
        ClipKind::Text => "text",
        ClipKind::Image => "image",
    }
}
