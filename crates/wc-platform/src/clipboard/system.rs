use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use clipboard_rs::common::RustImage;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat, RustImageData};
use tracing::debug;
use wc_core::ports::{ClipboardWatch, LocalClipboardPort};
use wc_core::{ClipKind, ClipboardAccessError};

use super::watcher;

pub(crate) type SharedContext = Arc<Mutex<ClipboardContext>>;

/// The desktop clipboard, via clipboard-rs.
pub struct SystemClipboard {
    inner: SharedContext,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardAccessError> {
        let context = ClipboardContext::new().map_err(|e| {
            ClipboardAccessError::Unavailable(format!("failed to create clipboard context: {e}"))
        })?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

impl LocalClipboardPort for SystemClipboard {
    fn watch(&self, kind: ClipKind) -> Result<ClipboardWatch, ClipboardAccessError> {
        watcher::spawn(kind, self.inner.clone())
    }

    fn read(&self, kind: ClipKind) -> Result<Option<Vec<u8>>, ClipboardAccessError> {
        read_kind(&lock(&self.inner), kind)
    }

    fn write(&self, kind: ClipKind, payload: &[u8]) -> Result<(), ClipboardAccessError> {
        let ctx = lock(&self.inner);
        match kind {
            ClipKind::Text => {
                let text = String::from_utf8(payload.to_vec())
                    .map_err(|e| ClipboardAccessError::Write(format!("text is not utf-8: {e}")))?;
                ctx.set_text(text)
                    .map_err(|e| ClipboardAccessError::Write(e.to_string()))
            }
            ClipKind::Image => {
                let image = RustImageData::from_bytes(payload).map_err(|e| {
                    ClipboardAccessError::Write(format!("failed to load image: {e}"))
                })?;
                ctx.set_image(image)
                    .map_err(|e| ClipboardAccessError::Write(e.to_string()))
            }
        }?;
        debug!(kind = %kind, bytes = payload.len(), "Wrote system clipboard");
        Ok(())
    }
}

pub(crate) fn lock(ctx: &SharedContext) -> MutexGuard<'_, ClipboardContext> {
    ctx.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Current payload of `kind`; images come back PNG-encoded.
pub(crate) fn read_kind(
    ctx: &ClipboardContext,
    kind: ClipKind,
) -> Result<Option<Vec<u8>>, ClipboardAccessError> {
    match kind {
        ClipKind::Text => {
            if !ctx.has(ContentFormat::Text) {
                return Ok(None);
            }
            let text = ctx
                .get_text()
                .map_err(|e| ClipboardAccessError::Read(e.to_string()))?;
            Ok(Some(text.into_bytes()))
        }
        ClipKind::Image => {
            if !ctx.has(ContentFormat::Image) {
                return Ok(None);
            }
            let image = ctx
                .get_image()
                .map_err(|e| ClipboardAccessError::Read(e.to_string()))?;
            let png = image
                .to_png()
                .map_err(|e| ClipboardAccessError::Read(format!("failed to convert to png: {e}")))?;
            Ok(Some(png.get_bytes().to_vec()))
        }
    }
}
