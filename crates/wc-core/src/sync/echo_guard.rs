use std::time::{Duration, Instant};

use crate::clipboard::ClipKind;

/// Per-kind echo state.
///
/// ```text
/// Idle ──arm──→ AwaitingEcho ──next watch event / disarm / expiry──→ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoState {
    Idle,
    AwaitingEcho { expires_at: Instant },
}

/// Single-slot guard against re-pushing our own clipboard writes.
///
/// Armed right before the agent writes a remote value to the local
/// clipboard; the next watch event of the same kind is then treated as the
/// echo of that write and discarded. There is one slot per kind, and a slot
/// lapses after `ttl` so a write the OS never reported cannot swallow a
/// later user edit.
///
/// Limitation: a genuine edit that lands between the write and its echo is
/// indistinguishable from the echo and is dropped.
#[derive(Debug, Clone)]
pub struct EchoGuard {
    ttl: Duration,
    text: EchoState,
    image: EchoState,
}

impl EchoGuard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            text: EchoState::Idle,
            image: EchoState::Idle,
        }
    }

    pub fn state(&self, kind: ClipKind) -> EchoState {
        match kind {
            ClipKind::Text => self.text,
            ClipKind::Image => self.image,
        }
    }

    pub fn arm(&mut self, kind: ClipKind, now: Instant) {
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        *self.slot_mut(kind) = EchoState::AwaitingEcho { expires_at };
    }

    pub fn disarm(&mut self, kind: ClipKind) {
        *self.slot_mut(kind) = EchoState::Idle;
    }

    /// Clears the slot for `kind` and reports whether the event that
    /// triggered the call is our own echo.
    pub fn consume(&mut self, kind: ClipKind, now: Instant) -> bool {
        match std::mem::replace(self.slot_mut(kind), EchoState::Idle) {
            EchoState::AwaitingEcho { expires_at } => now <= expires_at,
            EchoState::Idle => false,
        }
    }

    fn slot_mut(&mut self, kind: ClipKind) -> &mut EchoState {
        match kind {
            ClipKind::Text => &mut self.text,
            ClipKind::Image => &mut self.image,
        }
    }
}
