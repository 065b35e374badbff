use std::time::{Duration, Instant};

use super::EchoGuard;
use crate::clipboard::ClipKind;

/// State shared by an agent's push and pull loops.
///
/// Callers keep it behind a single lock and hold that lock only for one
/// read-modify-write, never across network or clipboard I/O.
#[derive(Debug, Clone)]
pub struct SyncState {
    last_applied_timestamp: i64,
    echo: EchoGuard,
}

impl SyncState {
    pub fn new(echo_ttl: Duration) -> Self {
        Self {
            last_applied_timestamp: 0,
            echo: EchoGuard::new(echo_ttl),
        }
    }

    pub fn last_applied_timestamp(&self) -> i64 {
        self.last_applied_timestamp
    }

    pub fn echo(&self) -> &EchoGuard {
        &self.echo
    }

    /// Whether a remote snapshot stamped `timestamp` carries new
    /// information. Ties count as already seen.
    pub fn is_newer(&self, timestamp: i64) -> bool {
        timestamp > self.last_applied_timestamp
    }

    /// Consumes a pending echo for `kind`, see [`EchoGuard::consume`].
    pub fn take_echo(&mut self, kind: ClipKind, now: Instant) -> bool {
        self.echo.consume(kind, now)
    }

    /// Picks the timestamp of an outgoing push and moves the cursor to it.
    ///
    /// The stamp never goes backwards, so two pushes within one clock second
    /// still strictly increase.
    pub fn stamp_push(&mut self, now_secs: i64) -> i64 {
        let stamp = now_secs.max(self.last_applied_timestamp.saturating_add(1));
        self.last_applied_timestamp = stamp;
        stamp
    }

    /// Records a remote snapshot that needed no local write.
    pub fn mark_seen(&mut self, timestamp: i64) {
        self.last_applied_timestamp = self.last_applied_timestamp.max(timestamp);
    }

    /// Transition to `AwaitingEcho` for `kind` and adopt `timestamp`.
    ///
    /// Returns `false` without touching anything when the other loop moved
    /// the cursor past `timestamp` in the meantime.
    pub fn begin_remote_apply(&mut self, kind: ClipKind, timestamp: i64, now: Instant) -> bool {
        if !self.is_newer(timestamp) {
            return false;
        }
        self.echo.arm(kind, now);
        self.last_applied_timestamp = timestamp;
        true
    }

    /// Undo the echo slot after the local write failed.
    pub fn abort_remote_apply(&mut self, kind: ClipKind) {
        self.echo.disarm(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::EchoState;

    #[test]
    fn stamps_strictly_increase_within_one_second() {
        let mut state = SyncState::new(Duration::from_secs(1));
        let first = state.stamp_push(100);
        let second = state.stamp_push(100);

        assert_eq!(first, 100);
        assert_eq!(second, 101);
        assert!(!state.is_newer(101));
    }

    #[test]
    fn ties_are_not_new() {
        let mut state = SyncState::new(Duration::from_secs(1));
        state.mark_seen(50);

        assert!(!state.is_newer(50));
        assert!(!state.is_newer(49));
        assert!(state.is_newer(51));
    }

    #[test]
    fn remote_apply_arms_echo_and_moves_cursor() {
        let now = Instant::now();
        let mut state = SyncState::new(Duration::from_secs(1));

        assert!(state.begin_remote_apply(ClipKind::Text, 10, now));
        assert_eq!(state.last_applied_timestamp(), 10);
        assert!(matches!(
            state.echo().state(ClipKind::Text),
            EchoState::AwaitingEcho { .. }
        ));
        assert!(state.take_echo(ClipKind::Text, now));
    }

    #[test]
    fn remote_apply_loses_to_a_newer_local_push() {
        let now = Instant::now();
        let mut state = SyncState::new(Duration::from_secs(1));
        state.stamp_push(20);

        assert!(!state.begin_remote_apply(ClipKind::Text, 15, now));
        assert_eq!(state.echo().state(ClipKind::Text), EchoState::Idle);
        assert_eq!(state.last_applied_timestamp(), 20);
    }

    #[test]
    fn mark_seen_never_rewinds() {
        let mut state = SyncState::new(Duration::from_secs(1));
        state.mark_seen(30);
        state.mark_seen(10);
        assert_eq!(state.last_applied_timestamp(), 30);
    }
}
