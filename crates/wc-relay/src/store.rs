use std::sync::{PoisonError, RwLock};

use thiserror::Error;
use wc_core::ClipSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("snapshot content is empty")]
    EmptyContent,

    #[error("snapshot timestamp {candidate} is not newer than stored {stored}")]
    Stale { stored: i64, candidate: i64 },
}

/// Holder of the one shared snapshot.
///
/// Every read copies out and every write copies in under the lock, so a
/// reader never observes a partially replaced snapshot.
#[derive(Debug, Default)]
pub struct RelayStore {
    current: RwLock<ClipSnapshot>,
    reject_stale: bool,
}

impl RelayStore {
    pub fn new(reject_stale: bool) -> Self {
        Self {
            current: RwLock::default(),
            reject_stale,
        }
    }

    /// Current snapshot; the zero value until the first accepted push.
    pub fn get(&self) -> ClipSnapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the stored snapshot, keeping its timestamp as sent.
    pub fn put(&self, candidate: ClipSnapshot) -> Result<(), RejectReason> {
        self.put_stamped(candidate, 0).map(|_| ())
    }

    /// Replaces the stored snapshot, stamping it first when it carries no
    /// usable timestamp (zero or negative).
    ///
    /// The stamp is `max(now, stored + 1)`, taken under the write lock, so a
    /// relay-stamped value always sorts after the one it replaces even when
    /// agents have pushed timestamps ahead of the relay's clock. Returns the
    /// timestamp that was stored.
    pub fn put_stamped(&self, mut candidate: ClipSnapshot, now: i64) -> Result<i64, RejectReason> {
        if candidate.is_blank() {
            return Err(RejectReason::EmptyContent);
        }

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if candidate.timestamp <= 0 && now > 0 {
            candidate.timestamp = now.max(current.timestamp.saturating_add(1));
        }
        if self.reject_stale && candidate.timestamp <= current.timestamp {
            return Err(RejectReason::Stale {
                stored: current.timestamp,
                candidate: candidate.timestamp,
            });
        }
        let stored = candidate.timestamp;
        *current = candidate;
        Ok(stored)
    }
}
