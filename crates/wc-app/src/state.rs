use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use wc_core::SyncState;

/// The one lock the push and pull paths share.
///
/// Guards are short-lived and never cross an `.await`.
#[derive(Debug, Clone)]
pub struct SharedSyncState(Arc<Mutex<SyncState>>);

impl SharedSyncState {
    pub fn new(echo_ttl: Duration) -> Self {
        Self(Arc::new(Mutex::new(SyncState::new(echo_ttl))))
    }

    pub fn lock(&self) -> MutexGuard<'_, SyncState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn last_applied_timestamp(&self) -> i64 {
        self.lock().last_applied_timestamp()
    }
}
