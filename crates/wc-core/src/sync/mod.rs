mod echo_guard;
mod state;

pub use echo_guard::{EchoGuard, EchoState};
pub use state::SyncState;
