//! # wc-core
//!
//! Core domain models and sync rules for wclip.
//!
//! This crate contains the shared clipboard snapshot, the wire adapter used
//! by both the relay and the agents, the echo-suppression state machine and
//! the ports implemented by the infrastructure crates. It performs no I/O.

pub mod clipboard;
pub mod config;
pub mod errors;
pub mod ports;
pub mod protocol;
pub mod sync;

// Re-export commonly used types at the crate root
pub use clipboard::{ClipKind, ClipSnapshot, OriginPlatform};
pub use config::{AgentConfig, AppConfig, RelayConfig};
pub use errors::{ClipboardAccessError, DecodeError, TransportError};
pub use protocol::{WireFormat, WireSnapshot};
pub use sync::{EchoGuard, EchoState, SyncState};
