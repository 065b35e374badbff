//! # wc-relay
//!
//! The relay holds exactly one clipboard snapshot and serves it over HTTP
//! to every agent. Last writer wins; nothing is persisted.
//!
//! The relay trusts its network. Requests are neither authenticated nor rate
//! limited, so any peer that can reach the listener can read the current
//! clipboard or replace it. Run it on a LAN or behind something that enforces
//! access control.

mod error;
mod routes;
mod server;
mod store;

pub use error::RelayError;
pub use routes::{router, RelayState};
pub use server::RelayServer;
pub use store::{RejectReason, RelayStore};
