//! # wc-network
//!
//! HTTP transport between an agent and the relay.

mod http_transport;

pub use http_transport::{clip_endpoint, HttpSyncTransport};
