//! # Bootstrap
//!
//! Loads configuration, initialises tracing and wires the adapter crates
//! into a runnable agent or relay.

pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{default_config_path, load_config, resolve_config};
pub use run::{run_agent, run_relay, shutdown_signal};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{build_agent_engine, build_engine};
