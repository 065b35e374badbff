//! wclip application orchestration layer
//!
//! This crate contains the sync use cases and the engine that runs them.

pub mod engine;
pub mod state;
pub mod usecases;

pub use engine::{SyncEngine, SyncEngineDeps, SyncEngineHandle, SyncEngineSettings};
pub use state::SharedSyncState;
