//! wclip process layer
//!
//! Command line parsing and the bootstrap code that turns a configuration
//! into a running agent or relay.

pub mod bootstrap;
pub mod cli;
