use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wc_core::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "wclip", version, about = "Cross-device clipboard sync through a tiny HTTP relay")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Keep this device's clipboard in sync with a relay
    Agent {
        /// Configuration file (defaults to the per-user config directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Relay address, overriding `agent.relay_url`
        #[arg(long)]
        relay_url: Option<String>,
    },

    /// Hold the shared clipboard value for every agent
    Relay {
        /// Configuration file (defaults to the per-user config directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen address, overriding `relay.listen`
        #[arg(long)]
        listen: Option<String>,
    },
}

impl Command {
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Agent { config, .. } | Command::Relay { config, .. } => config.as_ref(),
        }
    }

    /// Applies command line overrides on top of the loaded file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        match self {
            Command::Agent {
                relay_url: Some(url),
                ..
            } => config.agent.relay_url = url.clone(),
            Command::Relay {
                listen: Some(listen),
                ..
            } => config.relay.listen = listen.clone(),
            _ => {}
        }
    }
}
