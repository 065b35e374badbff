use clap::Parser;
use wclip_lib::bootstrap::{
    init_tracing_subscriber, resolve_config, run_agent, run_relay, shutdown_signal,
};
use wclip_lib::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = resolve_config(cli.command.config_path().map(|p| p.as_path()))?;
    cli.command.apply_overrides(&mut config);

    match cli.command {
        Command::Agent { .. } => {
            init_tracing_subscriber("wclip-agent")?;
            run_agent(config.agent, shutdown_signal()).await
        }
        Command::Relay { .. } => {
            init_tracing_subscriber("wclip-relay")?;
            run_relay(config.relay, shutdown_signal()).await
        }
    }
}
