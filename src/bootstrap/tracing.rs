//! Tracing configuration for wclip
//!
//! Stdout always; a daily-rotated file under the user data directory when
//! it can be created. `RUST_LOG` overrides the default filter.

use std::path::PathBuf;
use std::{fs, io, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        // Per-request connection chatter from the HTTP stack.
        "hyper=info".to_string(),
        "hyper_util=info".to_string(),
        "reqwest=info".to_string(),
        "tower_http=info".to_string(),
    ]
}

/// Initialize the global subscriber. `log_name` is the file prefix, one per
/// subcommand so an agent and a relay on one machine do not interleave.
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(log_name: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(is_development()).join(",")));

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stdout));

    let file_layer = match build_file_writer(log_name) {
        Ok(writer) => Some(
            fmt::layer()
                .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        ),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
    };

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn logs_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("No local data directory on this platform"))?;
    Ok(base.join("wclip").join("logs"))
}

fn build_file_writer(log_name: &str) -> anyhow::Result<NonBlocking> {
    let dir = logs_dir()?;
    fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::daily(&dir, format!("{log_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
