// selectkit demo - compound selection component in a terminal
//
// The binary is the "owning application" of the component: it builds a
// SelectionContainer from config, renders it, routes mouse clicks into it,
// and reacts to the container's change callback with a toast.
//
// Architecture:
// - CLI (clap): `config` subcommands and the headless `script` mode
// - Logging (tracing): TUI log capture, stderr in headless mode, optional JSON files
// - Demo (ratatui + crossterm): interactive event loop on a current-thread runtime

mod cli;
mod demo;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use selectkit::config::{Config, LogRotation};
use selectkit::logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands run before logging is set up
    if cli::handle_cli(&cli)? {
        return Ok(());
    }

    let config = Config::from_env()?;

    // TUI mode captures logs to a buffer; headless mode writes to stderr
    let tui = cli.command.is_none();
    let log_buffer = LogBuffer::new();
    let _file_guard = init_logging(&config, tui, &log_buffer);

    // Ensure config template exists (helps users discover options)
    // Runs after logging is installed so a failed write is reported
    Config::ensure_config_exists();

    tracing::debug!(version = selectkit::config::VERSION, tui, "Starting selectkit");

    match cli.command {
        Some(Commands::Script { ids }) => demo::script::run(&config, &ids),
        Some(Commands::Config { .. }) => Ok(()),
        None => demo::run_tui(config, log_buffer).await,
    }
}

/// Initialize tracing
///
/// Precedence: RUST_LOG env var > config file > default "info".
/// The returned guard must be kept alive so file logs flush.
fn init_logging(
    config: &Config,
    tui: bool,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("selectkit={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = tui.then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer = (!tui).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    // Set up file logging if enabled (non-blocking writer with rotation)
    let mut guard = None;
    let file_layer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };
                let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
                guard = Some(file_guard);

                // File layer uses JSON format for structured log parsing
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
