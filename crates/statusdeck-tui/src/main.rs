//! `statusdeck-tui`: live terminal view of servers, status checks, and the
//! backend request counter.
//!
//! Logs go to a file so they never corrupt the terminal. A background data
//! bridge forwards every view change from `statusdeck-core` into the TUI
//! action loop.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod input;
mod panels;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use statusdeck_core::SyncClient;

use crate::app::App;

const DEFAULT_LOG_NAME: &str = "statusdeck-tui.log";

/// Terminal dashboard for the server status checker backend.
#[derive(Parser, Debug)]
#[command(name = "statusdeck-tui", version, about)]
struct Cli {
    /// Log file path (defaults to tui.log_file from config, then the temp dir)
    #[arg(long, env = "STATUSDECK_TUI_LOG")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Directives used when `RUST_LOG` is unset: every statusdeck crate at
/// the same level.
fn default_filter(log_level: &str) -> String {
    format!("statusdeck_tui={log_level},statusdeck_core={log_level},statusdeck_api={log_level}")
}

/// File-only tracing. The returned guard must live until exit so buffered
/// lines are flushed.
fn setup_tracing(log_file: &std::path::Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    let log_dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new(DEFAULT_LOG_NAME));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first so a panic during terminal setup still restores it
    tui::install_hooks()?;

    let cfg = statusdeck_config::load_config_or_default();

    // Priority: flag > config file > temp dir
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| cfg.tui.log_file.clone())
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_NAME));
    let _log_guard = setup_tracing(&log_file, cli.verbose);

    info!(
        log_file = %log_file.display(),
        tick_ms = cfg.tui.tick_ms,
        "starting statusdeck-tui"
    );

    let client = SyncClient::localhost(&cfg.transport())?;
    let mut app = App::new(client, cfg.tick_rate());
    app.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_api_crate() {
        let filter = default_filter("debug");
        for target in ["statusdeck_tui", "statusdeck_core", "statusdeck_api"] {
            assert!(filter.contains(&format!("{target}=debug")), "{filter}");
        }
    }
}
