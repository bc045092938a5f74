//! Vigil CLI - Fleet latency dashboard in the terminal
//!
//! Usage:
//!   vigil dashboard [--tab NAME]   Interactive dashboard
//!   vigil show [--tab NAME]        Render one tab and exit
//!   vigil tabs                     List the tabs the backend reports

mod api;
mod commands;
mod config;
mod dashboard;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "vigil")]
#[command(author = "Vigil Team")]
#[command(version)]
#[command(about = "Terminal dashboard for monitored nodes and endpoint latency", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Metrics backend URL (overrides the config file)
    #[arg(long, global = true, env = "VIGIL_SERVER_URL")]
    server: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    Dashboard {
        /// Tab to show first (defaults to the configured default tab)
        #[arg(short, long)]
        tab: Option<String>,

        /// Hide the per-node HTTP status popup
        #[arg(long)]
        no_popup: bool,
    },

    /// Render one tab to stdout and exit
    Show {
        /// Tab to render (defaults to the configured default tab)
        #[arg(short, long)]
        tab: Option<String>,

        /// Print the rendered view as JSON
        #[arg(long)]
        json: bool,

        /// Hide the per-node HTTP status popup
        #[arg(long)]
        no_popup: bool,
    },

    /// List the tabs reported by the backend
    Tabs,
}

/// Filter used when `RUST_LOG` is not set
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn,vigil_cli=info"
    }
}

fn init_logging(verbose: bool, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    if to_file {
        // The TUI owns the terminal, so logs go to a file instead
        config::ensure_dirs()?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(config::log_file())
            .context("Failed to open log file")?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, matches!(cli.command, Commands::Dashboard { .. }))?;

    let config = config::Config::load()?.with_server(cli.server);

    // Handle commands
    match cli.command {
        Commands::Dashboard { tab, no_popup } => {
            commands::dashboard::run(config, tab, no_popup).await?;
        }

        Commands::Show {
            tab,
            json,
            no_popup,
        } => {
            commands::show::run(config, tab, json, no_popup).await?;
        }

        Commands::Tabs => {
            commands::tabs::run(config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn with_filter<T>(filter: &str, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(EnvFilter::new(filter));
        tracing::subscriber::with_default(subscriber, f)
    }

    #[test]
    fn test_verbose_enables_own_debug_logs() {
        with_filter(default_filter(true), || {
            assert!(tracing::enabled!(target: "vigil_cli::dashboard", Level::DEBUG));
            assert!(tracing::enabled!(target: "reqwest", Level::DEBUG));
        });
    }

    #[test]
    fn test_quiet_filter() {
        with_filter(default_filter(false), || {
            assert!(tracing::enabled!(target: "vigil_cli::api", Level::INFO));
            assert!(!tracing::enabled!(target: "vigil_cli::api", Level::DEBUG));
            assert!(!tracing::enabled!(target: "reqwest", Level::INFO));
        });
    }
}
