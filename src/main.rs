//! goup - Go binary upgrade checker CLI tool
//!
//! Reports which installed Go binaries have a newer version on the module
//! proxy, and how to install it.

use clap::Parser;
use colored::Colorize;
use goup::cli::CliArgs;
use goup::config::{Config, Environment};
use goup::orchestrator::Orchestrator;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `GOUP_LOG` when set
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "goup=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("GOUP_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = Config::resolve(&args, &Environment::from_process())?;

    if args.verbose {
        eprintln!("goup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Proxy: {}", config.registry_url);
    }
    debug!(?config, "resolved configuration");

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let orchestrator = Orchestrator::new(config, cancel)?;

    let mut stdout = io::stdout().lock();
    // stderr stays unlocked so the spinner can draw
    let mut stderr = io::stderr();
    let summary = orchestrator
        .run(&args.paths, &mut stdout, &mut stderr)
        .await?;
    stdout.flush()?;

    if args.verbose {
        eprintln!(
            "Checked {} files: {} upgradeable, {} errors",
            summary.checked, summary.upgradeable, summary.errors
        );
    }

    Ok(())
}
