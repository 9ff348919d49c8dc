//! Binary entry point for newsdedup.
//!
//! Wires configuration, the backend client, and the dedup engine
//! together, then hands control to the supervising monitor loop.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Allow print_stderr in main binary for pre-logging failures
#![allow(clippy::print_stderr)]

use anyhow::Context;
use clap::Parser;
use newsdedup::config::DEFAULT_CONFIG_FILE;
use newsdedup::observability::{self, LogOptions};
use newsdedup::{Config, DedupEngine, TtRssClient, supervise};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Dedups RSS articles handled by Tiny Tiny RSS.
#[derive(Parser)]
#[command(name = "newsdedup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(value_name = "CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config_file: PathBuf,

    /// Debug output (separate from verbose).
    #[arg(short, long)]
    debug: bool,

    /// Run as daemon: omit timestamp prefixes from output.
    #[arg(short = 'D', long)]
    daemon: bool,

    /// Quiet: suppress backend transport warnings.
    #[arg(short, long)]
    quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Don't actually mark any articles as read.
    #[arg(short = 'n', long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = observability::init(LogOptions {
        debug: cli.debug,
        verbose: cli.verbose,
        quiet: cli.quiet,
        daemon: cli.daemon,
    }) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = match Config::load(&cli.config_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    match run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            ExitCode::FAILURE
        },
    }
}

/// Connects, learns, and monitors until interrupted.
fn run(cli: &Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let client = TtRssClient::connect(&config.connection).context("backend login failed")?;

    let mut engine = DedupEngine::new(client, &config.dedup, cli.dry_run);
    if cli.dry_run {
        tracing::info!("dry-run mode: no articles will be marked as read");
    }

    let learned = engine.learn().context("bootstrap learn phase failed")?;
    tracing::info!(learned, "learned titles from already-read articles");

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("failed to install interrupt handler")?;

    supervise(
        &mut engine,
        Duration::from_secs(config.dedup.sleep),
        &shutdown,
    );

    // Only an interrupt ends the loop; exit non-zero by design.
    Ok(ExitCode::from(1))
}
