//! Maintenance tool that clears stars from articles interactively.
//!
//! Lists starred articles in batches, asks for confirmation, and clears
//! their star via the same backend connection newsdedup uses. Shares the
//! config file and client with the daemon but none of its dedup state.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Interactive tool: stdout is the user interface
#![allow(clippy::print_stdout, clippy::print_stderr)]

use anyhow::Context;
use clap::Parser;
use newsdedup::client::{HeadlinesRequest, NewsBackend};
use newsdedup::config::DEFAULT_CONFIG_FILE;
use newsdedup::observability::{self, LogOptions};
use newsdedup::{Config, TtRssClient};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Unstar tool for newsdedup.
#[derive(Parser)]
#[command(name = "unstar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(value_name = "CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config_file: PathBuf,

    /// Quiet: suppress backend transport warnings.
    #[arg(short, long)]
    quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Number of starred articles per batch.
    #[arg(short, long, default_value_t = 20)]
    limit: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = observability::init(LogOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        ..LogOptions::default()
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
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let client = TtRssClient::connect(&config.connection).context("backend login failed")?;

    let stdin = std::io::stdin();
    loop {
        let starred = client.headlines(&HeadlinesRequest::starred(cli.limit))?;
        if starred.is_empty() {
            println!("No starred articles left.");
            return Ok(());
        }

        for head in &starred {
            println!(
                "{}: {}: {}",
                head.feed_title,
                head.title,
                head.link.as_deref().unwrap_or("-")
            );
        }

        print!("Remove messages? (y/n): ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        stdin.lock().read_line(&mut answer)?;
        if answer.trim() != "y" {
            return Ok(());
        }

        for head in &starred {
            tracing::debug!(id = head.id, title = %head.title, "clearing star");
            client.clear_star(head.id)?;
        }
    }
}
