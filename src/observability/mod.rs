//! Logging setup.
//!
//! Console output goes through `tracing`; [`init`] builds the subscriber
//! from the CLI flags. `--debug` selects trace level, `--verbose` debug
//! level, everything else info. `--daemon` drops the timestamp prefix
//! (the service manager adds its own), and `--quiet` silences warnings
//! from the HTTP transport crates. A `RUST_LOG` environment variable
//! overrides the computed default filter.

use crate::{Error, Result};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Output options derived from CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Trace-level output.
    pub debug: bool,
    /// Debug-level output.
    pub verbose: bool,
    /// Silence transport-crate warnings.
    pub quiet: bool,
    /// Daemon mode: no timestamp prefixes.
    pub daemon: bool,
}

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Initializes the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn init(options: LogOptions) -> Result<()> {
    if LOGGING_INIT.get().is_some() {
        return Err(Error::Config("logging already initialized".to_string()));
    }

    // RUST_LOG overrides the flag-derived default.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(options)));

    let result = if options.daemon {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_target(false),
            )
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .with(filter)
            .try_init()
    };

    result.map_err(|e| Error::Config(format!("failed to initialize logging: {e}")))?;

    LOGGING_INIT.set(()).ok();
    Ok(())
}

/// Default filter directives from the CLI flags, used when `RUST_LOG`
/// is not set.
fn default_directives(options: LogOptions) -> String {
    let level = if options.debug {
        "trace"
    } else if options.verbose {
        "debug"
    } else {
        "info"
    };

    let mut directives = level.to_string();
    if options.quiet {
        directives.push_str(",reqwest=error,hyper=error,rustls=error");
    }
    directives
}
