//! Configuration management.
//!
//! The configuration file is TOML with two sections: `[connection]` for
//! the backend account and `[dedup]` for the engine knobs.
//!
//! ```toml
//! [connection]
//! hostname = "https://rss.example.org"
//! username = "reader"
//! password = "secret"
//!
//! [dedup]
//! maxcount = 2000
//! ratio = 85
//! sleep = 60
//! ignore = "31,47"
//! include = ""
//! ```
//!
//! The file is deserialized into an all-optional [`ConfigFile`] mirror and
//! then validated into [`Config`]; anything missing or out of range is a
//! [`Error::Config`] and fatal at startup.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default configuration file name, used when no path argument is given.
pub const DEFAULT_CONFIG_FILE: &str = "newsdedup.toml";

/// Runtime configuration for newsdedup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend connection settings.
    pub connection: ConnectionConfig,
    /// Dedup engine settings.
    pub dedup: DedupConfig,
}

/// `[connection]` section: how to reach and authenticate with the backend.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the Tiny Tiny RSS instance.
    pub hostname: String,
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Optional HTTP basic-auth pair in front of the API.
    pub http_auth: Option<(String, String)>,
}

/// `[dedup]` section: engine tuning.
#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Title Memory capacity and bootstrap learn target. Always positive.
    pub maxcount: usize,
    /// Similarity threshold in 0–100; a score strictly above it counts as
    /// a duplicate.
    pub ratio: u32,
    /// Seconds to sleep between monitoring cycles.
    pub sleep: u64,
    /// Feed ids excluded from dedup consideration.
    pub ignore: Vec<String>,
    /// Feed-name substrings; when non-empty, only matching feeds are
    /// considered.
    pub include: Vec<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Connection section.
    pub connection: Option<ConfigFileConnection>,
    /// Dedup section.
    pub dedup: Option<ConfigFileDedup>,
}

/// `[connection]` section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileConnection {
    /// Base URL.
    pub hostname: Option<String>,
    /// Account username.
    pub username: Option<String>,
    /// Account password.
    pub password: Option<String>,
    /// HTTP basic-auth username.
    pub http_auth_username: Option<String>,
    /// HTTP basic-auth password.
    pub http_auth_password: Option<String>,
}

/// `[dedup]` section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileDedup {
    /// Title memory capacity.
    pub maxcount: Option<usize>,
    /// Similarity threshold.
    pub ratio: Option<u32>,
    /// Sleep seconds between cycles.
    pub sleep: Option<u64>,
    /// Comma-separated feed-id ignore list.
    pub ignore: Option<String>,
    /// Comma-separated feed-name include list.
    pub include: Option<String>,
}

impl Config {
    /// Loads and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, is not valid
    /// TOML, or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("can't read configuration file {}: {e}", path.display()))
        })?;
        let file: ConfigFile = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid configuration file: {e}")))?;
        Self::from_file(file)
    }

    /// Validates a parsed [`ConfigFile`] into a runtime [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a required key is missing or a value
    /// is out of range.
    pub fn from_file(file: ConfigFile) -> Result<Self> {
        let conn = file.connection.unwrap_or_default();
        let dedup = file.dedup.unwrap_or_default();

        let hostname = require(conn.hostname, "connection.hostname")?;
        let username = require(conn.username, "connection.username")?;
        let password = require(conn.password, "connection.password")?;

        // An empty basic-auth field counts as unset.
        let ht_user = conn.http_auth_username.filter(|s| !s.is_empty());
        let ht_pass = conn.http_auth_password.filter(|s| !s.is_empty());
        let http_auth = match (ht_user, ht_pass) {
            (None, None) => None,
            (user, pass) => Some((user.unwrap_or_default(), pass.unwrap_or_default())),
        };

        let maxcount = require(dedup.maxcount, "dedup.maxcount")?;
        if maxcount == 0 {
            return Err(Error::Config("dedup.maxcount must be positive".to_string()));
        }
        let ratio = require(dedup.ratio, "dedup.ratio")?;
        if ratio > 100 {
            return Err(Error::Config(format!(
                "dedup.ratio must be in 0-100, got {ratio}"
            )));
        }
        let sleep = require(dedup.sleep, "dedup.sleep")?;

        Ok(Self {
            connection: ConnectionConfig {
                hostname,
                username,
                password,
                http_auth,
            },
            dedup: DedupConfig {
                maxcount,
                ratio,
                sleep,
                ignore: split_list(dedup.ignore.as_deref()),
                include: split_list(dedup.include.as_deref()),
            },
        })
    }
}

fn require<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| Error::Config(format!("missing required key {key}")))
}

/// Splits a comma-separated config value, trimming whitespace and
/// discarding empty entries (so `""` means "no restriction").
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
