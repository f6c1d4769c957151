use crate::routes::commands::Command;
use anyhow::{Context, Result};
use clap::Parser;
use std::{env, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/metadata";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the metadata service lives and how long to wait for it.
/// Flags win over `METADATA_CONSOLE_*` variables, which win over the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of the metadata resource, e.g. `http://localhost:8080/metadata`.
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Global flags and the command to run.
#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the metadata analysis service")]
pub struct Args {
    /// Metadata resource URL (overrides METADATA_CONSOLE_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides METADATA_CONSOLE_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and the command to run.
    pub fn from_env_and_args() -> Result<(Self, Command)> {
        let args = Args::parse();
        Self::merge(args, |key| env::var(key))
    }

    /// Merge parsed arguments over values looked up with `var`.
    pub fn merge(
        args: Args,
        var: impl Fn(&str) -> Result<String, env::VarError>,
    ) -> Result<(Self, Command)> {
        // --- Environment fallback ---
        let env_base_url =
            var("METADATA_CONSOLE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let env_timeout = match var("METADATA_CONSOLE_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().with_context(|| {
                format!("parsing METADATA_CONSOLE_TIMEOUT_SECS value `{}`", value)
            })?,
            Err(env::VarError::NotPresent) => DEFAULT_TIMEOUT_SECS,
            Err(err) => return Err(err).context("reading METADATA_CONSOLE_TIMEOUT_SECS"),
        };

        // --- Merge ---
        let cfg = Self {
            base_url: args.base_url.unwrap_or(env_base_url),
            timeout_secs: args.timeout_secs.unwrap_or(env_timeout),
        };

        Ok((cfg, args.command))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
