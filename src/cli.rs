//! Clap adapter for the launcher.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! [`LaunchArgs`] parses the launcher's own flags; everything after `--` is
//! passed through untouched as `-path value` override tokens.
//!
//! The bridge to the core is [`LaunchArgs::into_builder()`] plus
//! [`LaunchArgs::action()`]. From there, all logic flows through the clap-free
//! [`ConfigLoaderBuilder::handle()`](crate::ConfigLoaderBuilder::handle) API.
//!
//! ```text
//! mmseqs-web-config --config config.json --get server.address -- -server.address 0.0.0.0:80
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::builder::{ConfigLoader, ConfigLoaderBuilder, DEFAULT_ENV_PREFIX};
use crate::types::{ConfigAction, Format};

/// Document format names accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Toml,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Format::Json,
            FormatArg::Toml => Format::Toml,
        }
    }
}

/// Resolve the MMseqs2 web service configuration and print it.
#[derive(Debug, Parser)]
#[command(name = "mmseqs-web-config", version)]
pub struct LaunchArgs {
    /// Config file to load. The embedded default is used when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Document format. Detected from the file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Reject unknown keys in the document instead of warning about them.
    #[arg(long)]
    pub strict: bool,

    /// Prefix for environment overrides (`{PREFIX}__SERVER__ADDRESS`).
    #[arg(long, default_value = DEFAULT_ENV_PREFIX, value_name = "PREFIX")]
    pub env_prefix: String,

    /// Ignore environment overrides.
    #[arg(long, conflicts_with = "env_prefix")]
    pub no_env: bool,

    /// Print one key with its documentation instead of the full listing.
    #[arg(long, value_name = "KEY", conflicts_with_all = ["json", "check_paths"])]
    pub get: Option<String>,

    /// Print the resolved tree as JSON.
    #[arg(long, conflicts_with = "check_paths")]
    pub json: bool,

    /// Create the databases and results directories and look for the MMseqs2 binary.
    #[arg(long)]
    pub check_paths: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn", value_name = "FILTER")]
    pub log_level: String,

    /// Override tokens, e.g. `-server.address 0.0.0.0:80 -server.cors false`.
    #[arg(last = true, allow_hyphen_values = true, value_name = "OVERRIDES")]
    pub overrides: Vec<String>,
}

impl LaunchArgs {
    /// The operation selected by the flags. Plain invocation lists every key.
    pub fn action(&self) -> ConfigAction {
        if let Some(key) = &self.get {
            ConfigAction::Get { key: key.clone() }
        } else if self.json {
            ConfigAction::Dump
        } else if self.check_paths {
            ConfigAction::CheckPaths
        } else {
            ConfigAction::List
        }
    }

    /// A loader configured from the parsed flags.
    pub fn into_builder(self) -> ConfigLoaderBuilder {
        let mut builder = ConfigLoader::builder()
            .strict(self.strict)
            .args(self.overrides);
        if let Some(path) = self.config {
            builder = builder.file(path);
        }
        if let Some(format) = self.format {
            builder = builder.format(format.into());
        }
        if self.no_env {
            builder.no_env()
        } else {
            builder.env_prefix(&self.env_prefix)
        }
    }
}
