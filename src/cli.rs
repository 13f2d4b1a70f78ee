//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

/// Top-level CLI parser for `swear`.
#[derive(Debug, Parser)]
#[command(name = "swear", version, about = "Rename obfuscated symbols from a shared name table")]
pub struct Cli {
    /// Directory holding the cached name table.
    #[arg(long, global = true, env = "SWEAR_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Endpoint serving the name table.
    #[arg(long, global = true, env = "SWEAR_MAPPINGS_URL", value_name = "URL")]
    pub url: Option<String>,

    /// Serve filesystem and network calls from a recorded cassette.
    #[arg(long, global = true, env = "SWEAR_REPLAY", value_name = "CASSETTE")]
    pub replay: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Configuration from the flags, falling back to defaults.
    #[must_use]
    pub fn config(&self) -> Config {
        Config::from_overrides(self.url.as_deref(), self.data_dir.as_deref())
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the cached name table, refreshing it when the remote version moved.
    Resolve,
    /// Rename obfuscated symbols in a module file.
    Patch {
        /// Module symbol file (`.json`, `.yaml` or `.yml`).
        module: PathBuf,
        /// Write the patched module here instead of in place.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show the cached version and entry count.
    Status,
    /// Look up one obfuscated name in the cache.
    Lookup {
        /// Symbol name to look up.
        name: String,
    },
}
