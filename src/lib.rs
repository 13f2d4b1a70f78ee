//! Core library entry for the `swear` CLI.
//!
//! Renames obfuscated symbols (eleven uppercase ASCII letters) in a module
//! using a community-maintained name table, cached locally and refreshed
//! when the remote version changes.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod module;
pub mod ports;
pub mod rename;
pub mod resolve;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
/// `--help` and `--version` print to stdout and succeed.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_err(|e| format!("failed to write usage: {e}"));
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}
