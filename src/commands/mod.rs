//! Command dispatch and handlers.

pub mod lookup;
pub mod patch;
pub mod resolve;
pub mod status;

use std::env;
use std::future::Future;
use std::path::Path;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command line to its handler.
///
/// `--replay` serves every port call from a cassette. Otherwise, when
/// `SWEAR_RECORD` is set to a file path, the live session is recorded there.
///
/// # Errors
///
/// Returns an error string if the cassette cannot be loaded or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = cli.config();
    let ctx = if let Some(path) = &cli.replay {
        ServiceContext::replaying(path)?
    } else if let Ok(path) = env::var("SWEAR_RECORD") {
        ServiceContext::recording(&config, Path::new(&path))
    } else {
        ServiceContext::live(&config)
    };

    // The context is dropped (and any recording saved) after the command
    // finishes, even on error.
    let report = dispatch_with_context(&cli.command, &ctx, &config)?;
    println!("{report}");
    Ok(())
}

/// Run a command against the given service context, returning its report.
fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<String, String> {
    match command {
        Command::Resolve => resolve::run_with_context(ctx, config),
        Command::Patch { module, output } => {
            patch::run_with_context(ctx, config, module, output.as_deref())
        }
        Command::Status => status::run_with_context(ctx, config),
        Command::Lookup { name } => lookup::run_with_context(ctx, config, name),
    }
}

/// Drive a future to completion on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    Ok(runtime.block_on(future))
}
