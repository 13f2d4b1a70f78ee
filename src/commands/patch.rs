//! `swear patch` command.

use std::path::Path;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::module::ModuleSymbols;
use crate::rename::RenameEngine;
use crate::resolve::resolve_mapping;

use super::block_on;

/// Rename the obfuscated symbols of the module at `module`.
///
/// The module is parsed before the mapping is resolved, so a bad module file
/// fails without touching the network. The result is written to `output`,
/// or back to `module` when no output is given.
///
/// # Errors
///
/// Returns an error string if the module cannot be read, parsed or written,
/// or if the mapping cannot be resolved. Nothing is written in that case.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &Config,
    module: &Path,
    output: Option<&Path>,
) -> Result<String, String> {
    let mut symbols = ModuleSymbols::load(ctx.fs.as_ref(), module).map_err(|e| e.to_string())?;
    let resolution =
        block_on(resolve_mapping(ctx, &config.data_dir))?.map_err(|e| e.to_string())?;

    let summary = RenameEngine::new(&resolution.mapping, ctx.events.as_ref()).apply(&mut symbols);

    let target = output.unwrap_or(module);
    symbols.save(ctx.fs.as_ref(), target).map_err(|e| e.to_string())?;
    Ok(format!("{}: {summary} using mappings {}", target.display(), resolution.version))
}
