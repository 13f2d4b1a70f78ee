//! `swear resolve` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::resolve::{resolve_mapping, Origin};

use super::block_on;

/// Resolve the mapping and describe the result.
///
/// # Errors
///
/// Returns an error string if the cache is unreadable or the remote table
/// cannot be fetched.
pub fn run_with_context(ctx: &ServiceContext, config: &Config) -> Result<String, String> {
    let resolution =
        block_on(resolve_mapping(ctx, &config.data_dir))?.map_err(|e| e.to_string())?;
    let origin = match resolution.origin {
        Origin::Cache => "cache is current",
        Origin::Remote => "downloaded",
    };
    Ok(format!(
        "{} mappings at version {} ({origin})",
        resolution.mapping.len(),
        resolution.version
    ))
}
