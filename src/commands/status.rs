//! `swear status` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::mapping::cache::MappingCache;

/// Describe the local cache without contacting the provider.
///
/// # Errors
///
/// Returns an error string if the cached record is malformed.
pub fn run_with_context(ctx: &ServiceContext, config: &Config) -> Result<String, String> {
    let cache = MappingCache::new(ctx.fs.as_ref(), &config.data_dir);
    match cache.try_load().map_err(|e| e.to_string())? {
        Some(record) => Ok(format!(
            "Version {}: {} mappings cached in {}",
            record.version,
            record.mapping.len(),
            config.data_dir.display()
        )),
        None => Ok(format!("No cached mappings in {}", config.data_dir.display())),
    }
}
