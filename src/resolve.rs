//! Load-or-fetch: turning the cache and the remote table into one mapping.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::SwearError;
use crate::mapping::cache::{CachedEntries, MappingCache};
use crate::mapping::source::MappingSource;
use crate::mapping::Mapping;
use crate::ports::PatchEvent;

/// Where a resolved mapping came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The cached record matched the remote version.
    Cache,
    /// The remote table was downloaded and merged into the cache.
    Remote,
}

/// A mapping ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Obfuscated-to-real names.
    pub mapping: Mapping,
    /// Version the mapping corresponds to.
    pub version: String,
    /// Whether the network table was downloaded.
    pub origin: Origin,
}

/// Resolves the mapping for the cache in `data_dir`.
///
/// A cached record whose version equals the remote version is used as-is.
/// Otherwise the remote table is downloaded, merged into the cache on disk,
/// and overlaid on the cached entries: fresh values win, cached-only keys
/// survive, new keys are usable right away even though the cache record
/// never gains them. Cached entries are overlaid even when the version
/// record is missing; no version request is made in that case.
///
/// # Errors
///
/// Any transport failure, malformed cache record or storage failure aborts
/// resolution. Nothing is renamed by this function.
pub async fn resolve_mapping(
    ctx: &ServiceContext,
    data_dir: &Path,
) -> Result<Resolution, SwearError> {
    let cache = MappingCache::new(ctx.fs.as_ref(), data_dir);
    let source = MappingSource::new(ctx.remote.as_ref(), ctx.events.as_ref());

    let cached = cache.load_entries()?;
    if let Some(CachedEntries { mapping, version: Some(version) }) = cached.as_ref() {
        let remote_version = source.fetch_version().await?;
        if remote_version == *version {
            let hit = PatchEvent::CacheHit { version: version.clone(), entries: mapping.len() };
            ctx.events.emit(&hit);
            return Ok(Resolution {
                mapping: mapping.clone(),
                version: version.clone(),
                origin: Origin::Cache,
            });
        }
    }

    let table = source.fetch_mapping().await?;
    let outcome = cache.save(&table.mapping, &table.version)?;
    ctx.events.emit(&PatchEvent::CacheSaved {
        version: table.version.clone(),
        updated: outcome.updated,
        kept: outcome.kept,
    });

    let mapping = match cached {
        Some(entries) => entries.mapping.overlaid_with(&table.mapping),
        None => table.mapping,
    };
    Ok(Resolution { mapping, version: table.version, origin: Origin::Remote })
}
