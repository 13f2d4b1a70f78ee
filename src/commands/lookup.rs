//! `swear lookup` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::filter::is_candidate;
use crate::mapping::cache::MappingCache;

/// Report whether `name` would be renamed and what the cache maps it to.
///
/// # Errors
///
/// Returns an error string if the cached record is malformed.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &Config,
    name: &str,
) -> Result<String, String> {
    if !is_candidate(name) {
        return Ok(format!("{name} is not an obfuscated name"));
    }

    let cache = MappingCache::new(ctx.fs.as_ref(), &config.data_dir);
    let Some(record) = cache.try_load().map_err(|e| e.to_string())? else {
        return Ok(format!("{name}: no cached mappings in {}", config.data_dir.display()));
    };
    Ok(match record.mapping.get(name) {
        Some(real) => format!("{name} = {real}"),
        None => format!("{name} has no mapping at version {}", record.version),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{CollectingEventSink, MemoryFileSystem, StaticMappingProvider};

    fn context() -> ServiceContext {
        ServiceContext::new(
            Box::new(
                MemoryFileSystem::new()
                    .with_file("/data/mappings.txt", "ABCDEFGHIJK=PlayerController\n")
                    .with_file("/data/version.txt", "v7"),
            ),
            Box::new(StaticMappingProvider::new()),
            Box::new(CollectingEventSink::new()),
        )
    }

    fn lookup(name: &str) -> String {
        run_with_context(&context(), &Config::new("http://unused", "/data"), name).unwrap()
    }

    #[test]
    fn mapped_name() {
        assert_eq!(lookup("ABCDEFGHIJK"), "ABCDEFGHIJK = PlayerController");
    }

    #[test]
    fn unmapped_candidate() {
        assert_eq!(lookup("ZZZZZZZZZZZ"), "ZZZZZZZZZZZ has no mapping at version v7");
    }

    #[test]
    fn non_candidate_skips_cache() {
        assert_eq!(lookup("Abcdefghijk"), "Abcdefghijk is not an obfuscated name");
        assert_eq!(lookup("ABCDEFGHIJ"), "ABCDEFGHIJ is not an obfuscated name");
    }

    #[test]
    fn missing_cache() {
        let ctx = ServiceContext::new(
            Box::new(MemoryFileSystem::new()),
            Box::new(StaticMappingProvider::new()),
            Box::new(CollectingEventSink::new()),
        );
        let report =
            run_with_context(&ctx, &Config::new("http://unused", "/data"), "ABCDEFGHIJK").unwrap();
        assert_eq!(report, "ABCDEFGHIJK: no cached mappings in /data");
    }
}
