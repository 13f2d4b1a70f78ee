//! Live event sink that forwards to `tracing`.

use tracing::{debug, info};

use crate::ports::events::{EventSink, PatchEvent};

/// Logs progress at `info` and individual renames at `debug`.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &PatchEvent) {
        match event {
            PatchEvent::CacheHit { version, entries } => {
                info!(%version, entries, "Loaded cached mappings");
            }
            PatchEvent::FetchStarted => info!("Downloading mappings"),
            PatchEvent::FetchFinished { version, entries } => {
                info!(%version, entries, "Downloaded mappings");
            }
            PatchEvent::CacheSaved { version, updated, kept } => {
                info!(%version, updated, kept, "Cached mappings");
            }
            PatchEvent::Renamed { domain, from, to } => {
                debug!(%domain, "Renaming {from} to {to}");
            }
        }
    }
}
