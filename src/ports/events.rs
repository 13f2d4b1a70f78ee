//! Event sink port for observable progress and rename reports.

use std::sync::Arc;

use serde::Serialize;

use crate::ports::symbols::SymbolDomain;

/// Something worth reporting while resolving a mapping or patching a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PatchEvent {
    /// The cached mapping is current and was used without fetching.
    CacheHit {
        /// Version of the cached record.
        version: String,
        /// Number of cached entries.
        entries: usize,
    },
    /// The remote table is being downloaded.
    FetchStarted,
    /// The remote table was downloaded and reduced.
    FetchFinished {
        /// Version carried in the table header.
        version: String,
        /// Number of usable rows.
        entries: usize,
    },
    /// The local cache record was written.
    CacheSaved {
        /// Version written to the version record.
        version: String,
        /// Lines whose value was rewritten (or written fresh).
        updated: usize,
        /// Lines carried over unchanged.
        kept: usize,
    },
    /// A symbol was renamed.
    Renamed {
        /// Which kind of symbol.
        domain: SymbolDomain,
        /// Name before the rename.
        from: String,
        /// Name after the rename.
        to: String,
    },
}

/// Receives [`PatchEvent`]s. Purely observational.
pub trait EventSink: Send + Sync {
    /// Reports one event.
    fn emit(&self, event: &PatchEvent);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: &PatchEvent) {
        (**self).emit(event);
    }
}
