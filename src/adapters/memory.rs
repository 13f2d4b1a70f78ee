//! In-memory adapters for embedding hosts and tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::PortError;
use crate::ports::{EventSink, FileSystem, MappingProvider, PatchEvent, ProviderFuture, RemoteQuery};

/// Filesystem held entirely in memory.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.lock().expect("memory fs lock poisoned").insert(path.into(), contents.into());
        self
    }

    /// Returns a copy of a file's contents, if present.
    #[must_use]
    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("memory fs lock poisoned").get(path).cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.file(path).ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let mut files = self.files.lock().expect("memory fs lock poisoned");
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().expect("memory fs lock poisoned");
        // Exact file, or a directory that holds one.
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
    }
}

/// Provider answering from canned response bodies.
///
/// Queries without a body fail like an unreachable endpoint. Every request
/// is logged.
#[derive(Default)]
pub struct StaticMappingProvider {
    bodies: HashMap<RemoteQuery, String>,
    requests: Mutex<Vec<RemoteQuery>>,
}

impl StaticMappingProvider {
    /// Creates a provider with no responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the body returned for `query`.
    #[must_use]
    pub fn with_response(mut self, query: RemoteQuery, body: impl Into<String>) -> Self {
        self.bodies.insert(query, body.into());
        self
    }

    /// Queries received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RemoteQuery> {
        self.requests.lock().expect("provider lock poisoned").clone()
    }
}

impl MappingProvider for StaticMappingProvider {
    fn fetch(&self, query: &RemoteQuery) -> ProviderFuture<'_> {
        self.requests.lock().expect("provider lock poisoned").push(*query);
        let body = self.bodies.get(query).cloned();
        let query = *query;
        Box::pin(async move {
            body.ok_or_else(|| format!("no response configured for {query}").into())
        })
    }
}

/// Event sink that keeps every event.
#[derive(Default)]
pub struct CollectingEventSink {
    events: Mutex<Vec<PatchEvent>>,
}

impl CollectingEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    #[must_use]
    pub fn events(&self) -> Vec<PatchEvent> {
        self.events.lock().expect("event sink lock poisoned").clone()
    }

    /// Number of rename events received so far.
    #[must_use]
    pub fn rename_count(&self) -> usize {
        self.events
            .lock()
            .expect("event sink lock poisoned")
            .iter()
            .filter(|e| matches!(e, PatchEvent::Renamed { .. }))
            .count()
    }
}

impl EventSink for CollectingEventSink {
    fn emit(&self, event: &PatchEvent) {
        self.events.lock().expect("event sink lock poisoned").push(event.clone());
    }
}
