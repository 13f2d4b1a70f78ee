//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::events::TracingEventSink;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::remote::HttpMappingProvider;
use crate::adapters::recording::{RecordingFileSystem, RecordingMappingProvider};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingMappingProvider};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::ports::events::EventSink;
use crate::ports::filesystem::FileSystem;
use crate::ports::remote::MappingProvider;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Filesystem for the cache and module files.
    pub fs: Box<dyn FileSystem>,
    /// Source of the remote name table.
    pub remote: Box<dyn MappingProvider>,
    /// Sink for progress and rename events.
    pub events: Box<dyn EventSink>,
    /// Cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(
        fs: Box<dyn FileSystem>,
        remote: Box<dyn MappingProvider>,
        events: Box<dyn EventSink>,
    ) -> Self {
        Self { fs, remote, events, recorder: None }
    }

    /// Creates a live context: real disk, HTTP provider at the configured
    /// URL, events logged through `tracing`.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self::new(
            Box::new(LiveFileSystem),
            Box::new(HttpMappingProvider::new(&config.mappings_url)),
            Box::new(TracingEventSink),
        )
    }

    /// Creates a recording context that writes a cassette file on drop.
    ///
    /// Uses live adapters for actual work and records every filesystem and
    /// provider call. This is the mechanism behind the `SWEAR_RECORD` env var.
    #[must_use]
    pub fn recording(config: &Config, path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "swear-session")));
        Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            remote: Box::new(RecordingMappingProvider::new(
                Box::new(HttpMappingProvider::new(&config.mappings_url)),
                Arc::clone(&recorder),
            )),
            events: Box::new(TracingEventSink),
            recorder: Some(recorder),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// Filesystem and provider calls are served from the cassette; each port
    /// gets its own replayer so their cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::new(
            Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            Box::new(ReplayingMappingProvider::new(CassetteReplayer::new(&cassette))),
            Box::new(TracingEventSink),
        ))
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_events(mut self, events: Box<dyn EventSink>) -> Self {
        self.events = events;
        self
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            let guard = recorder.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            match guard.save() {
                Ok(path) => eprintln!("Recording saved to: {}", path.display()),
                Err(e) => eprintln!("Warning: failed to write cassette: {e}"),
            }
        }
    }
}
