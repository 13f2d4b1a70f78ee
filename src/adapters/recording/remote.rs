//! Recording adapter for the `MappingProvider` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{MappingProvider, ProviderFuture, RemoteQuery};

/// Records provider responses while delegating to an inner implementation.
pub struct RecordingMappingProvider {
    inner: Box<dyn MappingProvider>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingMappingProvider {
    /// Creates a new recording provider wrapping the given implementation.
    pub fn new(inner: Box<dyn MappingProvider>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl MappingProvider for RecordingMappingProvider {
    fn fetch(&self, query: &RemoteQuery) -> ProviderFuture<'_> {
        let query = *query;
        Box::pin(async move {
            let result = self.inner.fetch(&query).await;
            record_result(&self.recorder, "remote", "fetch", &query, &result);
            result
        })
    }
}
