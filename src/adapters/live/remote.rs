//! Live adapter for the `MappingProvider` port over HTTP.

use reqwest::Client;

use crate::error::PortError;
use crate::ports::remote::{MappingProvider, ProviderFuture, RemoteQuery};

/// Fetches the name table from an HTTP endpoint that takes `mode` (and
/// `column`) query parameters.
///
/// Certificates are validated normally; there is no way to turn that off.
pub struct HttpMappingProvider {
    client: Client,
    url: String,
}

impl HttpMappingProvider {
    /// Creates a provider for the endpoint at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: Client::new(), url: url.into() }
    }
}

impl MappingProvider for HttpMappingProvider {
    fn fetch(&self, query: &RemoteQuery) -> ProviderFuture<'_> {
        let params = query.params();

        Box::pin(async move {
            let response = self
                .client
                .get(&self.url)
                .query(&params)
                .send()
                .await
                .map_err(|e| -> PortError {
                    format!("request to {} failed: {e}", self.url).into()
                })?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| -> PortError { format!("failed to read response body: {e}").into() })?;

            if !status.is_success() {
                let message = format!("provider answered {}: {}", status.as_u16(), body.trim());
                return Err(message.into());
            }
            Ok(body)
        })
    }
}
