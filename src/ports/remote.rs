//! Remote mapping provider port.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// Boxed future type alias used by [`MappingProvider`] to keep the trait dyn-compatible.
pub type ProviderFuture<'a> = Pin<Box<dyn Future<Output = Result<String, PortError>> + Send + 'a>>;

/// A column of the remote name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Obfuscated names. Row 0 carries the table version.
    A,
    /// Real names, parallel to column A.
    C,
}

impl Column {
    /// The column selector sent to the provider.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::C => "C",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request understood by the remote provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "column", rename_all = "lowercase")]
pub enum RemoteQuery {
    /// The current version token, as plain text.
    Version,
    /// One column of the table, newline-delimited.
    Column(Column),
}

impl RemoteQuery {
    /// Query-string pairs for this request.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            Self::Version => vec![("mode", "version")],
            Self::Column(column) => vec![("mode", "column"), ("column", column.as_str())],
        }
    }
}

impl fmt::Display for RemoteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version => f.write_str("version"),
            Self::Column(column) => write!(f, "column {column}"),
        }
    }
}

/// Serves the raw text of the remote name table.
pub trait MappingProvider: Send + Sync {
    /// Fetches the response body for the given query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider answers with a
    /// non-success status.
    fn fetch(&self, query: &RemoteQuery) -> ProviderFuture<'_>;
}

impl<T: MappingProvider + ?Sized> MappingProvider for Arc<T> {
    fn fetch(&self, query: &RemoteQuery) -> ProviderFuture<'_> {
        (**self).fetch(query)
    }
}
