//! Fetching the remote name table and reducing it to a [`Mapping`].

use crate::error::SwearError;
use crate::mapping::Mapping;
use crate::ports::{Column, EventSink, MappingProvider, PatchEvent, RemoteQuery};

/// Value used by the table maintainers for rows whose real name is unknown.
const PLACEHOLDER: &str = "TBA";
/// Prefix of placeholders that announce a future release ("TBA in 1.4").
const PLACEHOLDER_PREFIX: &str = "TBA in ";
/// Marker some real names carry in the table; not part of the name.
const MARKER: char = '*';

/// A freshly downloaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTable {
    /// Version token from the header row of column A.
    pub version: String,
    /// Usable rows.
    pub mapping: Mapping,
}

/// Reads the remote name table through a [`MappingProvider`].
pub struct MappingSource<'a> {
    provider: &'a dyn MappingProvider,
    events: &'a dyn EventSink,
}

impl<'a> MappingSource<'a> {
    /// Creates a source over the given provider, reporting to `events`.
    #[must_use]
    pub fn new(provider: &'a dyn MappingProvider, events: &'a dyn EventSink) -> Self {
        Self { provider, events }
    }

    /// Fetches the current version token.
    ///
    /// # Errors
    ///
    /// Returns [`SwearError::Transport`] if the provider request fails.
    pub async fn fetch_version(&self) -> Result<String, SwearError> {
        self.fetch(RemoteQuery::Version).await
    }

    /// Fetches columns A and C and reduces them to a mapping.
    ///
    /// Both columns are requested concurrently. The version recorded in the
    /// result is the header of column A.
    ///
    /// # Errors
    ///
    /// Returns [`SwearError::Transport`] if either column cannot be fetched.
    pub async fn fetch_mapping(&self) -> Result<RemoteTable, SwearError> {
        self.events.emit(&PatchEvent::FetchStarted);

        let (keys, values) = tokio::try_join!(
            self.fetch(RemoteQuery::Column(Column::A)),
            self.fetch(RemoteQuery::Column(Column::C)),
        )?;
        let keys = split_rows(&keys);
        let values = split_rows(&values);

        let version = keys.first().copied().unwrap_or_default().to_string();
        let mapping = reduce_columns(&keys, &values);

        self.events.emit(&PatchEvent::FetchFinished {
            version: version.clone(),
            entries: mapping.len(),
        });
        Ok(RemoteTable { version, mapping })
    }

    async fn fetch(&self, query: RemoteQuery) -> Result<String, SwearError> {
        self.provider.fetch(&query).await.map_err(|e| SwearError::transport(query.to_string(), e))
    }
}

/// Splits a column response into rows, tolerating CRLF line endings.
fn split_rows(body: &str) -> Vec<&str> {
    body.split('\n').map(|row| row.strip_suffix('\r').unwrap_or(row)).collect()
}

/// Returns `true` for values that stand in for a not-yet-known real name.
fn is_placeholder(value: &str) -> bool {
    value == PLACEHOLDER || value.starts_with(PLACEHOLDER_PREFIX) || value.trim().is_empty()
}

/// Pairs column A (`keys`) with column C (`values`), skipping the header row.
///
/// Placeholder rows are dropped, the first occurrence of a key wins, and a
/// single leading `*` is removed from the stored value. Rows missing from
/// `values` count as blank.
#[must_use]
pub fn reduce_columns(keys: &[&str], values: &[&str]) -> Mapping {
    let mut mapping = Mapping::new();
    for (i, &key) in keys.iter().enumerate().skip(1) {
        let value = values.get(i).copied().unwrap_or_default();
        if is_placeholder(value) || mapping.contains(key) {
            continue;
        }
        let value = value.strip_prefix(MARKER).unwrap_or(value);
        // A bare marker would leave an empty name behind.
        if value.trim().is_empty() {
            continue;
        }
        mapping.insert(key, value);
    }
    mapping
}
