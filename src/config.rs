//! Runtime configuration resolved from flags, environment and defaults.

use std::path::{Path, PathBuf};

/// Endpoint serving the published name table.
pub const DEFAULT_MAPPINGS_URL: &str = "https://script.google.com/macros/s/AKfycbwdvLOUsw2MfSr0itlvvqT9tk4Pn_okIMeXA-tRKUsWCYszuf5YgPhhiXHa7_hD7zBjIA/exec";

/// Cache directory used when none is configured, relative to the working
/// directory.
pub const DEFAULT_DATA_DIR: &str = ".swear";

/// Where the name table comes from and where it is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote table endpoint.
    pub mappings_url: String,
    /// Directory holding `mappings.txt` and `version.txt`.
    pub data_dir: PathBuf,
}

impl Config {
    /// Creates a configuration from explicit values.
    #[must_use]
    pub fn new(mappings_url: impl Into<String>, data_dir: impl AsRef<Path>) -> Self {
        Self { mappings_url: mappings_url.into(), data_dir: data_dir.as_ref().to_path_buf() }
    }

    /// Fills unset values with the defaults.
    #[must_use]
    pub fn from_overrides(mappings_url: Option<&str>, data_dir: Option<&Path>) -> Self {
        Self::new(
            mappings_url.unwrap_or(DEFAULT_MAPPINGS_URL),
            data_dir.unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR)),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_overrides(None, None)
    }
}
