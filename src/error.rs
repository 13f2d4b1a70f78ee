//! Error types for mapping resolution and module patching.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by port implementations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Failures that abort a resolve or patch run.
///
/// Missing cache artifacts and placeholder rows in the remote table are not
/// errors and never surface here.
#[derive(Debug, Error)]
pub enum SwearError {
    /// The remote name table could not be fetched.
    #[error("failed to fetch {what} from mapping provider: {source}")]
    Transport {
        /// Which remote resource was requested.
        what: String,
        /// Underlying transport error.
        #[source]
        source: PortError,
    },

    /// A cached mapping line has no `=` separator.
    #[error("malformed mapping record {}:{line}: {content:?} has no '=' separator", path.display())]
    MalformedCacheRecord {
        /// Path of the mapping record.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// A cached mapping line repeats a key seen earlier in the record.
    #[error("malformed mapping record {}:{line}: duplicate key {key:?}", path.display())]
    DuplicateCacheKey {
        /// Path of the mapping record.
        path: PathBuf,
        /// 1-based line number of the repeated key.
        line: usize,
        /// The repeated key.
        key: String,
    },

    /// Reading or writing a local artifact failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Storage {
        /// What was being attempted (`read`, `write`).
        action: &'static str,
        /// Path of the artifact.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: PortError,
    },

    /// A module symbol file could not be parsed or serialized.
    #[error("invalid module file {}: {message}", path.display())]
    ModuleFormat {
        /// Path of the module file.
        path: PathBuf,
        /// Parser or serializer message.
        message: String,
    },
}

impl SwearError {
    pub(crate) fn transport(what: impl Into<String>, source: PortError) -> Self {
        Self::Transport { what: what.into(), source }
    }

    pub(crate) fn storage(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: PortError,
    ) -> Self {
        Self::Storage { action, path: path.into(), source }
    }
}
