//! Local mapping cache: a `key=value` line record plus a version record.
//!
//! Directory layout:
//!
//! ```text
//! <data dir>/
//!   ├── mappings.txt   one `obfuscated=real` line per entry
//!   └── version.txt    version token, whole-file content
//! ```
//!
//! Saving over an existing record rewrites values of keys it already holds
//! and keeps every other line as-is. It never appends keys, so the first
//! populated save fixes the set of cached keys for the life of the record.

use std::path::{Path, PathBuf};

use crate::error::SwearError;
use crate::mapping::Mapping;
use crate::ports::FileSystem;

/// File name of the mapping record.
pub const MAPPINGS_FILE: &str = "mappings.txt";
/// File name of the version record.
pub const VERSION_FILE: &str = "version.txt";

/// A mapping and version read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    /// Cached entries in file order.
    pub mapping: Mapping,
    /// Version token the record was last saved with.
    pub version: String,
}

/// The mapping record as read, whether or not a version record exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEntries {
    /// Cached entries in file order.
    pub mapping: Mapping,
    /// Version token, if the version record exists.
    pub version: Option<String>,
}

/// Line counts from one [`MappingCache::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveOutcome {
    /// Lines written with a value from the new mapping.
    pub updated: usize,
    /// Lines carried over unchanged.
    pub kept: usize,
}

/// Reads and writes the cache record in a data directory.
pub struct MappingCache<'a> {
    fs: &'a dyn FileSystem,
    dir: PathBuf,
}

impl<'a> MappingCache<'a> {
    /// Creates a cache rooted at `dir`. Nothing is touched until a load or save.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, dir: &Path) -> Self {
        Self { fs, dir: dir.to_path_buf() }
    }

    /// Path of the mapping record.
    #[must_use]
    pub fn mappings_path(&self) -> PathBuf {
        self.dir.join(MAPPINGS_FILE)
    }

    /// Path of the version record.
    #[must_use]
    pub fn version_path(&self) -> PathBuf {
        self.dir.join(VERSION_FILE)
    }

    /// Loads the cached record.
    ///
    /// Returns `Ok(None)` when either file is missing.
    ///
    /// # Errors
    ///
    /// Same as [`MappingCache::load_entries`].
    pub fn try_load(&self) -> Result<Option<CacheRecord>, SwearError> {
        Ok(self.load_entries()?.and_then(|CachedEntries { mapping, version }| {
            version.map(|version| CacheRecord { mapping, version })
        }))
    }

    /// Loads the mapping record, and the version record when present.
    ///
    /// Returns `Ok(None)` only when the mapping record is missing. The
    /// mapping record is parsed before the version record is looked at.
    ///
    /// # Errors
    ///
    /// Returns [`SwearError::MalformedCacheRecord`] for a line without `=`,
    /// [`SwearError::DuplicateCacheKey`] for a repeated key, and
    /// [`SwearError::Storage`] if a present file cannot be read.
    pub fn load_entries(&self) -> Result<Option<CachedEntries>, SwearError> {
        let mappings_path = self.mappings_path();
        if !self.fs.exists(&mappings_path) {
            return Ok(None);
        }
        let text = self.read(&mappings_path)?;
        let mapping = parse_record(&text, &mappings_path)?;

        let version_path = self.version_path();
        let version =
            if self.fs.exists(&version_path) { Some(self.read(&version_path)?) } else { None };

        Ok(Some(CachedEntries { mapping, version }))
    }

    /// Merges `fresh` into the mapping record and overwrites the version record.
    ///
    /// Without a prior record, every entry of `fresh` is written in its own
    /// order. With one, each existing line whose key is in `fresh` gets the
    /// new value and all other lines are kept verbatim; keys only in `fresh`
    /// are not added.
    ///
    /// # Errors
    ///
    /// Returns [`SwearError::Storage`] if a record cannot be read or written.
    pub fn save(&self, fresh: &Mapping, version: &str) -> Result<SaveOutcome, SwearError> {
        let mappings_path = self.mappings_path();
        let (contents, outcome) = if self.fs.exists(&mappings_path) {
            let previous = self.read(&mappings_path)?;
            merge_record(&previous, fresh)
        } else {
            render_record(fresh)
        };
        self.write(&mappings_path, &contents)?;
        self.write(&self.version_path(), version)?;
        Ok(outcome)
    }

    fn read(&self, path: &Path) -> Result<String, SwearError> {
        self.fs.read_to_string(path).map_err(|e| SwearError::storage("read", path, e))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), SwearError> {
        self.fs.write(path, contents).map_err(|e| SwearError::storage("write", path, e))
    }
}

/// Parses a mapping record. Each line splits on its first `=`.
fn parse_record(text: &str, path: &Path) -> Result<Mapping, SwearError> {
    let mut mapping = Mapping::new();
    for (i, line) in text.lines().enumerate() {
        let Some((key, value)) = line.split_once('=') else {
            return Err(SwearError::MalformedCacheRecord {
                path: path.to_path_buf(),
                line: i + 1,
                content: line.to_string(),
            });
        };
        if !mapping.insert(key, value) {
            return Err(SwearError::DuplicateCacheKey {
                path: path.to_path_buf(),
                line: i + 1,
                key: key.to_string(),
            });
        }
    }
    Ok(mapping)
}

/// Key of a record line: everything before the first `=`, or the whole line.
fn line_key(line: &str) -> &str {
    line.split_once('=').map_or(line, |(key, _)| key)
}

fn render_record(fresh: &Mapping) -> (String, SaveOutcome) {
    let lines: Vec<String> = fresh.iter().map(|e| format!("{}={}", e.obfuscated, e.real)).collect();
    let outcome = SaveOutcome { updated: lines.len(), kept: 0 };
    (join_lines(&lines), outcome)
}

fn merge_record(previous: &str, fresh: &Mapping) -> (String, SaveOutcome) {
    let mut outcome = SaveOutcome::default();
    let lines: Vec<String> = previous
        .lines()
        .map(|line| {
            let key = line_key(line);
            if let Some(real) = fresh.get(key) {
                outcome.updated += 1;
                format!("{key}={real}")
            } else {
                outcome.kept += 1;
                line.to_string()
            }
        })
        .collect();
    (join_lines(&lines), outcome)
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
