//! Name mapping: the obfuscated-to-real lookup table, how it is fetched, and
//! how it is cached on disk.

pub mod cache;
pub mod source;

use std::collections::HashMap;

/// One row of the mapping: an obfuscated name and its real name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Obfuscated identifier.
    pub obfuscated: String,
    /// Human-readable replacement.
    pub real: String,
}

/// Obfuscated-to-real name table that remembers insertion order.
///
/// Keys are unique. Order does not affect lookups; it only decides the
/// layout of a freshly written cache record.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
    index: HashMap<String, usize>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new entry. Returns `false` (and changes nothing) if the key
    /// is already present.
    pub fn insert(&mut self, obfuscated: impl Into<String>, real: impl Into<String>) -> bool {
        let obfuscated = obfuscated.into();
        if self.index.contains_key(&obfuscated) {
            return false;
        }
        self.index.insert(obfuscated.clone(), self.entries.len());
        self.entries.push(MappingEntry { obfuscated, real: real.into() });
        true
    }

    /// Inserts or replaces the value for a key. New keys go to the end.
    pub fn upsert(&mut self, obfuscated: &str, real: &str) {
        match self.index.get(obfuscated) {
            Some(&i) => real.clone_into(&mut self.entries[i].real),
            None => {
                self.insert(obfuscated, real);
            }
        }
    }

    /// Looks up the real name for an obfuscated one.
    #[must_use]
    pub fn get(&self, obfuscated: &str) -> Option<&str> {
        self.index.get(obfuscated).map(|&i| self.entries[i].real.as_str())
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains(&self, obfuscated: &str) -> bool {
        self.index.contains_key(obfuscated)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    /// Overlays `fresh` on top of `self`: values of shared keys come from
    /// `fresh`, keys only in `self` are kept, keys only in `fresh` are
    /// appended in `fresh`'s order.
    #[must_use]
    pub fn overlaid_with(&self, fresh: &Mapping) -> Mapping {
        let mut merged = self.clone();
        for entry in fresh.iter() {
            merged.upsert(&entry.obfuscated, &entry.real);
        }
        merged
    }
}

impl PartialEq for Mapping {
    /// Two mappings are equal when they hold the same pairs, in any order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|e| other.get(&e.obfuscated) == Some(e.real.as_str()))
    }
}

impl Eq for Mapping {}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<String>,
{
    /// Collects pairs; the first occurrence of a key wins.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_value() {
        let mut mapping = Mapping::new();
        assert!(mapping.insert("AAAAAAAAAAA", "First"));
        assert!(!mapping.insert("AAAAAAAAAAA", "Second"));
        assert_eq!(mapping.get("AAAAAAAAAAA"), Some("First"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mapping: Mapping = [("CCCCCCCCCCC", "c"), ("AAAAAAAAAAA", "a"), ("BBBBBBBBBBB", "b")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = mapping.iter().map(|e| e.obfuscated.as_str()).collect();
        assert_eq!(keys, vec!["CCCCCCCCCCC", "AAAAAAAAAAA", "BBBBBBBBBBB"]);
    }

    #[test]
    fn equality_ignores_order() {
        let a: Mapping = [("X", "1"), ("Y", "2")].into_iter().collect();
        let b: Mapping = [("Y", "2"), ("X", "1")].into_iter().collect();
        let c: Mapping = [("Y", "2"), ("X", "3")].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn overlay_updates_keeps_and_appends() {
        let cached: Mapping =
            [("AAAAAAAAAAA", "Old"), ("BBBBBBBBBBB", "Kept")].into_iter().collect();
        let fresh: Mapping =
            [("CCCCCCCCCCC", "Added"), ("AAAAAAAAAAA", "New")].into_iter().collect();

        let merged = cached.overlaid_with(&fresh);

        let pairs: Vec<(&str, &str)> =
            merged.iter().map(|e| (e.obfuscated.as_str(), e.real.as_str())).collect();
        assert_eq!(
            pairs,
            vec![("AAAAAAAAAAA", "New"), ("BBBBBBBBBBB", "Kept"), ("CCCCCCCCCCC", "Added")]
        );
    }
}
