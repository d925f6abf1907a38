//! Parameter entries and the insertion-ordered parameter dictionary
//!
//! A [`ParamDict`] is built up from several sources (config files, command
//! line overrides, provenance fields) and then serialized into the generated
//! header in iteration order. Iteration order is insertion order, so identical
//! inputs always produce identical output.

pub mod decode;

pub use decode::{
    decode_cfg_line, decode_header_line, parse_cfg, parse_header, read_cfg_file, PARAM_MACRO,
};

use indexmap::IndexMap;

/// A single `name = value` parameter.
///
/// The value is kept verbatim, including any embedded quoting such as
/// `"literal"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamEntry {
    pub name: String,
    pub value: String,
}

impl ParamEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// How [`ParamDict::merge`] treats names that already exist in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Existing values win; only new names are added.
    KeepExisting,
    /// Incoming values replace existing ones.
    Overwrite,
}

/// Mapping from parameter name to value, ordered by first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamDict {
    entries: IndexMap<String, String>,
}

impl ParamDict {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the value for a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Check if a name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert or replace a value, returning the previous one.
    ///
    /// Replacing keeps the entry at its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    /// Insert a value at the end of the dictionary, dropping any existing
    /// entry with the same name first.
    pub fn insert_last(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let name = name.into();
        let previous = self.entries.shift_remove(&name);
        self.entries.insert(name, value.into());
        previous
    }

    /// Remove an entry, preserving the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.shift_remove(name)
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Merge `source` into `self`.
    ///
    /// Names missing from `self` are appended in `source` order. Names that
    /// already exist are replaced only under [`MergePolicy::Overwrite`].
    pub fn merge(&mut self, source: &ParamDict, policy: MergePolicy) -> &mut Self {
        for (name, value) in source.iter() {
            match self.entries.get_mut(name) {
                Some(existing) => {
                    if policy == MergePolicy::Overwrite {
                        *existing = value.to_string();
                    }
                }
                None => {
                    self.entries.insert(name.to_string(), value.to_string());
                }
            }
        }
        self
    }

    /// Count names whose value differs between `self` and `other`, including
    /// names present in only one of them.
    pub fn count_changes(&self, other: &ParamDict) -> usize {
        let changed_or_removed =
            self.iter().filter(|(name, value)| other.get(name) != Some(*value)).count();
        let added = other.names().filter(|name| !self.contains(name)).count();
        changed_or_removed + added
    }
}

impl FromIterator<ParamEntry> for ParamDict {
    /// Later entries with the same name replace earlier ones.
    fn from_iter<I: IntoIterator<Item = ParamEntry>>(iter: I) -> Self {
        let mut dict = ParamDict::new();
        for entry in iter {
            dict.insert(entry.name, entry.value);
        }
        dict
    }
}
