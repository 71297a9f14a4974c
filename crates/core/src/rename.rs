use crate::names::generate_name;
use crate::symbols;
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Persistent mapping from original identifiers to their obfuscated names.
///
/// Entries are created lazily on first sight and never change afterwards, so an
/// identifier keeps the same name across every `process` call made with the
/// owning obfuscator. Protected symbols (see [`symbols::is_protected`]) are refused.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RenameTable {
    entries: BTreeMap<String, String>,
    #[serde(skip)]
    issued: HashSet<String>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the obfuscated name for `original`, if one has been assigned.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    pub fn contains(&self, original: &str) -> bool {
        self.entries.contains_key(original)
    }

    /// Returns the existing name for `original` or assigns a fresh one.
    ///
    /// Returns `None` for protected symbols, which never enter the table.
    pub fn assign<R: Rng>(&mut self, original: &str, rng: &mut R) -> Option<&str> {
        if symbols::is_protected(original) {
            return None;
        }
        if !self.entries.contains_key(original) {
            let name = self.fresh_name(rng);
            self.entries.insert(original.to_string(), name);
        }
        self.get(original)
    }

    fn fresh_name<R: Rng>(&mut self, rng: &mut R) -> String {
        loop {
            let candidate = generate_name(rng);
            if !self.entries.contains_key(&candidate) && self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(original, obfuscated)` pairs in original-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
