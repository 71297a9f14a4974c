use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Option naming the obfuscator's configured encryption key.
pub const ENCRYPTION_KEY: &str = "encryptionKey";
/// Option naming a per-call key override.
pub const KEY: &str = "key";
/// Key used when no `encryptionKey` option is configured.
pub const DEFAULT_ENCRYPTION_KEY: &str = "default_encryption_key_32_chars_";

/// String-valued options keyed by name, as accepted by the obfuscator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<String, String>);

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn encryption_key(&self) -> Option<&str> {
        self.get(ENCRYPTION_KEY)
    }

    pub fn key(&self) -> Option<&str> {
        self.get(KEY)
    }

    /// Fills in [`DEFAULT_ENCRYPTION_KEY`] if no encryption key is set.
    pub fn ensure_encryption_key(&mut self) {
        self.0
            .entry(ENCRYPTION_KEY.to_string())
            .or_insert_with(|| DEFAULT_ENCRYPTION_KEY.to_string());
    }

    /// Overlays `other` on top of `self`; values in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
