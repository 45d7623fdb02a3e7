//! Canonical country-name alias table.

use crate::utils::config::DEFAULT_COUNTRY_ALIASES;
use std::collections::HashMap;

/// Immutable mapping from a source label to its canonical label
///
/// The statistics tables and the world boundary data spell some countries
/// differently; the table reconciles them so map joins line up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Empty table (every name passes through)
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the built-in country fixes
    pub fn with_defaults() -> Self {
        Self::from_pairs(DEFAULT_COUNTRY_ALIASES.iter().copied())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        table.extend(pairs);
        table
    }

    /// Add entries, later entries replace earlier ones with the same source
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Canonical form of `name`, or `name` itself when unmapped
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
