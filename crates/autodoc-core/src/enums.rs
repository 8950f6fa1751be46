//! Enumeration registry
//!
//! Fields carrying an `enum_key` get their legal tokens appended to the note.
//! The tokens come from whatever registry the caller hands to the walker.

use std::collections::BTreeMap;

/// Source of legal token lists for enumerations
pub trait EnumRegistry {
    /// Ordered tokens for `key`, or `None` when the key is unknown
    fn tokens(&self, key: &str) -> Option<Vec<String>>;
}

impl<F> EnumRegistry for F
where
    F: Fn(&str) -> Option<Vec<String>>,
{
    fn tokens(&self, key: &str) -> Option<Vec<String>> {
        self(key)
    }
}

/// In-memory registry keyed by enumeration name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl EnumTable {
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register (or replace) the tokens for `key`
    pub fn insert<I, S>(&mut self, key: impl Into<String>, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(key.into(), tokens.into_iter().map(Into::into).collect());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with<I, S>(mut self, key: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, tokens);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EnumRegistry for EnumTable {
    fn tokens(&self, key: &str) -> Option<Vec<String>> {
        self.entries.get(key).cloned()
    }
}

impl From<BTreeMap<String, Vec<String>>> for EnumTable {
    fn from(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        let table = EnumTable::new().with("status", ["OK", "FAIL"]);
        assert_eq!(
            table.tokens("status"),
            Some(vec!["OK".to_string(), "FAIL".to_string()])
        );
        assert_eq!(table.tokens("color"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_closure_registry() {
        let registry = |key: &str| (key == "level").then(|| vec!["low".to_string()]);
        assert_eq!(registry.tokens("level"), Some(vec!["low".to_string()]));
        assert!(registry.tokens("other").is_none());
    }
}
