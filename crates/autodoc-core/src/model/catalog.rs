//! Name-keyed registry of model descriptions
//!
//! Manifests register their models here and reference them with
//! [`StructRef::Named`](super::StructRef::Named).

use super::StructDesc;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registered models keyed by declared name
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: BTreeMap<String, Arc<StructDesc>>,
}

impl ModelCatalog {
    pub const fn new() -> Self {
        Self {
            models: BTreeMap::new(),
        }
    }

    /// Register a named model. Anonymous shapes cannot be registered.
    pub fn insert(&mut self, desc: StructDesc) -> Result<()> {
        let name = desc
            .name
            .clone()
            .ok_or_else(|| Error::manifest("anonymous models cannot be registered by name"))?;
        if self.models.contains_key(&name) {
            return Err(Error::DuplicateModel { name });
        }
        self.models.insert(name, Arc::new(desc));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<StructDesc>> {
        self.models.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut catalog = ModelCatalog::new();
        catalog.insert(StructDesc::named("shop", "Order")).unwrap();

        assert!(catalog.contains("Order"));
        assert_eq!(catalog.get("Order").unwrap().identity(), "shop::Order");
        assert!(catalog.get("Missing").is_none());
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Order"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = ModelCatalog::new();
        catalog.insert(StructDesc::named("a", "Item")).unwrap();
        let err = catalog.insert(StructDesc::named("b", "Item")).unwrap_err();
        assert!(matches!(err, Error::DuplicateModel { ref name } if name == "Item"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_anonymous_rejected() {
        let mut catalog = ModelCatalog::new();
        assert!(catalog.insert(StructDesc::anonymous()).is_err());
        assert!(catalog.is_empty());
    }
}
