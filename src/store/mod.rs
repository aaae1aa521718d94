//! Backing-store handles.
//!
//! The router never interprets these; middleware places one in the request
//! context and handlers read it back. Synchronization is the store's own job.

pub mod memory;

use dashmap::DashMap;
use std::sync::Arc;

pub use memory::MemoryStore;

/// Name → store, shared by the store-switch middleware and the config watcher.
#[derive(Debug, Clone, Default)]
pub struct StoreRegistry {
    stores: Arc<DashMap<String, Arc<MemoryStore>>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with one empty store per name.
    pub fn with_names<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        let registry = Self::new();
        for name in names {
            registry.ensure(name);
        }
        registry
    }

    /// Return the store called `name`, creating it if needed.
    pub fn ensure(&self, name: &str) -> Arc<MemoryStore> {
        self.stores
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::info!(store = %name, "Backing store created");
                Arc::new(MemoryStore::new(name))
            })
            .value()
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<Arc<MemoryStore>> {
        self.stores.get(name).map(|r| r.value().clone())
    }

    /// Sorted store names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.stores.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_shares_handles() {
        let registry = StoreRegistry::with_names(&["primary".to_string(), "archive".to_string()]);
        assert_eq!(registry.names(), vec!["archive", "primary"]);

        let a = registry.get("primary").unwrap();
        let b = registry.clone().ensure("primary");
        a.put("1", json!(1));
        assert_eq!(b.get("1"), Some(json!(1)));
        assert!(Arc::ptr_eq(&a, &b));

        assert!(registry.get("missing").is_none());
    }
}
