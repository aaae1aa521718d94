//! In-memory JSON document store.

use dashmap::DashMap;
use serde_json::Value;

/// A named, concurrently accessible map of id → JSON document.
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    documents: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, id: &str) -> Option<Value> {
        self.documents.get(id).map(|r| r.value().clone())
    }

    /// Insert or replace; returns the previous document.
    pub fn put(&self, id: &str, document: Value) -> Option<Value> {
        self.documents.insert(id.to_string(), document)
    }

    pub fn remove(&self, id: &str) -> Option<Value> {
        self.documents.remove(id).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_operations() {
        let store = MemoryStore::new("primary");
        assert_eq!(store.name(), "primary");
        assert!(store.get("1").is_none());

        assert!(store.put("1", json!({"title": "first"})).is_none());
        assert_eq!(store.get("1"), Some(json!({"title": "first"})));

        let previous = store.put("1", json!({"title": "second"}));
        assert_eq!(previous, Some(json!({"title": "first"})));
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove("1"), Some(json!({"title": "second"})));
        assert!(store.is_empty());
        assert!(store.remove("1").is_none());
    }
}
