use std::collections::HashMap;
use std::sync::Arc;

use omnibar_api_types::ResultSet;

/// Results keyed by the exact query string that produced them.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<String, Arc<ResultSet>>,
}

impl ResultCache {
    pub fn get(&self, query: &str) -> Option<Arc<ResultSet>> {
        self.entries.get(query).cloned()
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    pub fn insert(&mut self, query: String, results: Arc<ResultSet>) {
        self.entries.insert(query, results);
    }

    pub fn remove(&mut self, query: &str) -> Option<Arc<ResultSet>> {
        self.entries.remove(query)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
