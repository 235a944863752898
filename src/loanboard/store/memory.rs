use super::{DataStore, DocumentKey};
use crate::error::{CatalogError, Result};
use std::collections::HashMap;

/// In-memory storage for testing. Nothing is persisted.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: HashMap<DocumentKey, String>,
    simulate_write_error: bool,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl DataStore for InMemoryStore {
    fn read(&self, key: DocumentKey) -> Result<Option<String>> {
        Ok(self.documents.get(&key).cloned())
    }

    fn write(&mut self, key: DocumentKey, content: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(CatalogError::Store("Simulated write error".to_string()));
        }
        self.documents.insert(key, content.to_string());
        self.writes += 1;
        Ok(())
    }
}
