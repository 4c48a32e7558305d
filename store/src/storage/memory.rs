//! In-process storage backend

use super::Storage;
use crate::error::StoreResult;
use std::cell::RefCell;
use std::collections::HashMap;

/// Storage held in a map; never fails
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Store a document as-is, bypassing serialization
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get_raw(key))
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.insert_raw(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("a").unwrap(), None);

        storage.write("a", "[1]").unwrap();
        storage.write("a", "[2]").unwrap();
        assert_eq!(storage.read("a").unwrap().as_deref(), Some("[2]"));
        assert_eq!(storage.len(), 1);
    }
}
