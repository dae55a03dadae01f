//! Flat string-keyed storage backing the session cache

use std::collections::HashMap;

/// A key-value mapping that lives as long as the browsing session
pub trait SessionStorage: Send {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: String);
}

/// In-process storage; dropped with the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "one".into());
        storage.set("k", "two".into());
        assert_eq!(storage.get("k").as_deref(), Some("two"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get("nope").is_none());
        assert!(storage.is_empty());
    }
}
