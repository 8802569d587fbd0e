//! Preference store seam
//!
//! The persistent key-value store is an external collaborator; this crate
//! only needs typed get/set/contains/remove on primitive values. Hosts adapt
//! their native store behind [`PreferenceStore`]. [`MemoryStore`] is the
//! in-crate implementation used by tests and by hosts without a native store.

use std::collections::BTreeMap;

/// Typed access to the persistent preference store.
///
/// Writes are expected to be applied immediately from this crate's point of
/// view; read-modify-write coordination with other writers is the host's
/// concern.
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: &str);
    fn get_int(&self, key: &str) -> Option<i64>;
    fn set_int(&mut self, key: &str, value: i64);
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn set_bool(&mut self, key: &str, value: bool);
    fn contains(&self, key: &str) -> bool;
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, PartialEq)]
enum StoredValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// In-memory [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(StoredValue::Str(v)) => Some(v.clone()),
            _ => None,
        }
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), StoredValue::Str(value.to_string()));
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(StoredValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), StoredValue::Int(value));
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(StoredValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.values
            .insert(key.to_string(), StoredValue::Bool(value));
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_by_type() {
        let mut store = MemoryStore::new();
        store.set_string("s", "value");
        store.set_int("i", 9);
        store.set_bool("b", true);

        assert_eq!(store.get_string("s").as_deref(), Some("value"));
        assert_eq!(store.get_int("i"), Some(9));
        assert_eq!(store.get_bool("b"), Some(true));
    }

    #[test]
    fn type_mismatch_reads_as_unset() {
        let mut store = MemoryStore::new();
        store.set_int("x", 1);
        assert_eq!(store.get_string("x"), None);
        assert!(store.contains("x"));
    }

    #[test]
    fn overwrite_changes_type() {
        let mut store = MemoryStore::new();
        store.set_int("x", 1);
        store.set_string("x", "one");
        assert_eq!(store.get_int("x"), None);
        assert_eq!(store.get_string("x").as_deref(), Some("one"));
    }

    #[test]
    fn remove_clears_key() {
        let mut store = MemoryStore::new();
        store.set_bool("x", false);
        store.remove("x");
        assert!(!store.contains("x"));
        assert_eq!(store.get_bool("x"), None);
    }
}
