// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory key-value store fake for testing without filesystem I/O.

use ringer_core::store::{KeyValueStore, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory implementation of [`KeyValueStore`] for testing.
///
/// Tracks call counts and can be told to fail reads or writes.
///
/// # Example
///
/// ```
/// use ringer_dry_tests::InMemoryKeyValueStore;
/// use ringer_core::SettingsRepository;
///
/// let store = InMemoryKeyValueStore::new();
/// let repo = SettingsRepository::new(store.clone());
///
/// repo.set_sim_ringtone("sim1", "default_3").unwrap();
/// assert_eq!(store.get_count(), 1);
/// assert_eq!(store.set_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<String, String>,
    get_count: usize,
    set_count: usize,
    remove_count: usize,
    fail_on_get: bool,
    fail_on_set: bool,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one key.
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_owned(), value.to_owned());
        store
    }

    /// Make `get_item` fail.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.lock().fail_on_get = fail;
    }

    /// Make `set_item` and `remove_item` fail.
    pub fn set_fail_on_set(&self, fail: bool) {
        self.lock().fail_on_set = fail;
    }

    /// Number of `get_item` attempts, failed ones included.
    pub fn get_count(&self) -> usize {
        self.lock().get_count
    }

    /// Number of `set_item` attempts, failed ones included.
    pub fn set_count(&self) -> usize {
        self.lock().set_count
    }

    /// Number of `remove_item` attempts, failed ones included.
    pub fn remove_count(&self) -> usize {
        self.lock().remove_count
    }

    /// Raw stored value, bypassing counters.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().data.get(key).cloned()
    }

    /// Overwrite a raw value, bypassing counters and failure flags.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.lock().data.insert(key.to_owned(), value.to_owned());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut inner = self.lock();
        inner.get_count += 1;
        if inner.fail_on_get {
            return Err(StoreError::Other("simulated read failure".into()));
        }
        Ok(inner.data.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.set_count += 1;
        if inner.fail_on_set {
            return Err(StoreError::Other("simulated write failure".into()));
        }
        inner.data.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.remove_count += 1;
        if inner.fail_on_set {
            return Err(StoreError::Other("simulated write failure".into()));
        }
        inner.data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_set_get() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.set_count(), 1);
        assert_eq!(store.get_count(), 1);
    }

    #[test]
    fn missing_key_is_none_not_error() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.get_item("missing").unwrap().is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let store = InMemoryKeyValueStore::with_item("k", "v");
        store.remove_item("k").unwrap();
        store.remove_item("k").unwrap();
        assert!(store.raw("k").is_none());
        assert_eq!(store.remove_count(), 2);
    }

    #[test]
    fn failed_write_keeps_previous_value_and_still_counts() {
        let store = InMemoryKeyValueStore::with_item("k", "old");
        store.set_fail_on_set(true);
        assert!(store.set_item("k", "new").is_err());
        assert!(store.remove_item("k").is_err());
        assert_eq!(store.raw("k").as_deref(), Some("old"));
        assert_eq!(store.set_count(), 1);
    }

    #[test]
    fn fail_on_get_can_be_toggled() {
        let store = InMemoryKeyValueStore::with_item("k", "v");
        store.set_fail_on_get(true);
        assert!(store.get_item("k").is_err());
        store.set_fail_on_get(false);
        assert!(store.get_item("k").is_ok());
    }

    #[test]
    fn clone_shares_state_between_instances() {
        let a = InMemoryKeyValueStore::new();
        let b = a.clone();
        a.set_item("shared", "1").unwrap();
        assert_eq!(b.get_item("shared").unwrap().as_deref(), Some("1"));
        assert_eq!(b.set_count(), 1);
    }
}
