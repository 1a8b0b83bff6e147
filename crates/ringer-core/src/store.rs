// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Key-value storage port for opaque string values.

use std::sync::Arc;
use thiserror::Error;

/// Durable string storage keyed by name.
///
/// Every operation touches a single key; there is no transaction across
/// keys. Implementations decide where the bytes live (secure file store,
/// local single-file store, memory).
pub trait KeyValueStore {
    /// Read the value for `key`. Returns `Ok(None)` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Write `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Delete `key`. Deleting an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure of the backend's own format.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Backend could not be initialised on this runtime.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

impl<S> KeyValueStore for &S
where
    S: KeyValueStore + ?Sized,
{
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

impl<S> KeyValueStore for Box<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}
