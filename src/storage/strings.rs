//! String Store
//!
//! A flat key → value map guarded by a single reader/writer lock.
//! Writers hold the lock only for the map mutation itself; readers clone the
//! value out (a cheap `Bytes` reference-count bump) and release it.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// The key → value table used by SET and GET.
#[derive(Debug, Default)]
pub struct StringStore {
    data: RwLock<HashMap<Bytes, Bytes>>,
}

impl StringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` at `key`, overwriting any previous value.
    ///
    /// Returns `true` if a new key was created, `false` if an existing key was updated.
    pub fn set(&self, key: Bytes, value: Bytes) -> bool {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.insert(key, value).is_none()
    }

    /// Gets the value for a key, or `None` if it was never set.
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.get(key).cloned()
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
