//! Hash Store
//!
//! Maps a hash name to an inner field → value map. Inner maps are created
//! lazily by the first HSET on a name and are never removed.
//!
//! The whole table sits behind one `RwLock`, independent of the string
//! store's lock. `hgetall` copies the pairs out while the read lock is held,
//! so the snapshot reflects a single point in time.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

type Fields = HashMap<Bytes, Bytes>;

/// The hash-of-hashes table used by HSET, HGET and HGETALL.
#[derive(Debug, Default)]
pub struct HashStore {
    data: RwLock<HashMap<Bytes, Fields>>,
}

impl HashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` at `(hash, field)`, creating the hash if needed.
    ///
    /// Returns `true` if the field did not exist before.
    pub fn hset(&self, hash: Bytes, field: Bytes, value: Bytes) -> bool {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.entry(hash).or_default().insert(field, value).is_none()
    }

    /// Returns the value at `(hash, field)`, or `None` if either is missing.
    pub fn hget(&self, hash: &[u8], field: &[u8]) -> Option<Bytes> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.get(hash)?.get(field).cloned()
    }

    /// Returns a snapshot of every `(field, value)` pair in `hash`, in no
    /// particular order. A hash that was never written yields an empty vector.
    pub fn hgetall(&self, hash: &[u8]) -> Vec<(Bytes, Bytes)> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.get(hash)
            .map(|fields| {
                fields
                    .iter()
                    .map(|(field, value)| (field.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of fields in `hash` (0 when absent).
    pub fn field_count(&self, hash: &[u8]) -> usize {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.get(hash).map_or(0, HashMap::len)
    }

    /// Number of hashes stored.
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

#[cfg(test)]
impl HashStore {
    /// Takes the table's write lock, for tests that need to hold it.
    pub(crate) fn data_lock_for_test(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<Bytes, Fields>> {
        self.data.write().unwrap()
    }
}
