//! Abstract storage for the CBC token ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements
//! [`PersistentStore`]. The ledger depends only on the trait.

pub mod batch;
pub mod error;

pub use batch::{BatchOp, WriteBatch};
pub use error::StoreError;

use std::sync::Arc;

/// A durable mapping from byte keys to byte values.
///
/// Single-key writes are atomic. [`PersistentStore::commit`] applies a whole
/// [`WriteBatch`] atomically: either every operation becomes visible or none does.
pub trait PersistentStore {
    /// Read a value. Absent keys return `Ok(None)`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Remove a key. Deleting an absent key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// Apply every operation in `batch` in order, as one atomic write.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// All entries whose key starts with `prefix`, in key order.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;

    fn exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        self.get(key).map(|v| v.is_some())
    }
}

impl<T: PersistentStore + ?Sized> PersistentStore for Arc<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        (**self).commit(batch)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        (**self).scan_prefix(prefix)
    }
}
