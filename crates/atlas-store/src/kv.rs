//! The byte-level read/write surface shared by the store and transactions.

use crate::error::StoreResult;

/// Read/write access to the key-value space.
///
/// Implemented by both [`MemoryStore`](crate::MemoryStore) (operations
/// commit immediately, one per call) and [`Transaction`](crate::Transaction)
/// (operations stage until `commit`). Callers that accept an optional
/// ambient transaction take `Option<&dyn Kv>` and fall back to the store
/// itself when none is supplied.
pub trait Kv: Send + Sync {
    /// Read the value stored at `key`, if any.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Returns `true` if a value is stored at `key`.
    fn exists(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Write `value` at `key`, replacing any existing value.
    fn put(&self, key: &[u8], value: Vec<u8>) -> StoreResult<()>;

    /// Remove the value at `key`. Removing an absent key is a no-op.
    fn delete(&self, key: &[u8]) -> StoreResult<()>;
}
