//! Typed tables: one kind's entries over the byte-level store.

use std::marker::PhantomData;
use std::sync::Arc;

use atlas_types::EntityKey;
use tracing::debug;

use crate::cursor::{Cursor, CursorCloser};
use crate::entry::Entry;
use crate::error::{StoreError, StoreResult};
use crate::events::TableEvents;
use crate::kv::Kv;
use crate::memory::MemoryStore;

/// Typed access to one kind's entries.
///
/// A `Table` is a thin view over the shared store: it owns no data of its
/// own, and any number of tables (of the same or different kinds) may wrap
/// the same store. Every operation takes an optional ambient transaction
/// and falls back to the auto-committing store when none is supplied.
pub struct Table<E: Entry> {
    store: Arc<MemoryStore>,
    _entry: PhantomData<fn() -> E>,
}

impl<E: Entry> Clone for Table<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entry: PhantomData,
        }
    }
}

impl<E: Entry> Table<E> {
    /// Open the kind's table over the given store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            _entry: PhantomData,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Storage key prefix for this kind.
    pub(crate) fn prefix() -> Vec<u8> {
        format!("{}/", E::KIND).into_bytes()
    }

    /// Storage key for one entry.
    pub(crate) fn storage_key(key: &E::Key) -> Vec<u8> {
        format!("{}/{}", E::KIND, key.encode()).into_bytes()
    }

    fn kv<'a>(&'a self, tx: Option<&'a dyn Kv>) -> &'a dyn Kv {
        match tx {
            Some(kv) => kv,
            None => &*self.store,
        }
    }

    /// Read one entry, failing with [`StoreError::NotFound`] when absent.
    pub fn get(&self, tx: Option<&dyn Kv>, key: &E::Key) -> StoreResult<E> {
        let storage_key = Self::storage_key(key);
        let raw = self
            .kv(tx)
            .get(&storage_key)?
            .ok_or_else(|| StoreError::NotFound {
                key: String::from_utf8_lossy(&storage_key).into_owned(),
            })?;
        decode_value::<E>(&storage_key, &raw)
    }

    /// Returns `true` if an entry with the given key exists.
    pub fn exists(&self, tx: Option<&dyn Kv>, key: &E::Key) -> StoreResult<bool> {
        self.kv(tx).exists(&Self::storage_key(key))
    }

    /// Insert or replace an entry.
    pub fn put(&self, tx: Option<&dyn Kv>, entry: &E) -> StoreResult<()> {
        let value =
            serde_json::to_vec(entry).map_err(|err| StoreError::Serialization(err.to_string()))?;
        self.kv(tx).put(&Self::storage_key(&entry.key()), value)
    }

    /// Remove an entry, failing with [`StoreError::NotFound`] when absent.
    pub fn delete(&self, tx: Option<&dyn Kv>, key: &E::Key) -> StoreResult<()> {
        let kv = self.kv(tx);
        let storage_key = Self::storage_key(key);
        if !kv.exists(&storage_key)? {
            return Err(StoreError::NotFound {
                key: String::from_utf8_lossy(&storage_key).into_owned(),
            });
        }
        kv.delete(&storage_key)
    }

    /// Open a forward cursor over every entry of this kind, decoding each
    /// on demand.
    pub fn open_cursor(&self) -> EntryCursor<E> {
        EntryCursor {
            cursor: Cursor::new(Arc::clone(&self.store), Self::prefix()),
            _entry: PhantomData,
        }
    }

    /// Subscribe to this kind's per-commit change batches.
    pub fn subscribe(&self) -> TableEvents<E> {
        debug!(kind = E::KIND, "table subscription opened");
        TableEvents::new(self.store.subscribe())
    }
}

/// Decode a stored value, reporting failures as corruption.
pub(crate) fn decode_value<E: Entry>(storage_key: &[u8], raw: &[u8]) -> StoreResult<E> {
    serde_json::from_slice(raw).map_err(|err| StoreError::Corrupt {
        key: String::from_utf8_lossy(storage_key).into_owned(),
        reason: err.to_string(),
    })
}

/// A forward-only cursor yielding decoded entries of one kind.
///
/// A decode failure on any element fails the iteration immediately: a
/// malformed record signals a violated store invariant, not a recoverable
/// per-item condition.
pub struct EntryCursor<E: Entry> {
    cursor: Cursor,
    _entry: PhantomData<fn() -> E>,
}

impl<E: Entry> EntryCursor<E> {
    /// Pull and decode the next entry, or `None` at end-of-sequence.
    pub fn next(&mut self) -> StoreResult<Option<E>> {
        match self.cursor.next()? {
            Some((key, value)) => Ok(Some(decode_value::<E>(&key, &value)?)),
            None => Ok(None),
        }
    }

    /// Close the cursor. Idempotent.
    pub fn close(&self) {
        self.cursor.close();
    }

    /// A handle that can close this cursor from another thread.
    pub fn closer(&self) -> CursorCloser {
        self.cursor.closer()
    }
}
