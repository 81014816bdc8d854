//! Transactions: staged operations with optimistic conflict validation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::change::{RawOp, Variant};
use crate::error::StoreResult;
use crate::kv::Kv;
use crate::memory::MemoryStore;

/// An in-flight transaction over a [`MemoryStore`].
///
/// Operations stage in order — multiple writes to the same key all stay in
/// the log, exactly as issued — and apply atomically at [`commit`].
/// Reads see the transaction's own staged writes first, then the base
/// store; each base read records the version it observed, and `commit`
/// fails with a conflict error if any of those versions moved underneath
/// the transaction. Dropping the transaction (or calling [`rollback`])
/// discards everything.
///
/// [`commit`]: Transaction::commit
/// [`rollback`]: Transaction::rollback
pub struct Transaction {
    store: Arc<MemoryStore>,
    state: Mutex<TxState>,
}

#[derive(Default)]
struct TxState {
    /// Staged operations in issue order.
    ops: Vec<RawOp>,
    /// Version observed at first base read of each key (`None` = absent).
    reads: HashMap<Vec<u8>, Option<u64>>,
}

impl Transaction {
    /// Open a transaction over the given store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            state: Mutex::new(TxState::default()),
        }
    }

    /// Number of staged operations.
    pub fn staged(&self) -> usize {
        self.state.lock().expect("lock poisoned").ops.len()
    }

    /// Validate reads and apply all staged operations atomically.
    ///
    /// Returns the commit's sequence number. On conflict, nothing is
    /// applied and the error carries the first invalidated key.
    pub fn commit(self) -> StoreResult<u64> {
        let state = self.state.into_inner().expect("lock poisoned");
        let reads: Vec<_> = state.reads.into_iter().collect();
        self.store.apply_commit(&reads, state.ops)
    }

    /// Discard all staged operations. Equivalent to dropping.
    pub fn rollback(self) {
        let state = self.state.lock().expect("lock poisoned");
        debug!(ops = state.ops.len(), "transaction rolled back");
    }
}

impl Kv for Transaction {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let mut state = self.state.lock().expect("lock poisoned");

        // The transaction's own writes win over the base store.
        for op in state.ops.iter().rev() {
            if op.key == key {
                return Ok(match op.variant {
                    Variant::Set => op.value.clone(),
                    Variant::Delete => None,
                });
            }
        }

        let read = self.store.read_versioned(key);
        state
            .reads
            .entry(key.to_vec())
            .or_insert(read.as_ref().map(|(_, version)| *version));
        Ok(read.map(|(value, _)| value))
    }

    fn put(&self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        let mut state = self.state.lock().expect("lock poisoned");
        state.ops.push(RawOp {
            variant: Variant::Set,
            key: key.to_vec(),
            value: Some(value),
        });
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StoreResult<()> {
        let mut state = self.state.lock().expect("lock poisoned");
        state.ops.push(RawOp {
            variant: Variant::Delete,
            key: key.to_vec(),
            value: None,
        });
        Ok(())
    }
}
