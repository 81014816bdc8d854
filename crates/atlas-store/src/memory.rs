//! In-memory transactional store for tests, local demos, and embedding.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tracing::debug;

use crate::change::{CommitBatch, RawOp, Variant};
use crate::error::{StoreError, StoreResult};
use crate::kv::Kv;

/// Default capacity of the commit-batch broadcast channel.
const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// In-memory, BTreeMap-backed transactional store.
///
/// All entries live behind a `RwLock`. The store serves arbitrarily many
/// concurrent transactions: reads are versioned, and
/// [`Transaction::commit`](crate::Transaction::commit) validates its read
/// set against current versions, so the first committer wins and later
/// conflicting commits fail.
///
/// Every commit publishes its ordered [`CommitBatch`] on a broadcast
/// channel. Operations invoked directly on the store (through [`Kv`])
/// commit immediately as single-operation batches.
pub struct MemoryStore {
    inner: RwLock<Inner>,
    events: broadcast::Sender<Arc<CommitBatch>>,
}

#[derive(Default)]
struct Inner {
    entries: BTreeMap<Vec<u8>, Versioned>,
    commit_seq: u64,
}

#[derive(Clone)]
struct Versioned {
    value: Vec<u8>,
    /// Sequence number of the commit that wrote this value.
    version: u64,
}

impl MemoryStore {
    /// Create an empty store with the default event-channel capacity.
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create an empty store with an explicit event-channel capacity.
    ///
    /// Subscribers that fall more than `capacity` commit batches behind
    /// observe [`StoreError::Lagged`] instead of silently missing batches.
    pub fn with_event_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity);
        Self {
            inner: RwLock::new(Inner::default()),
            events,
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").entries.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock poisoned").entries.is_empty()
    }

    /// Sequence number of the most recent commit.
    pub fn commit_seq(&self) -> u64 {
        self.inner.read().expect("lock poisoned").commit_seq
    }

    /// Subscribe to the raw commit-batch stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<CommitBatch>> {
        self.events.subscribe()
    }

    /// Read a value along with the version of the commit that wrote it.
    pub(crate) fn read_versioned(&self, key: &[u8]) -> Option<(Vec<u8>, u64)> {
        let inner = self.inner.read().expect("lock poisoned");
        inner
            .entries
            .get(key)
            .map(|v| (v.value.clone(), v.version))
    }

    /// First entry with the given prefix strictly after `resume` (or the
    /// first prefixed entry when `resume` is `None`).
    pub(crate) fn next_after(
        &self,
        prefix: &[u8],
        resume: Option<&[u8]>,
    ) -> Option<(Vec<u8>, Vec<u8>)> {
        let inner = self.inner.read().expect("lock poisoned");
        let lower = match resume {
            Some(last) => Bound::Excluded(last.to_vec()),
            None => Bound::Included(prefix.to_vec()),
        };
        inner
            .entries
            .range((lower, Bound::Unbounded))
            .next()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.value.clone()))
    }

    /// Validate a read set and apply staged operations atomically.
    ///
    /// `reads` pairs each key read from the base store with the version
    /// observed at read time (`None` for absent keys); a mismatch against
    /// the current version fails the whole commit with
    /// [`StoreError::Conflict`] before anything is applied.
    pub(crate) fn apply_commit(
        &self,
        reads: &[(Vec<u8>, Option<u64>)],
        ops: Vec<RawOp>,
    ) -> StoreResult<u64> {
        let mut inner = self.inner.write().expect("lock poisoned");

        for (key, seen) in reads {
            let current = inner.entries.get(key).map(|v| v.version);
            if current != *seen {
                return Err(StoreError::Conflict {
                    key: String::from_utf8_lossy(key).into_owned(),
                });
            }
        }

        let seq = inner.commit_seq + 1;
        let mut applied = Vec::with_capacity(ops.len());
        for op in ops {
            match op.variant {
                Variant::Set => {
                    let value = op.value.unwrap_or_default();
                    inner.entries.insert(
                        op.key.clone(),
                        Versioned {
                            value: value.clone(),
                            version: seq,
                        },
                    );
                    applied.push(RawOp {
                        variant: Variant::Set,
                        key: op.key,
                        value: Some(value),
                    });
                }
                Variant::Delete => {
                    // Deleting an absent key applies as a no-op and emits
                    // no change record.
                    if let Some(prev) = inner.entries.remove(&op.key) {
                        applied.push(RawOp {
                            variant: Variant::Delete,
                            key: op.key,
                            value: Some(prev.value),
                        });
                    }
                }
            }
        }

        if applied.is_empty() {
            return Ok(inner.commit_seq);
        }
        inner.commit_seq = seq;
        drop(inner);

        debug!(seq, ops = applied.len(), "commit applied");
        // No receivers is fine; the batch is simply unobserved.
        let _ = self.events.send(Arc::new(CommitBatch { seq, ops: applied }));
        Ok(seq)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Kv for MemoryStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.entries.get(key).map(|v| v.value.clone()))
    }

    fn exists(&self, key: &[u8]) -> StoreResult<bool> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.entries.contains_key(key))
    }

    fn put(&self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.apply_commit(
            &[],
            vec![RawOp {
                variant: Variant::Set,
                key: key.to_vec(),
                value: Some(value),
            }],
        )?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StoreResult<()> {
        self.apply_commit(
            &[],
            vec![RawOp {
                variant: Variant::Delete,
                key: key.to_vec(),
                value: None,
            }],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .field("commit_seq", &self.commit_seq())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete() {
        let store = MemoryStore::new();
        store.put(b"a", b"1".to_vec()).unwrap();
        assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert!(store.exists(b"a").unwrap());

        store.delete(b"a").unwrap();
        assert_eq!(store.get(b"a").unwrap(), None);
        assert!(!store.exists(b"a").unwrap());
    }

    #[test]
    fn direct_ops_commit_one_batch_each() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();

        store.put(b"a", b"1".to_vec()).unwrap();
        store.put(b"a", b"2".to_vec()).unwrap();

        let first = rx.try_recv().unwrap();
        assert_eq!(first.seq, 1);
        assert_eq!(first.ops.len(), 1);
        assert_eq!(first.ops[0].variant, Variant::Set);

        let second = rx.try_recv().unwrap();
        assert_eq!(second.seq, 2);
    }

    #[test]
    fn delete_batch_carries_prior_value() {
        let store = MemoryStore::new();
        store.put(b"a", b"old".to_vec()).unwrap();

        let mut rx = store.subscribe();
        store.delete(b"a").unwrap();

        let batch = rx.try_recv().unwrap();
        assert_eq!(batch.ops[0].variant, Variant::Delete);
        assert_eq!(batch.ops[0].value, Some(b"old".to_vec()));
    }

    #[test]
    fn deleting_absent_key_emits_nothing() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();
        store.delete(b"missing").unwrap();
        assert!(rx.try_recv().is_err());
        assert_eq!(store.commit_seq(), 0);
    }

    #[test]
    fn next_after_walks_prefix_in_order() {
        let store = MemoryStore::new();
        store.put(b"rack/1", b"a".to_vec()).unwrap();
        store.put(b"rack/2", b"b".to_vec()).unwrap();
        store.put(b"task/1", b"c".to_vec()).unwrap();

        let (k1, _) = store.next_after(b"rack/", None).unwrap();
        assert_eq!(k1, b"rack/1");
        let (k2, _) = store.next_after(b"rack/", Some(&k1)).unwrap();
        assert_eq!(k2, b"rack/2");
        assert!(store.next_after(b"rack/", Some(&k2)).is_none());
    }
}
