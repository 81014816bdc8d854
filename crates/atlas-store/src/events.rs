//! Per-kind change subscriptions over the raw commit stream.

use std::marker::PhantomData;
use std::sync::Arc;

use atlas_types::EntityKey;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use crate::change::{Change, CommitBatch};
use crate::entry::Entry;
use crate::error::{StoreError, StoreResult};
use crate::table::{decode_value, Table};

/// The decoded changes one commit applied to a single kind's table.
///
/// Changes appear in the exact order the transaction staged them.
#[derive(Clone, Debug)]
pub struct TableCommit<E: Entry> {
    /// Sequence number of the originating commit.
    pub seq: u64,
    /// This kind's changes, in staging order.
    pub changes: Vec<Change<E::Key, E>>,
}

/// A subscription to one kind's per-commit change batches.
///
/// Each received [`TableCommit`] corresponds to exactly one committed
/// transaction; batches arrive in commit order, and commits that touched
/// no entry of this kind are skipped. Dropping the subscription
/// unsubscribes; already-delivered batches are never retracted.
///
/// A subscriber that falls behind the store's bounded broadcast channel
/// observes [`StoreError::Lagged`] instead of silently missing batches.
pub struct TableEvents<E: Entry> {
    rx: broadcast::Receiver<Arc<CommitBatch>>,
    _entry: PhantomData<fn() -> E>,
}

impl<E: Entry> TableEvents<E> {
    pub(crate) fn new(rx: broadcast::Receiver<Arc<CommitBatch>>) -> Self {
        Self {
            rx,
            _entry: PhantomData,
        }
    }

    /// Wait for the next commit that changed this kind's table.
    ///
    /// Returns `Ok(None)` once the store is dropped and the stream is
    /// drained.
    pub async fn recv(&mut self) -> StoreResult<Option<TableCommit<E>>> {
        loop {
            match self.rx.recv().await {
                Ok(batch) => {
                    if let Some(commit) = decode_batch::<E>(&batch)? {
                        return Ok(Some(commit));
                    }
                }
                Err(RecvError::Closed) => return Ok(None),
                Err(RecvError::Lagged(skipped)) => {
                    return Err(StoreError::Lagged { skipped })
                }
            }
        }
    }

    /// Drain the next pending commit without waiting.
    ///
    /// Returns `Ok(None)` when no batch is pending.
    pub fn try_recv(&mut self) -> StoreResult<Option<TableCommit<E>>> {
        loop {
            match self.rx.try_recv() {
                Ok(batch) => {
                    if let Some(commit) = decode_batch::<E>(&batch)? {
                        return Ok(Some(commit));
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(None),
                Err(TryRecvError::Lagged(skipped)) => {
                    return Err(StoreError::Lagged { skipped })
                }
            }
        }
    }
}

/// Project a raw commit batch onto one kind's table, preserving order.
fn decode_batch<E: Entry>(batch: &CommitBatch) -> StoreResult<Option<TableCommit<E>>> {
    let prefix = Table::<E>::prefix();
    let mut changes = Vec::new();
    for op in &batch.ops {
        if !op.key.starts_with(&prefix) {
            continue;
        }
        let raw_key = std::str::from_utf8(&op.key[prefix.len()..]).map_err(|err| {
            StoreError::Corrupt {
                key: String::from_utf8_lossy(&op.key).into_owned(),
                reason: err.to_string(),
            }
        })?;
        let key = E::Key::decode(raw_key).map_err(|err| StoreError::Corrupt {
            key: raw_key.to_string(),
            reason: err.to_string(),
        })?;
        let raw_value = op.value.as_ref().ok_or_else(|| StoreError::Corrupt {
            key: raw_key.to_string(),
            reason: "change record carries no value".to_string(),
        })?;
        changes.push(Change {
            variant: op.variant,
            key,
            value: decode_value::<E>(&op.key, raw_value)?,
        });
    }
    if changes.is_empty() {
        Ok(None)
    } else {
        Ok(Some(TableCommit {
            seq: batch.seq,
            changes,
        }))
    }
}
