//! Change records emitted by committed transactions.

use serde::{Deserialize, Serialize};

/// Whether a change wrote a value or removed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// The entry was created or replaced.
    Set,
    /// The entry was removed.
    Delete,
}

/// A single decoded change to one entry of a typed table.
///
/// `value` always carries a full entry: the new value for a `Set`, the
/// last stored value for a `Delete`.
#[derive(Clone, Debug, PartialEq)]
pub struct Change<K, V> {
    /// Whether the entry was written or removed.
    pub variant: Variant,
    /// The changed entry's native key.
    pub key: K,
    /// The written value, or the value the delete removed.
    pub value: V,
}

/// One raw operation applied by a commit, in apply order.
///
/// For a `Set`, `value` holds the written bytes. For a `Delete`, `value`
/// holds the bytes the delete removed. Staged (not yet committed) deletes
/// carry `None` until the commit captures the prior value.
#[derive(Clone, Debug)]
pub struct RawOp {
    pub variant: Variant,
    pub key: Vec<u8>,
    pub value: Option<Vec<u8>>,
}

/// The ordered operations applied by one committed transaction.
///
/// Batches are published whole, one per commit, in commit order. Within a
/// batch, operations appear exactly as the transaction staged them: no
/// reordering, no coalescing, no deduplication.
#[derive(Clone, Debug)]
pub struct CommitBatch {
    /// Monotonically increasing commit sequence number.
    pub seq: u64,
    /// The applied operations, in staging order.
    pub ops: Vec<RawOp>,
}
