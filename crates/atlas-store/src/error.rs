//! Errors from store operations.

use thiserror::Error;

/// Errors produced by the transactional store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entry was not found.
    #[error("entry not found: {key}")]
    NotFound { key: String },

    /// A concurrently committed transaction invalidated this one's reads.
    #[error("write conflict on {key}")]
    Conflict { key: String },

    /// Serialization failure while encoding an entry for storage.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A stored entry cannot be decoded back into its typed form.
    #[error("corrupt entry {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// The cursor was closed while iteration was still in progress.
    #[error("cursor closed")]
    Closed,

    /// The subscriber fell behind the commit stream and missed batches.
    #[error("subscriber lagged, skipped {skipped} commit batches")]
    Lagged { skipped: u64 },
}

impl StoreError {
    /// Returns `true` if this is a [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a [`StoreError::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
