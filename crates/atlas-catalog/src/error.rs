//! Errors from catalog operations.

use atlas_store::StoreError;
use atlas_types::{CatalogId, TypeError};
use thiserror::Error;

/// Errors produced by catalog adapters, writers, and streams.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No resource exists at the given identifier.
    #[error("resource not found: {0}")]
    NotFound(CatalogId),

    /// The string key does not decode into the kind's native key form.
    #[error("malformed key {key:?} for kind {kind}: {reason}")]
    MalformedKey {
        kind: String,
        key: String,
        reason: String,
    },

    /// A concurrent commit won the race for the identified resource.
    #[error("write conflict on {0}")]
    Conflict(CatalogId),

    /// The request is structurally invalid before it reaches the store.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A stored entity could not be projected into a resource.
    #[error("projection failed for {id}: {reason}")]
    Projection { id: CatalogId, reason: String },

    /// Opaque failure in the underlying store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Returns `true` if the error means "no such resource", whether it
    /// was raised here or surfaced from the store.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Store(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Returns `true` if the error means a concurrent commit won.
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Conflict(_) => true,
            Self::Store(err) => err.is_conflict(),
            _ => false,
        }
    }

    /// Attach a kind tag to a key decode failure.
    pub fn malformed_key(kind: &str, err: TypeError) -> Self {
        match err {
            TypeError::MalformedKey { raw, reason } => Self::MalformedKey {
                kind: kind.to_string(),
                key: raw,
                reason,
            },
            TypeError::MalformedId { raw } => Self::MalformedKey {
                kind: kind.to_string(),
                key: raw,
                reason: "expected \"kind:key\"".to_string(),
            },
        }
    }

    /// Resolve a store failure against the identifier it concerned, so
    /// not-found and conflict stay branchable instead of opaque.
    pub fn from_store(id: CatalogId, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(id),
            StoreError::Conflict { .. } => Self::Conflict(id),
            other => Self::Store(other),
        }
    }
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
