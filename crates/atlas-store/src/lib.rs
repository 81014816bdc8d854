//! Transactional key-value storage for the Atlas resource catalog.
//!
//! This crate is the storage collaborator the catalog composes: a plain
//! byte-level key-value space with transactions, typed per-kind tables on
//! top of it, forward cursors for bulk enumeration, and a per-commit
//! change stream.
//!
//! # Surfaces
//!
//! - [`Kv`] — the read/write surface, implemented by both [`MemoryStore`]
//!   (auto-committing) and [`Transaction`] (staged until commit), so every
//!   caller-facing operation takes "the ambient transaction or the store
//!   itself" as one parameter
//! - [`Entry`] / [`Table`] — typed access to one kind's records
//! - [`Cursor`] / [`EntryCursor`] — closeable forward-only iteration
//! - [`TableEvents`] — one ordered [`TableCommit`] per committed
//!   transaction that touched the kind
//!
//! # Design Rules
//!
//! 1. The byte level never interprets values; typing lives in [`Table`].
//! 2. A commit is atomic: read-set validation, then every staged
//!    operation in issue order, then exactly one published batch.
//! 3. Change batches are never reordered, coalesced, or deduplicated;
//!    a lagging subscriber sees an explicit error, never a silent gap.
//! 4. All failures propagate on first error; nothing retries.

pub mod change;
pub mod cursor;
pub mod entry;
pub mod error;
pub mod events;
pub mod kv;
pub mod memory;
pub mod table;
pub mod tx;

pub use change::{Change, CommitBatch, RawOp, Variant};
pub use cursor::{Cursor, CursorCloser};
pub use entry::Entry;
pub use error::{StoreError, StoreResult};
pub use events::{TableCommit, TableEvents};
pub use kv::Kv;
pub use memory::MemoryStore;
pub use table::{EntryCursor, Table};
pub use tx::Transaction;
