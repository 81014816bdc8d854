//! Lazy enumeration of every resource of a kind.

use atlas_store::{CursorCloser, EntryCursor};

use crate::entity::CatalogEntry;
use crate::error::CatalogResult;
use crate::resource::Resource;

/// A closeable, forward-only, single-pass sequence of projected
/// resources.
///
/// Each pull reads exactly one underlying entity and projects it on
/// demand; nothing is precomputed. A decode or projection failure on any
/// element fails the whole enumeration immediately. `close` is
/// idempotent, safe after partial consumption, and available from another
/// thread through [`close_handle`]; a pull racing a close either
/// completes or observes closure and returns the store's cancelled error.
///
/// [`close_handle`]: ResourceNexter::close_handle
pub trait ResourceNexter: Send {
    /// Pull and project the next resource, or `None` at end-of-sequence.
    fn next(&mut self) -> CatalogResult<Option<Resource>>;

    /// Close the enumeration and release underlying resources.
    fn close(&self);

    /// A handle that can close this enumeration from another thread.
    fn close_handle(&self) -> CursorCloser;
}

/// The generic enumerator: a typed store cursor projected element-wise.
pub(crate) struct ProjectingNexter<E: CatalogEntry> {
    cursor: EntryCursor<E>,
}

impl<E: CatalogEntry> ProjectingNexter<E> {
    pub(crate) fn new(cursor: EntryCursor<E>) -> Self {
        Self { cursor }
    }
}

impl<E: CatalogEntry> ResourceNexter for ProjectingNexter<E> {
    fn next(&mut self) -> CatalogResult<Option<Resource>> {
        match self.cursor.next()? {
            Some(entity) => Ok(Some(Resource::project(&entity)?)),
            None => Ok(None),
        }
    }

    fn close(&self) {
        self.cursor.close();
    }

    fn close_handle(&self) -> CursorCloser {
        self.cursor.closer()
    }
}
