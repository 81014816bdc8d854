//! Forward-only cursors over a key prefix.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;

/// A closeable, forward-only, single-pass cursor over all entries with a
/// given key prefix.
///
/// Each [`next`] pulls exactly one entry; the only state carried between
/// pulls is the resume key and a closed flag. Once the cursor reports
/// end-of-sequence it stays exhausted, so entries committed behind or
/// after the walk never reappear.
///
/// [`close`] is idempotent and safe after partial consumption. A
/// [`CursorCloser`] handle can close the cursor from another thread while
/// a pull is in flight; the pull either completes or observes closure and
/// fails with [`StoreError::Closed`].
///
/// [`next`]: Cursor::next
/// [`close`]: Cursor::close
pub struct Cursor {
    store: Arc<MemoryStore>,
    prefix: Vec<u8>,
    resume: Option<Vec<u8>>,
    done: bool,
    closed: Arc<AtomicBool>,
}

/// Shareable handle that closes its [`Cursor`] from anywhere.
#[derive(Clone)]
pub struct CursorCloser {
    closed: Arc<AtomicBool>,
}

impl CursorCloser {
    /// Close the cursor. Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once the cursor has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Cursor {
    /// Open a cursor over all entries whose key starts with `prefix`.
    pub fn new(store: Arc<MemoryStore>, prefix: Vec<u8>) -> Self {
        Self {
            store,
            prefix,
            resume: None,
            done: false,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Pull the next entry, or `None` at end-of-sequence.
    pub fn next(&mut self) -> StoreResult<Option<(Vec<u8>, Vec<u8>)>> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        if self.done {
            return Ok(None);
        }
        match self.store.next_after(&self.prefix, self.resume.as_deref()) {
            Some((key, value)) => {
                self.resume = Some(key.clone());
                Ok(Some((key, value)))
            }
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }

    /// Close the cursor and release its hold on the store. Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// A handle that can close this cursor from another thread.
    pub fn closer(&self) -> CursorCloser {
        CursorCloser {
            closed: Arc::clone(&self.closed),
        }
    }
}
