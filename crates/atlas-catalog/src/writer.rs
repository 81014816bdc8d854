//! Transactional entity writers and server-side key generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use atlas_store::{Kv, MemoryStore, Table};
use atlas_types::EntityKey;
use tracing::debug;
use uuid::Uuid;

use crate::entity::CatalogEntry;
use crate::error::{CatalogError, CatalogResult};
use crate::node::CatalogWriter;

/// Produces globally unique keys for kinds that permit server-generated
/// identifiers. Uniqueness is the generator's responsibility; writers
/// assume generated keys are collision-free.
pub trait KeyGenerator<K>: Send + Sync {
    /// Produce the next key.
    fn next_key(&self) -> K;
}

/// Generates random v4 UUID keys.
pub struct UuidGenerator;

impl KeyGenerator<Uuid> for UuidGenerator {
    fn next_key(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Hands out sequential integer keys from an atomic counter.
pub struct CounterGenerator {
    next: AtomicU64,
}

impl CounterGenerator {
    /// Start counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl KeyGenerator<u64> for CounterGenerator {
    fn next_key(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

impl KeyGenerator<u32> for CounterGenerator {
    fn next_key(&self) -> u32 {
        self.next.fetch_add(1, Ordering::SeqCst) as u32
    }
}

/// Adapts a closure into a key generator, for newtype keys.
pub struct FnKeyGenerator<F>(pub F);

impl<K, F> KeyGenerator<K> for FnKeyGenerator<F>
where
    F: Fn() -> K + Send + Sync,
{
    fn next_key(&self) -> K {
        (self.0)()
    }
}

/// Creates and deletes one kind's entities while keeping each entity's
/// catalog node in sync, inside a single transaction.
///
/// Every operation runs against the caller-supplied transaction, or
/// directly against the auto-committing store when none is given. The
/// writer performs no manual compensation: when any step fails, the
/// surrounding transaction's rollback undoes whatever was staged.
pub struct Writer<E: CatalogEntry> {
    table: Table<E>,
    catalog: CatalogWriter,
    generator: Option<Arc<dyn KeyGenerator<E::Key>>>,
}

impl<E: CatalogEntry> Writer<E> {
    /// Build a writer over the given store. Kinds that accept unset keys
    /// also need [`with_generator`](Self::with_generator).
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            table: Table::new(store.clone()),
            catalog: CatalogWriter::new(store),
            generator: None,
        }
    }

    /// Attach a key generator for create calls without an explicit key.
    pub fn with_generator(mut self, generator: Arc<dyn KeyGenerator<E::Key>>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// The kind's table.
    pub fn table(&self) -> &Table<E> {
        &self.table
    }

    /// Create or update the entity.
    ///
    /// When the entity carries no key, one is generated and written back
    /// into it. When it carries a key that already exists, the stored
    /// value is replaced and the existing catalog node is left untouched;
    /// the node is defined only on first creation, never twice.
    pub fn create(&self, tx: Option<&dyn Kv>, entity: &mut E) -> CatalogResult<()> {
        let mut existed = false;
        if entity.key().is_unset() {
            let generator = self.generator.as_ref().ok_or_else(|| {
                CatalogError::Validation(format!(
                    "kind {:?} does not generate keys; supply one explicitly",
                    E::KIND
                ))
            })?;
            entity.set_key(generator.next_key());
        } else {
            existed = self.table.exists(tx, &entity.key())?;
        }

        self.table.put(tx, entity)?;
        if existed {
            debug!(kind = E::KIND, key = %entity.key().encode(), "entity updated");
            return Ok(());
        }

        let id = E::catalog_id(&entity.key());
        self.catalog.define_resource(tx, &id)?;
        debug!(kind = E::KIND, %id, "entity created");
        Ok(())
    }

    /// Delete entities and their catalog nodes, key by key, in the given
    /// order, stopping at the first failure.
    ///
    /// Under a real transaction a failure rolls everything back; under
    /// the auto-committing fallback, keys before the failing one stay
    /// deleted and it is the caller's job to detect the partial result.
    pub fn delete(&self, tx: Option<&dyn Kv>, keys: &[E::Key]) -> CatalogResult<()> {
        for key in keys {
            let id = E::catalog_id(key);
            self.table
                .delete(tx, key)
                .map_err(|err| CatalogError::from_store(id.clone(), err))?;
            self.catalog.delete_resource(tx, &id)?;
            debug!(kind = E::KIND, %id, "entity deleted");
        }
        Ok(())
    }
}
