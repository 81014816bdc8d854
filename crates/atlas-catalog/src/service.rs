//! The per-kind catalog capability set and its generic implementation.

use std::sync::Arc;

use atlas_schema::Schema;
use atlas_store::{Kv, MemoryStore, Table};
use atlas_types::EntityKey;

use crate::change::ChangeStream;
use crate::entity::CatalogEntry;
use crate::error::{CatalogError, CatalogResult};
use crate::nexter::{ProjectingNexter, ResourceNexter};
use crate::resource::Resource;

/// The uniform capability set a kind exposes to the catalog.
///
/// One implementation is registered per kind tag, letting a generic
/// catalog engine read, enumerate, and watch every kind without knowing
/// any entity's concrete shape.
pub trait CatalogService: Send + Sync {
    /// The kind tag this service handles.
    fn kind(&self) -> &'static str;

    /// The kind's static schema declaration.
    fn schema(&self) -> &Schema;

    /// Decode the key, read the entity under the ambient transaction (or
    /// the auto-committing store when none is supplied), and project it.
    ///
    /// Fails with the malformed-key error when the key does not decode
    /// and with the not-found error — branchable via
    /// [`CatalogError::is_not_found`] — when no entity exists.
    fn retrieve_resource(&self, key: &str, tx: Option<&dyn Kv>) -> CatalogResult<Resource>;

    /// Subscribe to this kind's per-commit change batches.
    fn on_change(&self) -> ChangeStream;

    /// Open a lazy enumeration over every resource of this kind.
    fn open_nexter(&self) -> CatalogResult<Box<dyn ResourceNexter>>;
}

/// The one generic adapter behind every kind's [`CatalogService`].
///
/// Parameterized over the entity type, which carries the kind tag, the
/// key codec, the display name, and the schema — instantiating this per
/// kind replaces a hand-copied adapter per kind.
pub struct KindAdapter<E: CatalogEntry> {
    table: Table<E>,
    schema: Schema,
}

impl<E: CatalogEntry> KindAdapter<E> {
    /// Build the kind's adapter over the given store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self::from_table(Table::new(store))
    }

    /// Build the adapter over an existing table handle.
    pub fn from_table(table: Table<E>) -> Self {
        Self {
            table,
            schema: E::schema(),
        }
    }

    /// The kind's table.
    pub fn table(&self) -> &Table<E> {
        &self.table
    }
}

impl<E: CatalogEntry> CatalogService for KindAdapter<E> {
    fn kind(&self) -> &'static str {
        E::KIND
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn retrieve_resource(&self, key: &str, tx: Option<&dyn Kv>) -> CatalogResult<Resource> {
        let key = E::Key::decode(key).map_err(|err| CatalogError::malformed_key(E::KIND, err))?;
        let entity = self
            .table
            .get(tx, &key)
            .map_err(|err| CatalogError::from_store(E::catalog_id(&key), err))?;
        Resource::project(&entity)
    }

    fn on_change(&self) -> ChangeStream {
        ChangeStream::for_table(self.table.subscribe())
    }

    fn open_nexter(&self) -> CatalogResult<Box<dyn ResourceNexter>> {
        Ok(Box::new(ProjectingNexter::new(self.table.open_cursor())))
    }
}
