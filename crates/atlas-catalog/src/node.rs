//! Catalog-node records and the writer that keeps them in sync.

use std::sync::Arc;

use atlas_store::{Entry, Kv, MemoryStore, Table};
use atlas_types::CatalogId;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// The bare existence marker for one catalog node.
///
/// Nodes carry no payload of their own: the graph engine attaches edges
/// to them, and everything else about the resource is projected on demand
/// from the entity store. Keyed by the canonical `kind:key` text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogNode {
    /// Canonical identifier text of the node.
    pub id: String,
}

impl Entry for CatalogNode {
    type Key = String;
    const KIND: &'static str = "catalog-node";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn set_key(&mut self, key: String) {
        self.id = key;
    }
}

/// Defines and deletes catalog nodes on behalf of entity writers.
///
/// The node table lives in the same store as the entities, so a single
/// transaction covers both sides and "entity exists" and "node exists"
/// are never observably inconsistent beyond a commit boundary.
pub struct CatalogWriter {
    table: Table<CatalogNode>,
}

impl CatalogWriter {
    /// Open the node table over the given store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            table: Table::new(store),
        }
    }

    /// Define the node for `id`, replacing any existing marker.
    pub fn define_resource(&self, tx: Option<&dyn Kv>, id: &CatalogId) -> CatalogResult<()> {
        self.table
            .put(tx, &CatalogNode { id: id.to_string() })
            .map_err(|err| CatalogError::from_store(id.clone(), err))
    }

    /// Delete the node for `id`, failing with not-found when absent.
    pub fn delete_resource(&self, tx: Option<&dyn Kv>, id: &CatalogId) -> CatalogResult<()> {
        self.table
            .delete(tx, &id.to_string())
            .map_err(|err| CatalogError::from_store(id.clone(), err))
    }

    /// Returns `true` if a node is defined for `id`.
    pub fn has_resource(&self, tx: Option<&dyn Kv>, id: &CatalogId) -> CatalogResult<bool> {
        self.table
            .exists(tx, &id.to_string())
            .map_err(|err| CatalogError::from_store(id.clone(), err))
    }

    /// Number of defined nodes, for diagnostics and tests.
    pub fn count(&self) -> CatalogResult<usize> {
        let mut cursor = self.table.open_cursor();
        let mut count = 0;
        while cursor.next()?.is_some() {
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_store::Transaction;

    fn writer() -> (Arc<MemoryStore>, CatalogWriter) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), CatalogWriter::new(store))
    }

    #[test]
    fn define_then_has_then_delete() {
        let (_store, writer) = writer();
        let id = CatalogId::new("rack", "7");

        assert!(!writer.has_resource(None, &id).unwrap());
        writer.define_resource(None, &id).unwrap();
        assert!(writer.has_resource(None, &id).unwrap());

        writer.delete_resource(None, &id).unwrap();
        assert!(!writer.has_resource(None, &id).unwrap());
    }

    #[test]
    fn redefining_replaces_without_duplicating() {
        let (_store, writer) = writer();
        let id = CatalogId::new("rack", "7");

        writer.define_resource(None, &id).unwrap();
        writer.define_resource(None, &id).unwrap();
        assert_eq!(writer.count().unwrap(), 1);
    }

    #[test]
    fn deleting_an_undefined_node_is_not_found() {
        let (_store, writer) = writer();
        let id = CatalogId::new("rack", "404");
        let err = writer.delete_resource(None, &id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn definitions_respect_the_ambient_transaction() {
        let (store, writer) = writer();
        let id = CatalogId::new("rack", "7");

        let tx = Transaction::new(store);
        writer.define_resource(Some(&tx), &id).unwrap();
        assert!(!writer.has_resource(None, &id).unwrap());
        assert!(writer.has_resource(Some(&tx), &id).unwrap());

        tx.commit().unwrap();
        assert!(writer.has_resource(None, &id).unwrap());
    }
}
