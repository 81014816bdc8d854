//! Workspaces: user-owned groupings of visualization layouts.

use std::sync::Arc;

use atlas_catalog::{CatalogEntry, KindAdapter, UuidGenerator, Writer};
use atlas_schema::{Field, FieldType, Schema};
use atlas_store::{Entry, MemoryStore};
use atlas_types::{CatalogId, TypeError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The workspace kind tag.
pub const KIND: &str = "workspace";

/// A user-owned workspace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub key: Uuid,
    pub name: String,
}

impl Workspace {
    /// Build a workspace. A nil key means "generate one on create".
    pub fn new(key: Uuid, name: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
        }
    }
}

impl Entry for Workspace {
    type Key = Uuid;
    const KIND: &'static str = KIND;

    fn key(&self) -> Uuid {
        self.key
    }

    fn set_key(&mut self, key: Uuid) {
        self.key = key;
    }
}

impl CatalogEntry for Workspace {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn schema() -> Schema {
        Schema::object([
            Field::new("key", FieldType::Uuid),
            Field::new("name", FieldType::String),
        ])
    }
}

/// Canonical catalog identifier for a workspace key.
pub fn catalog_id(key: Uuid) -> CatalogId {
    Workspace::catalog_id(&key)
}

/// Canonical identifiers for workspace keys, preserving order.
pub fn catalog_ids(keys: &[Uuid]) -> Vec<CatalogId> {
    Workspace::catalog_ids(keys)
}

/// Native keys of workspace identifiers, preserving order.
pub fn keys_from_catalog_ids(ids: &[CatalogId]) -> Result<Vec<Uuid>, TypeError> {
    CatalogId::to_keys(ids)
}

/// The workspace kind's catalog adapter.
pub fn adapter(store: Arc<MemoryStore>) -> KindAdapter<Workspace> {
    KindAdapter::new(store)
}

/// A workspace writer. Keys are generated as v4 UUIDs when unset.
pub fn writer(store: Arc<MemoryStore>) -> Writer<Workspace> {
    Writer::new(store).with_generator(Arc::new(UuidGenerator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_types::EntityKey;

    #[test]
    fn uuid_keys_use_hyphenated_text() {
        let key = Uuid::new_v4();
        let id = catalog_id(key);
        assert_eq!(id.key, key.hyphenated().to_string());
        assert_eq!(keys_from_catalog_ids(&[id]).unwrap(), vec![key]);
    }

    #[test]
    fn nil_key_is_the_unset_sentinel() {
        assert!(Workspace::new(Uuid::nil(), "w").key().is_unset());
        assert!(!Workspace::new(Uuid::new_v4(), "w").key().is_unset());
    }

    #[test]
    fn malformed_uuid_text_does_not_decode() {
        let ids = [CatalogId::new(KIND, "not-a-valid-key")];
        assert!(keys_from_catalog_ids(&ids).is_err());
    }

    #[test]
    fn schema_declares_key_and_name() {
        let schema = Workspace::schema();
        assert_eq!(schema.field("key").unwrap().ty, FieldType::Uuid);
        assert_eq!(schema.field("name").unwrap().ty, FieldType::String);
    }
}
