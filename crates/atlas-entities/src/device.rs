//! Devices: physical or virtual hardware attached to a rack.

use std::sync::Arc;

use atlas_catalog::{CatalogEntry, KindAdapter, Writer};
use atlas_schema::{Field, FieldType, Schema};
use atlas_store::{Entry, MemoryStore};
use atlas_types::CatalogId;
use serde::{Deserialize, Serialize};

use crate::rack::RackKey;

/// The device kind tag.
pub const KIND: &str = "device";

/// A piece of hardware attached to a rack.
///
/// Device keys are client-supplied strings (serial numbers, bus
/// addresses), so no server-side key generation applies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub key: String,
    pub name: String,
    pub make: String,
    pub model: String,
    pub configured: bool,
    pub location: String,
    pub rack: RackKey,
}

impl Entry for Device {
    type Key = String;
    const KIND: &'static str = KIND;

    fn key(&self) -> String {
        self.key.clone()
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

impl CatalogEntry for Device {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn schema() -> Schema {
        Schema::object([
            Field::new("key", FieldType::String),
            Field::new("name", FieldType::String),
            Field::new("make", FieldType::String),
            Field::new("model", FieldType::String),
            Field::new("configured", FieldType::Bool),
            Field::new("location", FieldType::String),
            Field::new("rack", FieldType::Uint32).coerced(),
        ])
    }
}

/// Canonical catalog identifier for a device key.
pub fn catalog_id(key: &str) -> CatalogId {
    CatalogId::new(KIND, key)
}

/// Canonical identifiers for device keys, preserving order.
pub fn catalog_ids(keys: &[String]) -> Vec<CatalogId> {
    Device::catalog_ids(keys)
}

/// Native keys of device identifiers, preserving order.
pub fn keys_from_catalog_ids(ids: &[CatalogId]) -> Vec<String> {
    ids.iter().map(|id| id.key.clone()).collect()
}

/// The device kind's catalog adapter.
pub fn adapter(store: Arc<MemoryStore>) -> KindAdapter<Device> {
    KindAdapter::new(store)
}

/// A device writer. Devices always carry explicit keys.
pub fn writer(store: Arc<MemoryStore>) -> Writer<Device> {
    Writer::new(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(key: &str) -> Device {
        Device {
            key: key.to_string(),
            name: format!("Device {key}"),
            make: "National Instruments".to_string(),
            model: "USB-6000".to_string(),
            configured: false,
            location: "dev0".to_string(),
            rack: RackKey(1),
        }
    }

    #[test]
    fn schema_covers_every_projected_field() {
        let schema = Device::schema();
        let data = serde_json::to_value(device("d1")).unwrap();
        for field in data.as_object().unwrap().keys() {
            assert!(schema.contains(field), "schema missing field {field:?}");
        }
    }

    #[test]
    fn id_helpers_pass_string_keys_through() {
        assert_eq!(catalog_id("gw-01").to_string(), "device:gw-01");
        let ids = catalog_ids(&["b".to_string(), "a".to_string()]);
        assert_eq!(keys_from_catalog_ids(&ids), vec!["b", "a"]);
    }

    #[test]
    fn empty_key_is_the_unset_sentinel() {
        use atlas_types::EntityKey;
        assert!(device("").key().is_unset());
        assert!(!device("gw-01").key().is_unset());
    }
}
