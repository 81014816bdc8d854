//! Racks: enclosures that group devices and host tasks.

use std::fmt;
use std::sync::Arc;

use atlas_catalog::{CatalogEntry, CounterGenerator, KeyGenerator, KindAdapter, Writer};
use atlas_schema::{Field, FieldType, Schema};
use atlas_store::{Entry, MemoryStore};
use atlas_types::{CatalogId, EntityKey, TypeError};
use serde::{Deserialize, Serialize};

/// The rack kind tag.
pub const KIND: &str = "rack";

/// Integer rack key.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RackKey(pub u32);

impl fmt::Display for RackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RackKey {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl EntityKey for RackKey {
    fn encode(&self) -> String {
        self.0.encode()
    }

    fn decode(raw: &str) -> Result<Self, TypeError> {
        u32::decode(raw).map(Self)
    }

    fn is_unset(&self) -> bool {
        self.0.is_unset()
    }
}

/// A hardware rack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    pub key: RackKey,
    pub name: String,
}

impl Rack {
    /// Build a rack. A zero key means "generate one on create".
    pub fn new(key: impl Into<RackKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

impl Entry for Rack {
    type Key = RackKey;
    const KIND: &'static str = KIND;

    fn key(&self) -> RackKey {
        self.key
    }

    fn set_key(&mut self, key: RackKey) {
        self.key = key;
    }
}

impl CatalogEntry for Rack {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn schema() -> Schema {
        Schema::object([
            Field::new("key", FieldType::Uint32).coerced(),
            Field::new("name", FieldType::String),
        ])
    }
}

/// Hands out sequential rack keys.
pub struct RackKeyGenerator(CounterGenerator);

impl RackKeyGenerator {
    /// Start counting at `first`.
    pub fn starting_at(first: u32) -> Self {
        Self(CounterGenerator::starting_at(u64::from(first)))
    }
}

impl KeyGenerator<RackKey> for RackKeyGenerator {
    fn next_key(&self) -> RackKey {
        RackKey(self.0.next_key())
    }
}

/// Canonical catalog identifier for a rack key.
pub fn catalog_id(key: RackKey) -> CatalogId {
    Rack::catalog_id(&key)
}

/// Canonical identifiers for rack keys, preserving order.
pub fn catalog_ids(keys: &[RackKey]) -> Vec<CatalogId> {
    Rack::catalog_ids(keys)
}

/// Native keys of rack identifiers, preserving order.
pub fn keys_from_catalog_ids(ids: &[CatalogId]) -> Result<Vec<RackKey>, TypeError> {
    CatalogId::to_keys(ids)
}

/// The rack kind's catalog adapter.
pub fn adapter(store: Arc<MemoryStore>) -> KindAdapter<Rack> {
    KindAdapter::new(store)
}

/// A rack writer using the supplied collision-free key generator.
pub fn writer(store: Arc<MemoryStore>, generator: Arc<dyn KeyGenerator<RackKey>>) -> Writer<Rack> {
    Writer::new(store).with_generator(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_roundtrip_and_sentinel() {
        let key = RackKey(7);
        assert_eq!(key.encode(), "7");
        assert_eq!(RackKey::decode("7").unwrap(), key);
        assert!(RackKey::decode("seven").is_err());
        assert!(RackKey(0).is_unset());
    }

    #[test]
    fn id_helpers_use_the_kind_tag() {
        assert_eq!(catalog_id(RackKey(7)).to_string(), "rack:7");
        let ids = catalog_ids(&[RackKey(2), RackKey(1)]);
        assert_eq!(keys_from_catalog_ids(&ids).unwrap(), vec![RackKey(2), RackKey(1)]);
    }

    #[test]
    fn schema_declares_key_and_name() {
        let schema = Rack::schema();
        assert!(schema.field("key").unwrap().coerce);
        assert_eq!(schema.field("name").unwrap().ty, FieldType::String);
    }

    #[test]
    fn generator_hands_out_sequential_keys() {
        let generator = RackKeyGenerator::starting_at(5);
        assert_eq!(generator.next_key(), RackKey(5));
        assert_eq!(generator.next_key(), RackKey(6));
    }
}
