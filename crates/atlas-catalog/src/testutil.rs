//! Shared fixtures for this crate's unit tests.

use std::sync::Arc;

use atlas_schema::{Field, FieldType, Schema};
use atlas_store::{Entry, MemoryStore, Table};
use serde::{Deserialize, Serialize};

use crate::entity::CatalogEntry;

/// Minimal integer-keyed entity used across the unit tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    pub key: u32,
    pub name: String,
}

impl Entry for Probe {
    type Key = u32;
    const KIND: &'static str = "probe";

    fn key(&self) -> u32 {
        self.key
    }

    fn set_key(&mut self, key: u32) {
        self.key = key;
    }
}

impl CatalogEntry for Probe {
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

pub fn probe(key: u32, name: &str) -> Probe {
    Probe {
        key,
        name: name.to_string(),
    }
}

pub fn probe_table() -> (Arc<MemoryStore>, Table<Probe>) {
    let store = Arc::new(MemoryStore::new());
    let table = Table::new(store.clone());
    (store, table)
}
