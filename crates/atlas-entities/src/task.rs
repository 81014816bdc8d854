//! Tasks: units of acquisition or control work scheduled onto a rack.

use std::fmt;
use std::sync::Arc;

use atlas_catalog::{CatalogEntry, CounterGenerator, KeyGenerator, KindAdapter, Writer};
use atlas_schema::{Field, FieldType, Schema};
use atlas_store::{Entry, MemoryStore};
use atlas_types::{CatalogId, EntityKey, TypeError};
use serde::{Deserialize, Serialize};

/// The task kind tag.
pub const KIND: &str = "task";

/// Integer task key.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskKey(pub u64);

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskKey {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl EntityKey for TaskKey {
    fn encode(&self) -> String {
        self.0.encode()
    }

    fn decode(raw: &str) -> Result<Self, TypeError> {
        u64::decode(raw).map(Self)
    }

    fn is_unset(&self) -> bool {
        self.0.is_unset()
    }
}

/// A unit of acquisition or control work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub key: TaskKey,
    pub name: String,
    /// Driver-facing task type (e.g. `"opc_read"`).
    #[serde(rename = "type")]
    pub task_type: String,
    /// Whether this record is a frozen copy of a live task.
    pub snapshot: bool,
}

impl Entry for Task {
    type Key = TaskKey;
    const KIND: &'static str = KIND;

    fn key(&self) -> TaskKey {
        self.key
    }

    fn set_key(&mut self, key: TaskKey) {
        self.key = key;
    }
}

impl CatalogEntry for Task {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn schema() -> Schema {
        Schema::object([
            Field::new("key", FieldType::Uint64).coerced(),
            Field::new("name", FieldType::String),
            Field::new("type", FieldType::String),
            Field::new("snapshot", FieldType::Bool),
        ])
    }
}

/// Hands out sequential task keys.
pub struct TaskKeyGenerator(CounterGenerator);

impl TaskKeyGenerator {
    /// Start counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self(CounterGenerator::starting_at(first))
    }
}

impl KeyGenerator<TaskKey> for TaskKeyGenerator {
    fn next_key(&self) -> TaskKey {
        TaskKey(self.0.next_key())
    }
}

/// Canonical catalog identifier for a task key.
pub fn catalog_id(key: TaskKey) -> CatalogId {
    Task::catalog_id(&key)
}

/// Canonical identifiers for task keys, preserving order.
pub fn catalog_ids(keys: &[TaskKey]) -> Vec<CatalogId> {
    Task::catalog_ids(keys)
}

/// Native keys of task identifiers, preserving order.
pub fn keys_from_catalog_ids(ids: &[CatalogId]) -> Result<Vec<TaskKey>, TypeError> {
    CatalogId::to_keys(ids)
}

/// The task kind's catalog adapter.
pub fn adapter(store: Arc<MemoryStore>) -> KindAdapter<Task> {
    KindAdapter::new(store)
}

/// A task writer using the supplied collision-free key generator.
pub fn writer(store: Arc<MemoryStore>, generator: Arc<dyn KeyGenerator<TaskKey>>) -> Writer<Task> {
    Writer::new(store).with_generator(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_roundtrip_and_sentinel() {
        let key = TaskKey(281_479_271_677_953);
        assert_eq!(TaskKey::decode(&key.encode()).unwrap(), key);
        assert!(TaskKey::decode("12abc").is_err());
        assert!(TaskKey(0).is_unset());
    }

    #[test]
    fn task_type_serializes_as_type() {
        let task = Task {
            key: TaskKey(1),
            name: "Analog Read".to_string(),
            task_type: "ni_analog_read".to_string(),
            snapshot: false,
        };
        let data = serde_json::to_value(&task).unwrap();
        assert_eq!(data["type"], "ni_analog_read");
        assert!(Task::schema().contains("type"));
    }

    #[test]
    fn id_helpers_use_the_kind_tag() {
        assert_eq!(catalog_id(TaskKey(9)).to_string(), "task:9");
        let ids = catalog_ids(&[TaskKey(2), TaskKey(1)]);
        assert_eq!(
            keys_from_catalog_ids(&ids).unwrap(),
            vec![TaskKey(2), TaskKey(1)]
        );
    }
}
