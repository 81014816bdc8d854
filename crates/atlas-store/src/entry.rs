//! The typed-entry contract for kind tables.

use atlas_types::EntityKey;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A typed record persisted in a kind's table.
///
/// The store never interprets values beyond this contract: a constant kind
/// tag naming the table, and a native key embedded in the record. Values
/// are serialized as JSON; keys are stored as
/// `"{KIND}/{key.encode()}"`.
pub trait Entry: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Native key type, mapped to canonical text by [`EntityKey`].
    type Key: EntityKey;

    /// Constant tag naming this entry's table. Doubles as the storage key
    /// prefix, so it must be unique per kind within a store.
    const KIND: &'static str;

    /// The record's embedded key.
    fn key(&self) -> Self::Key;

    /// Replace the record's embedded key. Called by writers when the key
    /// is generated server-side.
    fn set_key(&mut self, key: Self::Key);
}
