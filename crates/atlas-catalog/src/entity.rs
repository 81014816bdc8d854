//! The contract an entity kind fulfills to appear in the catalog.

use atlas_schema::Schema;
use atlas_store::Entry;
use atlas_types::CatalogId;

/// A storable entity the catalog can project.
///
/// On top of the store's [`Entry`] contract this adds the two things a
/// catalog view needs and storage does not: a human-readable display name
/// and the kind's static schema declaration.
pub trait CatalogEntry: Entry {
    /// Display name shown in catalog views. Copied verbatim into the
    /// projected resource.
    fn display_name(&self) -> String;

    /// The kind's static field declaration. Never varies at runtime.
    fn schema() -> Schema;

    /// Canonical catalog identifier for one of this kind's keys.
    fn catalog_id(key: &Self::Key) -> CatalogId {
        CatalogId::from_key(Self::KIND, key)
    }

    /// Canonical identifiers for a slice of keys, preserving order.
    fn catalog_ids(keys: &[Self::Key]) -> Vec<CatalogId> {
        CatalogId::from_keys(Self::KIND, keys)
    }
}
