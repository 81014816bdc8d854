//! Read-only catalog views of stored entities.

use atlas_schema::Schema;
use atlas_types::CatalogId;
use serde::{Deserialize, Serialize};

use crate::entity::CatalogEntry;
use crate::error::{CatalogError, CatalogResult};

/// An immutable projection of one stored entity.
///
/// Resources are always derived on demand and never independently
/// persisted; a resource's lifetime is the call that produced it, and
/// mutating a returned resource's data never affects the stored entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Canonical identifier of the catalog node this view belongs to.
    pub id: CatalogId,
    /// The entity's display name, copied verbatim.
    pub name: String,
    /// The kind's static schema declaration.
    pub schema: Schema,
    /// The entity's attributes, serialized for schema-driven consumers.
    pub data: serde_json::Value,
}

impl Resource {
    /// Project a stored entity into its catalog view.
    ///
    /// Pure: no I/O, deterministic, and the entity is never mutated.
    /// A serialization failure here means the store handed back an entity
    /// that violates its own invariants, so it propagates fail-fast.
    pub fn project<E: CatalogEntry>(entity: &E) -> CatalogResult<Self> {
        let id = E::catalog_id(&entity.key());
        let data = serde_json::to_value(entity).map_err(|err| CatalogError::Projection {
            id: id.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            id,
            name: entity.display_name(),
            schema: E::schema(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{probe, Probe};
    use atlas_schema::FieldType;

    #[test]
    fn projects_id_name_schema_and_data() {
        let entity = probe(7, "Probe-7");
        let resource = Resource::project(&entity).unwrap();

        assert_eq!(resource.id, Probe::catalog_id(&7));
        assert_eq!(resource.id.to_string(), "probe:7");
        assert_eq!(resource.name, "Probe-7");
        assert_eq!(resource.schema.field("key").unwrap().ty, FieldType::Uint32);
        assert_eq!(resource.data["key"], 7);
        assert_eq!(resource.data["name"], "Probe-7");
    }

    #[test]
    fn projection_is_pure() {
        let entity = probe(7, "Probe-7");
        let before = entity.clone();

        let first = Resource::project(&entity).unwrap();
        let second = Resource::project(&entity).unwrap();

        assert_eq!(first, second);
        assert_eq!(entity, before);
    }

    #[test]
    fn mutating_projected_data_leaves_the_entity_alone() {
        let entity = probe(7, "Probe-7");
        let mut resource = Resource::project(&entity).unwrap();
        resource.data["name"] = "tampered".into();

        assert_eq!(entity.name, "Probe-7");
        assert_eq!(
            Resource::project(&entity).unwrap().data["name"],
            "Probe-7"
        );
    }
}
