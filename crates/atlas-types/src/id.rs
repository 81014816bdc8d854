//! Canonical catalog identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::key::EntityKey;

/// The only identity form the catalog understands: a kind tag plus the
/// canonical string form of the entity's key.
///
/// A `CatalogId` is derived deterministically and reversibly from a kind
/// tag and a native key via [`EntityKey`]. Its text form is `kind:key`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogId {
    /// Constant string identifying the entity category (e.g. `"rack"`).
    pub kind: String,
    /// Canonical string form of the entity's key within its kind.
    pub key: String,
}

impl CatalogId {
    /// Build an identifier from a kind tag and an already-encoded key.
    pub fn new(kind: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            key: key.into(),
        }
    }

    /// Build an identifier from a kind tag and a native key.
    pub fn from_key<K: EntityKey>(kind: &str, key: &K) -> Self {
        Self::new(kind, key.encode())
    }

    /// Build identifiers for a slice of native keys, preserving order.
    pub fn from_keys<K: EntityKey>(kind: &str, keys: &[K]) -> Vec<Self> {
        keys.iter().map(|k| Self::from_key(kind, k)).collect()
    }

    /// Decode the native keys of a slice of identifiers, preserving order
    /// and failing on the first malformed element.
    pub fn to_keys<K: EntityKey>(ids: &[Self]) -> Result<Vec<K>, TypeError> {
        ids.iter().map(|id| K::decode(&id.key)).collect()
    }

    /// Decode this identifier's key into its native form.
    pub fn decode_key<K: EntityKey>(&self) -> Result<K, TypeError> {
        K::decode(&self.key)
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.key)
    }
}

impl FromStr for CatalogId {
    type Err = TypeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.split_once(':') {
            Some((kind, key)) if !kind.is_empty() => Ok(Self::new(kind, key)),
            _ => Err(TypeError::MalformedId {
                raw: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn from_key_encodes_canonically() {
        let id = CatalogId::from_key("rack", &7u32);
        assert_eq!(id.kind, "rack");
        assert_eq!(id.key, "7");
    }

    #[test]
    fn display_is_kind_colon_key() {
        let id = CatalogId::new("device", "gw-ni-01");
        assert_eq!(id.to_string(), "device:gw-ni-01");
    }

    #[test]
    fn parse_roundtrip() {
        let id = CatalogId::from_key("workspace", &Uuid::new_v4());
        let parsed: CatalogId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(matches!(
            "rack7".parse::<CatalogId>(),
            Err(TypeError::MalformedId { .. })
        ));
        assert!(":7".parse::<CatalogId>().is_err());
    }

    #[test]
    fn parse_keeps_extra_colons_in_key() {
        // UUID-less kinds may embed colons in string keys; only the first
        // separator is structural.
        let id: CatalogId = "device:ni:9185".parse().unwrap();
        assert_eq!(id.kind, "device");
        assert_eq!(id.key, "ni:9185");
    }

    #[test]
    fn batch_helpers_preserve_order() {
        let ids = CatalogId::from_keys("rack", &[3u32, 1, 2]);
        assert_eq!(
            ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["rack:3", "rack:1", "rack:2"]
        );
        let keys: Vec<u32> = CatalogId::to_keys(&ids).unwrap();
        assert_eq!(keys, vec![3, 1, 2]);
    }

    #[test]
    fn to_keys_fails_on_malformed_element() {
        let ids = vec![CatalogId::new("rack", "1"), CatalogId::new("rack", "x")];
        assert!(CatalogId::to_keys::<u32>(&ids).is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let id = CatalogId::new("task", "281479271677953");
        let json = serde_json::to_string(&id).unwrap();
        let back: CatalogId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
