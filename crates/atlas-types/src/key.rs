//! The canonical key codec shared by every entity kind.
//!
//! Each kind stores its entities under a native key type — a plain string,
//! an integer, or a UUID — while the catalog only ever sees the canonical
//! string form. [`EntityKey`] is the bidirectional mapping between the two.
//!
//! The implementation set is deliberately closed:
//!
//! - `String` passes through unchanged
//! - `u32` / `u64` use decimal text
//! - [`Uuid`] uses the canonical hyphenated form
//!
//! Integer-newtype keys delegate to the primitive implementations rather
//! than adding new encodings.

use std::fmt::Debug;
use std::hash::Hash;

use uuid::Uuid;

use crate::error::TypeError;

/// Bidirectional mapping between a kind's native key type and the
/// catalog's canonical string form.
///
/// Encoding is total and never fails. Decoding fails with
/// [`TypeError::MalformedKey`] when the string cannot parse into the
/// native form. Round-trip holds for every valid key:
/// `decode(encode(k)) == k`.
pub trait EntityKey: Clone + Debug + Eq + Hash + Send + Sync + 'static {
    /// Canonical string form of this key.
    fn encode(&self) -> String;

    /// Parse a key from its canonical string form.
    fn decode(raw: &str) -> Result<Self, TypeError>;

    /// Returns `true` for the sentinel meaning "no key supplied": the
    /// empty string, zero, or the nil UUID. Writers generate a fresh key
    /// when they see the sentinel.
    fn is_unset(&self) -> bool;
}

impl EntityKey for String {
    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(raw: &str) -> Result<Self, TypeError> {
        Ok(raw.to_string())
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl EntityKey for u32 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Result<Self, TypeError> {
        raw.parse()
            .map_err(|err| TypeError::malformed_key(raw, err))
    }

    fn is_unset(&self) -> bool {
        *self == 0
    }
}

impl EntityKey for u64 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Result<Self, TypeError> {
        raw.parse()
            .map_err(|err| TypeError::malformed_key(raw, err))
    }

    fn is_unset(&self) -> bool {
        *self == 0
    }
}

impl EntityKey for Uuid {
    fn encode(&self) -> String {
        self.hyphenated().to_string()
    }

    fn decode(raw: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(raw).map_err(|err| TypeError::malformed_key(raw, err))
    }

    fn is_unset(&self) -> bool {
        self.is_nil()
    }
}

/// Encode a slice of keys element-wise, preserving input order.
pub fn encode_keys<K: EntityKey>(keys: &[K]) -> Vec<String> {
    keys.iter().map(EntityKey::encode).collect()
}

/// Decode a slice of canonical strings element-wise, preserving input
/// order and failing on the first malformed element.
pub fn decode_keys<K, S>(raw: &[S]) -> Result<Vec<K>, TypeError>
where
    K: EntityKey,
    S: AsRef<str>,
{
    raw.iter().map(|s| K::decode(s.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -----------------------------------------------------------------------
    // Round-trip
    // -----------------------------------------------------------------------

    #[test]
    fn string_roundtrip() {
        let key = "gw-ni-01".to_string();
        assert_eq!(String::decode(&key.encode()).unwrap(), key);
    }

    #[test]
    fn uuid_roundtrip() {
        let key = Uuid::new_v4();
        assert_eq!(Uuid::decode(&key.encode()).unwrap(), key);
    }

    proptest! {
        #[test]
        fn u32_roundtrip(key: u32) {
            prop_assert_eq!(u32::decode(&key.encode()).unwrap(), key);
        }

        #[test]
        fn u64_roundtrip(key: u64) {
            prop_assert_eq!(u64::decode(&key.encode()).unwrap(), key);
        }

        #[test]
        fn string_roundtrip_any(key in "\\PC*") {
            prop_assert_eq!(String::decode(&key.encode()).unwrap(), key);
        }

        #[test]
        fn uuid_roundtrip_any(bytes: [u8; 16]) {
            let key = Uuid::from_bytes(bytes);
            prop_assert_eq!(Uuid::decode(&key.encode()).unwrap(), key);
        }
    }

    // -----------------------------------------------------------------------
    // Malformed input
    // -----------------------------------------------------------------------

    #[test]
    fn integer_decode_rejects_non_numeric() {
        let err = u32::decode("not-a-valid-key").unwrap_err();
        assert!(matches!(err, TypeError::MalformedKey { .. }));
        let err = u64::decode("12abc").unwrap_err();
        assert!(matches!(err, TypeError::MalformedKey { .. }));
    }

    #[test]
    fn integer_decode_rejects_overflow() {
        assert!(u32::decode("4294967296").is_err());
    }

    #[test]
    fn uuid_decode_rejects_invalid_literal() {
        let err = Uuid::decode("not-a-valid-key").unwrap_err();
        assert!(matches!(err, TypeError::MalformedKey { .. }));
    }

    #[test]
    fn string_decode_never_fails() {
        assert_eq!(String::decode("anything at all").unwrap(), "anything at all");
    }

    // -----------------------------------------------------------------------
    // Unset sentinels
    // -----------------------------------------------------------------------

    #[test]
    fn unset_sentinels() {
        assert!(String::new().is_unset());
        assert!(0u32.is_unset());
        assert!(0u64.is_unset());
        assert!(Uuid::nil().is_unset());

        assert!(!"x".to_string().is_unset());
        assert!(!7u32.is_unset());
        assert!(!Uuid::new_v4().is_unset());
    }

    // -----------------------------------------------------------------------
    // Batch variants
    // -----------------------------------------------------------------------

    #[test]
    fn batch_encode_preserves_order() {
        let keys = vec![3u32, 1, 2];
        assert_eq!(encode_keys(&keys), vec!["3", "1", "2"]);
    }

    #[test]
    fn batch_decode_preserves_order() {
        let raw = ["3", "1", "2"];
        let keys: Vec<u32> = decode_keys(&raw).unwrap();
        assert_eq!(keys, vec![3, 1, 2]);
    }

    #[test]
    fn batch_decode_fails_on_first_malformed_element() {
        let raw = ["3", "oops", "2"];
        assert!(decode_keys::<u32, _>(&raw).is_err());
    }
}
