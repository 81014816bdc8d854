//! Error types for key and identifier parsing.

use thiserror::Error;

/// Errors produced when decoding keys and catalog identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The string does not parse into the key's native form.
    #[error("malformed key {raw:?}: {reason}")]
    MalformedKey { raw: String, reason: String },

    /// The string is not a valid `kind:key` catalog identifier.
    #[error("malformed catalog id {raw:?}: expected \"kind:key\"")]
    MalformedId { raw: String },
}

impl TypeError {
    /// Build a [`TypeError::MalformedKey`] from the offending input and an
    /// underlying parse failure.
    pub fn malformed_key(raw: &str, reason: impl ToString) -> Self {
        Self::MalformedKey {
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}
