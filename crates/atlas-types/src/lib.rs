//! Foundation types for the Atlas resource catalog.
//!
//! This crate provides the identity layer shared by every other Atlas
//! crate: the codec between native entity keys and their canonical string
//! form, and the catalog identifier built from that form.
//!
//! # Key Types
//!
//! - [`EntityKey`] — bidirectional codec between a kind's native key type
//!   (string, integer, UUID) and the canonical string form
//! - [`CatalogId`] — `{kind, key}` pair uniquely identifying a catalog
//!   node, rendered as `kind:key`
//! - [`TypeError`] — decode failures for keys and identifiers

pub mod error;
pub mod id;
pub mod key;

pub use error::TypeError;
pub use id::CatalogId;
pub use key::{decode_keys, encode_keys, EntityKey};
