//! Static schema declarations for Atlas resource kinds.
//!
//! Every catalog kind declares the shape of its projected data once, as an
//! ordered list of named, typed fields. The declaration is consumed by
//! external validation and serialization engines; this crate performs no
//! validation of its own.
//!
//! # Key Types
//!
//! - [`Schema`] — ordered field set for one kind
//! - [`Field`] — a named field with a primitive type and a coercion flag
//! - [`FieldType`] — the closed set of primitive field types

pub mod schema;

pub use schema::{Field, FieldType, Schema};
