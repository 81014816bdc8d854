//! Field and schema declarations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive type of a declared field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 text.
    String,
    /// Boolean flag.
    Bool,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 64-bit floating point.
    Float64,
    /// UUID in canonical hyphenated text form.
    Uuid,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float64 => "float64",
            Self::Uuid => "uuid",
        };
        write!(f, "{s}")
    }
}

/// A single declared field: a name, a primitive type, and whether an
/// external engine may coerce compatible representations into the type
/// (e.g. numeric strings into integers).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as it appears in the projected resource data.
    pub name: String,
    /// Primitive type of the field.
    pub ty: FieldType,
    /// Whether external engines may coerce compatible inputs.
    pub coerce: bool,
}

impl Field {
    /// Declare a field with no coercion.
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            coerce: false,
        }
    }

    /// Mark the field as coercible by external engines.
    pub fn coerced(mut self) -> Self {
        self.coerce = true;
        self
    }
}

/// An ordered, static declaration of a kind's field set.
///
/// A `Schema` is a pure declaration: it never varies at runtime for a
/// given kind and is never enforced here. It exists to be handed to
/// external validation and serialization engines, and its field set must
/// be a superset of every field an external reader needs to render or
/// edit the resource.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Declare a schema from an ordered field list.
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns `true` if a field with the given name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
