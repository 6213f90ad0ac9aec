use crate::{model::relation::RelationKind, value::Value};
use serde::Serialize;
use std::fmt::{self, Display};

///
/// FieldModel
/// Declared storage-field metadata used by descriptor extraction and
/// index-schema planning.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as used in descriptor declarations.
    pub name: &'static str,
    /// Storage attribute name; differs from `name` for reference columns
    /// (e.g. `author` stored as `author_id`).
    pub attname: &'static str,
    /// Native type projection for the index schema.
    pub kind: FieldKind,
    /// Relation classification, if this field is a relation.
    pub relation: Option<RelationKind>,
    /// Optional transform applied to extracted values before they are
    /// handed to a backend.
    pub searchable_content: Option<fn(&Value) -> Value>,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            attname: name,
            kind,
            relation: None,
            searchable_content: None,
        }
    }

    #[must_use]
    pub const fn with_attname(mut self, attname: &'static str) -> Self {
        self.attname = attname;
        self
    }

    #[must_use]
    pub const fn with_relation(mut self, relation: RelationKind) -> Self {
        self.relation = Some(relation);
        self
    }

    #[must_use]
    pub const fn with_searchable_content(mut self, transform: fn(&Value) -> Value) -> Self {
        self.searchable_content = Some(transform);
        self
    }

    #[must_use]
    pub const fn is_relation(&self) -> bool {
        self.relation.is_some()
    }
}

///
/// FieldKind
///
/// Minimal native-type surface needed by index-schema derivation.
/// Aligned with `Value` variants; this is a lossy projection of the
/// model's storage types. Unknown fields default to `Text`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum FieldKind {
    Bool,
    Date,
    DateTime,
    Float,
    Int,
    Text,
    Uint,
    Ulid,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bool => "bool",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Float => "float",
            Self::Int => "int",
            Self::Text => "text",
            Self::Uint => "uint",
            Self::Ulid => "ulid",
        };
        write!(f, "{label}")
    }
}
