use crate::{field::AnyField, model::ModelDescriptor, value::Value};
use std::{fmt, sync::Arc};

///
/// RecordRef
/// Shared handle to a live model instance at the indexing boundary.
///

pub type RecordRef = Arc<dyn Record>;

///
/// Extracted
/// Result of attribute resolution and descriptor extraction.
///

#[derive(Clone)]
pub enum Extracted {
    /// Resolution failed or short-circuited on a missing step.
    Absent,
    /// A related collection.
    Many(Vec<RecordRef>),
    /// A single related object.
    One(RecordRef),
    /// A plain value.
    Scalar(Value),
}

// Records are opaque behind the trait; debug output identifies them by
// model path rather than contents.
impl fmt::Debug for Extracted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "Absent"),
            Self::Many(records) => f
                .debug_tuple("Many")
                .field(&records.iter().map(|r| r.model().path).collect::<Vec<_>>())
                .finish(),
            Self::One(record) => f.debug_tuple("One").field(&record.model().path).finish(),
            Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
        }
    }
}

impl Extracted {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        if let Self::Scalar(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn scalar(self) -> Option<Value> {
        if let Self::Scalar(value) = self {
            Some(value)
        } else {
            None
        }
    }
}

impl From<Value> for Extracted {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

///
/// Canonical
///
/// Resolution of an instance to the canonical form that should actually be
/// indexed. The default is identity; models using specialized-subtype
/// storage redirect to the most-specialized live representation, or skip
/// when no indexable form exists.
///

pub enum Canonical {
    /// Index this instance as-is.
    Keep,
    /// Index this other instance instead (single hop, not chained).
    Redirect(RecordRef),
    /// Nothing to index for this instance.
    Skip,
}

///
/// Record
///
/// Instance-access boundary for extraction. Implemented by model instances;
/// the indexing layer only ever borrows records and never mutates them.
///

pub trait Record: Send + Sync {
    /// Static metadata record for this instance's model type.
    fn model(&self) -> &'static ModelDescriptor;

    /// Value of a declared storage field.
    ///
    /// Returns `Some(Value::Null)` for a declared-but-unset field and
    /// `None` when the model has no such declared field.
    fn get_value(&self, field: &str) -> Option<Value>;

    /// Named-attribute access for path traversal and plain-attribute
    /// fallback: storage fields, relations, and derived accessors the
    /// model author declared at definition time.
    ///
    /// Implementations may run arbitrary model code (a derived accessor is
    /// a computation), so extraction is not guaranteed side-effect-free
    /// from the caller's perspective; it must never mutate the record.
    /// Dangling relations resolve to [`Extracted::Absent`], never an error.
    fn attribute(&self, name: &str) -> Extracted;

    /// Identity value used for existence checks and backend logging.
    fn identity(&self) -> Value {
        self.get_value(self.model().primary_key)
            .unwrap_or(Value::Null)
    }

    /// Canonical indexable form of this instance.
    fn canonical_instance(&self) -> Canonical {
        Canonical::Keep
    }
}

///
/// Indexable
///
/// The capability a model type implements to participate in indexing.
/// Resolved via trait dispatch; there is no shared base type.
///

pub trait Indexable: Record {
    /// Static registration record, including the specialization link.
    const MODEL: &'static ModelDescriptor;

    /// Declared descriptors in declaration order, before dedup/override
    /// merging (see `IndexedModel::search_fields`).
    fn search_fields() -> Vec<AnyField>;
}
