//! Core runtime for Lodestone: dynamic values, field descriptors, model
//! metadata, the indexable-model registry, and multi-backend
//! synchronization.

// public exports are one module level down
pub mod backend;
pub mod error;
pub mod field;
pub mod model;
pub mod obs;
pub mod query;
pub mod registry;
pub mod resolve;
pub mod sync;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Maximum length for model identifiers (`app_label` and `model_name`).
///
/// Content types concatenate identifiers down the specialization chain, so
/// bounded segments keep derived names within sane index-schema limits.
pub const MAX_MODEL_NAME_LEN: usize = 64;

/// Maximum length for declared descriptor field names.
pub const MAX_FIELD_NAME_LEN: usize = 64;

///
/// Reexports
///
/// Macros expand against these, so callers do not have to declare the
/// underlying dependencies themselves.
///

pub mod __reexports {
    pub use ctor;
}

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No stores, sinks, validators, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        backend::{Backends, SearchBackend},
        field::{AnyField, FieldSet, FilterField, RelatedFields, SearchField},
        model::{FieldKind, FieldModel, ModelDescriptor, RelationKind},
        query::{EagerKind, ObjectStore, QuerySpec},
        registry::IndexedModel,
        sync::{SyncOutcome, Synchronizer},
        traits::{Canonical, Extracted, Indexable, Record, RecordRef},
        value::Value,
    };
}
