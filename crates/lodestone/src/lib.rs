//! ## Crate layout
//! - `core`: dynamic values, field descriptors, model metadata, the
//!   indexable-model registry, and the multi-backend synchronizer.
//!
//! The `prelude` module mirrors the surface used by model-declaring code;
//! backend implementations reach into `core` directly for the extraction
//! machinery.

pub use lodestone_core as core;

/// re-exports
///
/// macros can use these, stops the user having to specify all the
/// dependencies in the Cargo.toml file manually
pub mod __reexports {
    pub use lodestone_core::__reexports::ctor;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use lodestone_core::{Error, err, impl_value_from, register_indexable};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        backend::{BackendError, Backends, SearchBackend},
        error::{Error, RegistryError, StoreError, SyncError},
        field::{
            AnyField, DescriptorKind, FieldSet, FilterField, RelatedFields, SearchField,
        },
        model::{FieldKind, FieldModel, ModelDescriptor, RelationKind},
        query::{EagerKind, EagerLoad, ObjectStore, QuerySpec},
        registry::{self, IndexedModel},
        resolve::resolve_path,
        sync::{SyncOutcome, Synchronizer},
        traits::{Canonical, Extracted, Indexable, Record, RecordRef},
        value::Value,
    };
}
