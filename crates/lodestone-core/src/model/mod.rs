//! Runtime model metadata.
//!
//! Types in `model` are the *static registration records* for indexable
//! models: one `ModelDescriptor` per model type, declared once and read-only
//! thereafter. Descriptors, the registry, and the synchronizer all plan
//! against these records; nothing here touches instances.
//!
//! The specialization link between models is an explicit `parent` field on
//! the record rather than live ancestor introspection, which keeps
//! content-type derivation a plain pointer walk.

pub mod descriptor;
pub mod field;
pub mod relation;

pub use descriptor::ModelDescriptor;
pub use field::{FieldKind, FieldModel};
pub use relation::RelationKind;
