//! Object-store boundary.
//!
//! The store itself is an external collaborator; this module only defines
//! the lazy query description handed to it. `QuerySpec` is a pure builder:
//! constructing one performs no I/O, and every call produces a fresh value,
//! so construction is safe for concurrent use.

use crate::{error::StoreError, model::ModelDescriptor, traits::RecordRef, value::Value};
use serde::Serialize;

///
/// EagerKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum EagerKind {
    /// Batched follow-up fetch alongside the primary rows.
    Batch,
    /// Join-based fetch with the primary rows.
    Join,
}

///
/// EagerLoad
/// One eager-load instruction attached to a query.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EagerLoad {
    pub relation: String,
    pub kind: EagerKind,
}

///
/// QuerySpec
/// Lazy, filterable description of a model's queryable instance set.
///

#[derive(Clone, Debug)]
pub struct QuerySpec {
    pub model: &'static ModelDescriptor,
    /// Identity filter (`.filter(pk=value)`), if any.
    pub identity: Option<Value>,
    /// Accumulated eager-load instructions, in attachment order.
    pub eager: Vec<EagerLoad>,
}

impl QuerySpec {
    /// The full queryable set of a model's instances.
    #[must_use]
    pub const fn all(model: &'static ModelDescriptor) -> Self {
        Self {
            model,
            identity: None,
            eager: Vec::new(),
        }
    }

    /// Restrict the query to one instance by identity key.
    #[must_use]
    pub fn with_identity(mut self, identity: Value) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Attach an eager-load instruction. Repeat attachments for the same
    /// relation are collapsed.
    #[must_use]
    pub fn eager(mut self, relation: &str, kind: EagerKind) -> Self {
        match self.eager.iter_mut().find(|e| e.relation == relation) {
            Some(existing) => existing.kind = kind,
            None => self.eager.push(EagerLoad {
                relation: relation.to_string(),
                kind,
            }),
        }

        self
    }
}

///
/// ObjectStore
///
/// The opaque store consumed by the synchronizer and by bulk reindex
/// tooling. Implementations resolve a `QuerySpec` however they like; the
/// indexing layer never sees their query language.
///

pub trait ObjectStore: Send + Sync {
    /// Whether any instance matches the query.
    fn exists(&self, query: &QuerySpec) -> Result<bool, StoreError>;

    /// Materialize the query (bulk-indexing surface).
    fn fetch(&self, query: &QuerySpec) -> Result<Vec<RecordRef>, StoreError>;
}
