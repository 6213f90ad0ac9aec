//! Indexable-model registry.
//!
//! Models register once at startup (normally through
//! [`register_indexable!`](crate::register_indexable)); the registry is
//! validated exactly once on first read and is read-only thereafter, so
//! concurrent readers share it without coordination.

mod validate;

use crate::{
    error::RegistryError,
    field::{AnyField, FieldSet},
    model::ModelDescriptor,
    query::QuerySpec,
    traits::Indexable,
};
use std::sync::{Arc, LazyLock, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

///
/// IndexedModel
/// Registration record binding a model descriptor to its declared
/// search-field descriptors.
///

pub struct IndexedModel {
    model: &'static ModelDescriptor,
    declared: Vec<AnyField>,
}

impl IndexedModel {
    #[must_use]
    pub fn of<M: Indexable>() -> Self {
        Self {
            model: M::MODEL,
            declared: M::search_fields(),
        }
    }

    /// Build a registration record directly (dynamic registration, tests).
    #[must_use]
    pub const fn from_parts(model: &'static ModelDescriptor, declared: Vec<AnyField>) -> Self {
        Self { model, declared }
    }

    #[must_use]
    pub const fn model(&self) -> &'static ModelDescriptor {
        self.model
    }

    /// Declared descriptors in declaration order, before merging.
    #[must_use]
    pub fn declared_fields(&self) -> &[AnyField] {
        &self.declared
    }

    /// Merged descriptors: one per `(kind, field_name)`, later declarations
    /// overriding earlier ones. Partition with `searchable()`,
    /// `filterable()`, and `related()` on the result.
    #[must_use]
    pub fn search_fields(&self) -> FieldSet {
        FieldSet::merge(&self.declared)
    }

    /// The model's full queryable set with every related group's
    /// eager-load strategy attached. Lazy; nothing is materialized here.
    #[must_use]
    pub fn indexed_objects(&self) -> QuerySpec {
        let mut query = QuerySpec::all(self.model);
        for related in self.search_fields().related() {
            query = related.apply_eager_load(query);
        }

        query
    }
}

///
/// ModelRegistry
///

#[derive(Default)]
pub struct ModelRegistry {
    records: Vec<Arc<IndexedModel>>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: IndexedModel) {
        self.records.push(Arc::new(record));
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<Arc<IndexedModel>> {
        self.records
            .iter()
            .find(|record| record.model().path == path)
            .cloned()
    }

    /// Every registered, non-abstract model, in registration order.
    #[must_use]
    pub fn indexed(&self) -> Vec<Arc<IndexedModel>> {
        self.records
            .iter()
            .filter(|record| !record.model().is_abstract)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn records(&self) -> &[Arc<IndexedModel>] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

///
/// REGISTRY
/// the static data structure
///

static REGISTRY: LazyLock<RwLock<ModelRegistry>> =
    LazyLock::new(|| RwLock::new(ModelRegistry::new()));

static REGISTRY_VALIDATED: OnceLock<bool> = OnceLock::new();

/// Acquire a write guard to the global registry during startup
/// registration.
pub fn registry_write() -> RwLockWriteGuard<'static, ModelRegistry> {
    REGISTRY
        .write()
        .expect("registry RwLock poisoned while acquiring write lock")
}

// registry_read
// just reads the registry directly without validation
pub(crate) fn registry_read() -> RwLockReadGuard<'static, ModelRegistry> {
    REGISTRY
        .read()
        .expect("registry RwLock poisoned while acquiring read lock")
}

/// Register a model type. Validation is deferred to the first read.
pub fn register<M: Indexable>() {
    registry_write().insert(IndexedModel::of::<M>());
}

/// Read the global registry, validating it exactly once per process.
pub fn get_registry() -> Result<RwLockReadGuard<'static, ModelRegistry>, RegistryError> {
    let registry = registry_read();
    validate(&registry).map_err(RegistryError::Validation)?;

    Ok(registry)
}

// validate
fn validate(registry: &ModelRegistry) -> Result<(), crate::error::ErrorTree> {
    if REGISTRY_VALIDATED.get().copied().unwrap_or(false) {
        return Ok(());
    }

    validate::validate_registry(registry)?;

    REGISTRY_VALIDATED.set(true).ok();

    Ok(())
}

/// Every registered model type that is not declared abstract.
pub fn indexed_models() -> Result<Vec<Arc<IndexedModel>>, RegistryError> {
    Ok(get_registry()?.indexed())
}

/// Registration record for one model path.
pub fn lookup(path: &str) -> Result<Arc<IndexedModel>, RegistryError> {
    get_registry()?
        .get(path)
        .ok_or_else(|| RegistryError::UnknownModel {
            path: path.to_string(),
        })
}

/// Whether a model type participates in indexing: registered and concrete.
#[must_use]
pub fn class_is_indexed(model: &ModelDescriptor) -> bool {
    !model.is_abstract && registry_read().get(model.path).is_some()
}

///
/// register_indexable
///
/// Registers a model type with the global registry at program startup.
///

#[macro_export]
macro_rules! register_indexable {
    ( $model:ty ) => {
        const _: () = {
            #[$crate::__reexports::ctor::ctor(unsafe, anonymous, crate_path = $crate::__reexports::ctor)]
            fn __register() {
                $crate::registry::register::<$model>();
            }
        };
    };
}
