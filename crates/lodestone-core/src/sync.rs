//! Lifecycle synchronization into search backends.
//!
//! Indexing is a best-effort side channel to the system of record: a
//! broken or slow backend must never block or fail the primary write
//! path, and one backend's failure must never mask another's success.
//! Backend calls run synchronously and sequentially in roster order;
//! recovery from cross-backend inconsistency is bulk reindexing.

use crate::{
    backend::Backends,
    error::SyncError,
    obs::{self, SyncEvent, SyncOp},
    query::ObjectStore,
    registry,
    traits::{Canonical, RecordRef},
};
use std::sync::Arc;

///
/// SyncOutcome
/// What a lifecycle event amounted to. Backend failures are reported in
/// `failed`, never as an error to the caller.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum SyncOutcome {
    /// Pushed to every auto-update backend; `failed` of `attempted` calls
    /// were caught and logged.
    Dispatched { attempted: usize, failed: usize },
    /// Canonical resolution declined to produce an instance.
    SkippedNoCanonical,
    /// The instance is not visible through its own indexed-objects query.
    SkippedNotVisible,
}

///
/// Synchronizer
///
/// Constructed once at startup with the store handle and the assembled
/// backend roster, then shared by every lifecycle caller. `on_save` and
/// `on_delete` run on the calling thread; ordering across overlapping
/// events for one instance is the caller's responsibility.
///

pub struct Synchronizer {
    store: Arc<dyn ObjectStore>,
    backends: Backends,
}

impl Synchronizer {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, backends: Backends) -> Self {
        Self { store, backends }
    }

    #[must_use]
    pub const fn backends(&self) -> &Backends {
        &self.backends
    }

    /// Push a saved instance into every auto-update backend.
    ///
    /// The instance is first resolved to its canonical indexable form,
    /// then checked for visibility through its own model's
    /// indexed-objects query; an instance its canonical query cannot see
    /// yet (e.g. a specialized-subtype row not fully committed) is
    /// silently skipped.
    pub fn on_save(&self, instance: &RecordRef) -> Result<SyncOutcome, SyncError> {
        let Some(canonical) = resolve_canonical(instance) else {
            obs::record(SyncEvent::SkippedNoCanonical {
                model_path: instance.model().path,
            });
            return Ok(SyncOutcome::SkippedNoCanonical);
        };

        let model_path = canonical.model().path;
        let record = registry::lookup(model_path)?;
        let query = record.indexed_objects().with_identity(canonical.identity());
        if !self.store.exists(&query)? {
            tracing::debug!(
                model = model_path,
                identity = ?canonical.identity(),
                "instance not visible through its indexed-objects query; skipping"
            );
            obs::record(SyncEvent::SkippedNotVisible { model_path });
            return Ok(SyncOutcome::SkippedNotVisible);
        }

        Ok(self.dispatch(SyncOp::Add, &canonical))
    }

    /// Remove a deleted instance from every auto-update backend.
    ///
    /// No existence check: the row may already be gone from storage.
    pub fn on_delete(&self, instance: &RecordRef) -> Result<SyncOutcome, SyncError> {
        let Some(canonical) = resolve_canonical(instance) else {
            obs::record(SyncEvent::SkippedNoCanonical {
                model_path: instance.model().path,
            });
            return Ok(SyncOutcome::SkippedNoCanonical);
        };

        Ok(self.dispatch(SyncOp::Delete, &canonical))
    }

    // Per-backend failure isolation: every failure is caught, logged with
    // the backend's name and the instance's identity, and never prevents
    // the remaining backends from being attempted.
    fn dispatch(&self, op: SyncOp, record: &RecordRef) -> SyncOutcome {
        let model_path = record.model().path;
        obs::record(SyncEvent::Dispatch { op, model_path });

        let mut attempted = 0;
        let mut failed = 0;
        for (name, backend) in self.backends.with_auto_update() {
            attempted += 1;
            let result = match op {
                SyncOp::Add => backend.add(record.as_ref()),
                SyncOp::Delete => backend.delete(record.as_ref()),
            };

            if let Err(error) = result {
                failed += 1;
                obs::record(SyncEvent::BackendFailure {
                    op,
                    model_path,
                    backend: name,
                });
                tracing::error!(
                    backend = name,
                    model = model_path,
                    identity = ?record.identity(),
                    error = %error,
                    "search backend {op} failed; continuing with remaining backends"
                );
            }
        }

        SyncOutcome::Dispatched { attempted, failed }
    }
}

// Canonical resolution is a single hop: a redirected instance is indexed
// as returned, not re-resolved.
fn resolve_canonical(instance: &RecordRef) -> Option<RecordRef> {
    match instance.canonical_instance() {
        Canonical::Keep => Some(Arc::clone(instance)),
        Canonical::Redirect(record) => Some(record),
        Canonical::Skip => None,
    }
}
