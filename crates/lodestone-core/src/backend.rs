//! Search-backend boundary.
//!
//! Backends are external collaborators: each exposes `add` and `delete`
//! and may fail however it likes. The roster of active backends is
//! assembled once at startup and handed to the synchronizer; there is no
//! call-time discovery.

use crate::traits::Record;
use std::sync::Arc;

/// Failure surface of a backend call. Backends wrap whatever their client
/// library raises; the synchronizer only logs it.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

///
/// SearchBackend
///
/// Object-safe so rosters can hold `Arc<dyn SearchBackend>`. Calls are
/// bounded, synchronous operations; timeout and retry policy belong to
/// the implementation, not this layer.
///

pub trait SearchBackend: Send + Sync {
    /// Upsert one instance into this backend's index.
    fn add(&self, instance: &dyn Record) -> Result<(), BackendError>;

    /// Remove one instance from this backend's index.
    fn delete(&self, instance: &dyn Record) -> Result<(), BackendError>;
}

///
/// BackendEntry
///

struct BackendEntry {
    name: String,
    auto_update: bool,
    handle: Arc<dyn SearchBackend>,
}

///
/// Backends
/// Named backend roster with per-entry auto-update flags.
///
/// Auto-update backends receive synchronous add/delete events on every
/// lifecycle change; manual backends are only touched by bulk/offline
/// reindexing.
///

#[derive(Default)]
pub struct Backends {
    entries: Vec<BackendEntry>,
}

impl Backends {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an auto-update backend.
    pub fn insert(&mut self, name: impl Into<String>, handle: Arc<dyn SearchBackend>) {
        self.entries.push(BackendEntry {
            name: name.into(),
            auto_update: true,
            handle,
        });
    }

    /// Register a bulk-only backend (skipped by the synchronizer).
    pub fn insert_manual(&mut self, name: impl Into<String>, handle: Arc<dyn SearchBackend>) {
        self.entries.push(BackendEntry {
            name: name.into(),
            auto_update: false,
            handle,
        });
    }

    /// All backends, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn SearchBackend)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.handle.as_ref()))
    }

    /// Auto-update backends only, in registration order.
    pub fn with_auto_update(&self) -> impl Iterator<Item = (&str, &dyn SearchBackend)> {
        self.entries
            .iter()
            .filter(|entry| entry.auto_update)
            .map(|entry| (entry.name.as_str(), entry.handle.as_ref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
