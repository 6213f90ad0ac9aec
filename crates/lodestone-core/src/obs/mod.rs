//! Synchronization metrics.
//!
//! Synchronizer logic MUST NOT touch counter state directly. All
//! instrumentation flows through [`SyncEvent`] and [`MetricsSink`]; the
//! sink module is the only bridge into the global counters here.

pub mod sink;

pub use sink::{MetricsSink, SyncEvent, SyncOp, with_metrics_sink};
pub(crate) use sink::record;

use serde::Serialize;
use std::{
    collections::BTreeMap,
    sync::{LazyLock, Mutex},
};

///
/// ModelCounters
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ModelCounters {
    pub saves: u64,
    pub deletes: u64,
    pub backend_failures: u64,
    pub skipped_not_visible: u64,
    pub skipped_no_canonical: u64,
}

///
/// SyncCounters
/// Process-wide totals plus per-model breakdown.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct SyncCounters {
    pub saves: u64,
    pub deletes: u64,
    pub backend_failures: u64,
    pub skipped_not_visible: u64,
    pub skipped_no_canonical: u64,
    pub models: BTreeMap<String, ModelCounters>,
}

static STATE: LazyLock<Mutex<SyncCounters>> = LazyLock::new(|| Mutex::new(SyncCounters::default()));

pub(crate) fn with_state_mut<T>(f: impl FnOnce(&mut SyncCounters) -> T) -> T {
    let mut state = STATE
        .lock()
        .expect("sync counters mutex poisoned while locking");
    f(&mut state)
}

/// Snapshot the current counters for endpoint/test plumbing.
#[must_use]
pub fn sync_report() -> SyncCounters {
    with_state_mut(|state| state.clone())
}

/// Reset all counter state.
pub fn sync_reset_all() {
    with_state_mut(|state| *state = SyncCounters::default());
}
