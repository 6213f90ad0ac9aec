//! Metrics sink boundary.
//!
//! The synchronizer emits [`SyncEvent`]s through [`record`]; by default
//! they land in the global counters, and tests can install a scoped sink
//! override to observe the event stream directly.

use crate::obs::with_state_mut;
use std::{
    cell::RefCell,
    fmt::{self, Display},
};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = const { RefCell::new(None) };
}

///
/// SyncOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum SyncOp {
    Add,
    Delete,
}

impl Display for SyncOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Add => "add",
            Self::Delete => "delete",
        };
        write!(f, "{label}")
    }
}

///
/// SyncEvent
///

#[derive(Clone, Copy, Debug)]
#[remain::sorted]
pub enum SyncEvent<'a> {
    BackendFailure {
        op: SyncOp,
        model_path: &'static str,
        backend: &'a str,
    },
    Dispatch {
        op: SyncOp,
        model_path: &'static str,
    },
    SkippedNoCanonical {
        model_path: &'static str,
    },
    SkippedNotVisible {
        model_path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: SyncEvent<'_>);
}

/// GlobalMetricsSink
/// Default process-local sink that writes into the global counter state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: SyncEvent<'_>) {
        match event {
            SyncEvent::Dispatch { op, model_path } => {
                with_state_mut(|state| {
                    let entry = state.models.entry(model_path.to_string()).or_default();
                    match op {
                        SyncOp::Add => {
                            state.saves = state.saves.saturating_add(1);
                            entry.saves = entry.saves.saturating_add(1);
                        }
                        SyncOp::Delete => {
                            state.deletes = state.deletes.saturating_add(1);
                            entry.deletes = entry.deletes.saturating_add(1);
                        }
                    }
                });
            }

            SyncEvent::BackendFailure { model_path, .. } => {
                with_state_mut(|state| {
                    state.backend_failures = state.backend_failures.saturating_add(1);
                    let entry = state.models.entry(model_path.to_string()).or_default();
                    entry.backend_failures = entry.backend_failures.saturating_add(1);
                });
            }

            SyncEvent::SkippedNotVisible { model_path } => {
                with_state_mut(|state| {
                    state.skipped_not_visible = state.skipped_not_visible.saturating_add(1);
                    let entry = state.models.entry(model_path.to_string()).or_default();
                    entry.skipped_not_visible = entry.skipped_not_visible.saturating_add(1);
                });
            }

            SyncEvent::SkippedNoCanonical { model_path } => {
                with_state_mut(|state| {
                    state.skipped_no_canonical = state.skipped_no_canonical.saturating_add(1);
                    let entry = state.models.entry(model_path.to_string()).or_default();
                    entry.skipped_no_canonical = entry.skipped_no_canonical.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: SyncEvent<'_>) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in
        //   `with_metrics_sink`, which always restores the previous pointer
        //   before returning, including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        // - Only a shared reference is materialized, matching the shared
        //   borrow used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope; `Guard`
    //   restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists the
    //   pointer, so it cannot outlive the borrowed sink.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}
