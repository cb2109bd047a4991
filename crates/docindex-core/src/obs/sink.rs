//! Metrics sink boundary.
//!
//! Engine code MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent<'a> {
    SchemaBuild {
        entity: &'a str,
        indexes: u64,
    },
    IndexDelta {
        kind: &'a str,
        inserts: u64,
        removes: u64,
    },
    UniqueCheck {
        kind: &'a str,
        queries: u64,
    },
    UniqueViolation {
        kind: &'a str,
    },
    PrimaryViolation {
        kind: &'a str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default sink writing into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::SchemaBuild { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.schema_builds = m.ops.schema_builds.saturating_add(1);
                });
            }

            MetricsEvent::IndexDelta {
                kind,
                inserts,
                removes,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.index_batches = m.ops.index_batches.saturating_add(1);
                    m.ops.index_inserts = m.ops.index_inserts.saturating_add(inserts);
                    m.ops.index_removes = m.ops.index_removes.saturating_add(removes);

                    let entry = m.entities.entry(kind.to_string()).or_default();
                    entry.index_inserts = entry.index_inserts.saturating_add(inserts);
                    entry.index_removes = entry.index_removes.saturating_add(removes);
                });
            }

            MetricsEvent::UniqueCheck { queries, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.unique_checks = m.ops.unique_checks.saturating_add(1);
                    m.ops.unique_queries = m.ops.unique_queries.saturating_add(queries);
                });
            }

            MetricsEvent::UniqueViolation { kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.unique_violations = m.ops.unique_violations.saturating_add(1);
                    let entry = m.entities.entry(kind.to_string()).or_default();
                    entry.unique_violations = entry.unique_violations.saturating_add(1);
                });
            }

            MetricsEvent::PrimaryViolation { kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.primary_violations = m.ops.primary_violations.saturating_add(1);
                    let entry = m.entities.entry(kind.to_string()).or_default();
                    entry.primary_violations = entry.primary_violations.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent<'_>) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's metrics state.
///
/// `window_start_ms` filters by window start (`EventState::window_start_ms`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> metrics::EventReport {
    metrics::report_window_start(window_start_ms)
}

/// Reset all metrics state on the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on the current thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
