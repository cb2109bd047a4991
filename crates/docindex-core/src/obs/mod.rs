//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! The engine never logs; it reports what it did as metrics events.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport, EventState};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
