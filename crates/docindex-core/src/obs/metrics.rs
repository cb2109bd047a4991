use std::{
    cell::RefCell,
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters for index maintenance and uniqueness checks.
///

#[derive(Clone, Debug)]
pub struct EventState {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
    pub window_start_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            entities: BTreeMap::new(),
            window_start_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EventOps {
    // Schema cache
    pub schema_builds: u64,

    // Index maintenance
    pub index_batches: u64,
    pub index_inserts: u64,
    pub index_removes: u64,

    // Constraints
    pub unique_checks: u64,
    pub unique_queries: u64,
    pub unique_violations: u64,
    pub primary_violations: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntityCounters {
    pub index_inserts: u64,
    pub index_removes: u64,
    pub unique_violations: u64,
    pub primary_violations: u64,
}

///
/// EventReport
///

#[derive(Clone, Debug, Default)]
pub struct EventReport {
    /// Counters, or `None` when the window started before the requested start.
    pub counters: Option<EventState>,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters and restart the window.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Snapshot counters when the current window started at or after `window_start_ms`.
pub(crate) fn report_window_start(window_start_ms: Option<u64>) -> EventReport {
    with_state(|m| {
        if let Some(start) = window_start_ms
            && start > m.window_start_ms
        {
            return EventReport::default();
        }

        EventReport {
            counters: Some(m.clone()),
        }
    })
}

#[allow(clippy::cast_possible_truncation)]
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}
