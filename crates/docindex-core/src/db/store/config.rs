use serde::{Deserialize, Serialize};

///
/// StoreConfig
///
/// Tuning for the in-memory store. Missing fields fall back to defaults so
/// partial configs deserialize cleanly.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Attempts `run_in_transaction` makes before surfacing an abort.
    pub max_attempts: u32,

    /// First id handed out for incomplete keys.
    pub first_id: i64,
}

impl StoreConfig {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_FIRST_ID: i64 = 1;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            first_id: Self::DEFAULT_FIRST_ID,
        }
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub const fn with_first_id(mut self, first_id: i64) -> Self {
        self.first_id = first_id;
        self
    }

    // zero attempts still runs the body once
    pub(super) const fn attempts(&self) -> u32 {
        if self.max_attempts == 0 {
            1
        } else {
            self.max_attempts
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
