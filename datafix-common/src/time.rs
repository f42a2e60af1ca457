//! Evaluation instant
//!
//! Time-relative rules compare against one instant captured at the start of
//! a run and passed down explicitly, so every record in a batch sees the
//! same cutoff.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;

/// The single point in time used for all comparisons within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EvaluationInstant(DateTime<Utc>);

impl EvaluationInstant {
    /// Capture the current UTC wall-clock time
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build from Unix epoch milliseconds
    ///
    /// Returns None when out of chrono's representable range.
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Unix epoch milliseconds, the unit stored in user records
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl fmt::Display for EvaluationInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ms)", self.0.to_rfc3339(), self.epoch_millis())
    }
}
