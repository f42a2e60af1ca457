//! Per-run transform counts

use std::fmt;

/// Record counts for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformSummary {
    /// Records visited
    pub total: usize,
    /// Records that had at least one field added or overwritten
    pub modified: usize,
}

impl TransformSummary {
    pub fn record(&mut self, modified: bool) {
        self.total += 1;
        if modified {
            self.modified += 1;
        }
    }

    /// Dirty flag: true when any record changed
    pub fn is_dirty(&self) -> bool {
        self.modified > 0
    }

    pub fn unchanged(&self) -> usize {
        self.total - self.modified
    }
}

impl fmt::Display for TransformSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records, {} modified, {} unchanged",
            self.total,
            self.modified,
            self.unchanged()
        )
    }
}
