//! datafix-status - User status derivation
//!
//! Reads `users.json`, recomputes every user's `status` against a single
//! evaluation instant, and writes the result to `updated_users.json`. The
//! source file is never modified.
//!
//! Any load failure (missing file, invalid JSON, wrong shape) propagates.

pub mod status;

use datafix_common::store::{load_collection, write_collection};
use datafix_common::{EvaluationInstant, JsonLayout, Result, TransformSummary};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

pub use status::{apply_status, derive_status, StatusChange, UserCredentials, UserStatus};

/// Input file, read only
pub const USERS_FILE: &str = "users.json";

/// Output file, always written
pub const UPDATED_USERS_FILE: &str = "updated_users.json";

/// Output indentation
pub const LAYOUT: JsonLayout = JsonLayout::TWO_SPACE;

/// Result of a status run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRun {
    /// `modified` counts records whose stored label changed
    pub summary: TransformSummary,
    /// Users per derived status
    pub counts: BTreeMap<UserStatus, usize>,
}

impl StatusRun {
    pub fn count(&self, status: UserStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}

/// Derive statuses for every user in `source` and write them to `target`
pub fn run(source: &Path, target: &Path, instant: EvaluationInstant) -> Result<StatusRun> {
    info!("Evaluating user status at {}", instant);
    let mut users = load_collection(source)?;

    let mut outcome = StatusRun::default();
    for user in users.iter_mut() {
        let change = apply_status(user, instant);
        debug!("User {} → {}", user.label(), change.status);
        outcome.summary.record(change.changed());
        *outcome.counts.entry(change.status).or_insert(0) += 1;
    }

    write_collection(target, &users, LAYOUT)?;

    for status in UserStatus::ALL {
        info!("  {:<24} {}", status.label(), outcome.count(status));
    }
    info!(
        "Updated user data saved to '{}' ({})",
        target.display(),
        outcome.summary
    );
    Ok(outcome)
}
