//! datafix-status - Main entry point
//!
//! Captures the evaluation instant once, then derives user statuses from
//! `users.json` into `updated_users.json`.

use anyhow::{Context, Result};
use datafix_common::config::Settings;
use datafix_common::logging::{init_tracing, log_startup};
use datafix_common::EvaluationInstant;
use datafix_status::{run, UPDATED_USERS_FILE, USERS_FILE};

fn main() -> Result<()> {
    let settings = Settings::resolve();
    init_tracing(&settings.logging);
    log_startup("datafix-status", env!("CARGO_PKG_VERSION"), &settings);

    let instant = EvaluationInstant::now();
    let source = settings.data_file(USERS_FILE);
    let target = settings.data_file(UPDATED_USERS_FILE);

    run(&source, &target, instant)
        .with_context(|| format!("Status derivation failed for {}", source.display()))?;

    Ok(())
}
