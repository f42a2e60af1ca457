//! datafix-country - Main entry point
//!
//! Sets `country` on camera records that lack it, rewriting `cameras.json`
//! in the configured data folder. Missing or malformed input terminates the
//! process with the error chain.

use anyhow::{Context, Result};
use datafix_common::config::Settings;
use datafix_common::logging::{init_tracing, log_startup};
use datafix_country::{run, CAMERAS_FILE};

fn main() -> Result<()> {
    let settings = Settings::resolve();
    init_tracing(&settings.logging);
    log_startup("datafix-country", env!("CARGO_PKG_VERSION"), &settings);

    let path = settings.data_file(CAMERAS_FILE);
    run(&path).with_context(|| format!("Country default failed for {}", path.display()))?;

    Ok(())
}
