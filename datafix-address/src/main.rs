//! datafix-address - Main entry point
//!
//! Fills in a default address on developer records in `developers.json`.
//! Load problems are reported and the process exits normally; the file is
//! left as it was.

use anyhow::{Context, Result};
use datafix_address::{run, AddressRun, DEVELOPERS_FILE};
use datafix_common::config::Settings;
use datafix_common::logging::{init_tracing, log_startup};
use tracing::info;

fn main() -> Result<()> {
    let settings = Settings::resolve();
    init_tracing(&settings.logging);
    log_startup("datafix-address", env!("CARGO_PKG_VERSION"), &settings);

    let path = settings.data_file(DEVELOPERS_FILE);
    let outcome = run(&path).with_context(|| format!("Failed to save {}", path.display()))?;

    if let AddressRun::Aborted(reason) = outcome {
        info!("Stopped without changes ({:?})", reason);
    }

    Ok(())
}
