//! Tracing subscriber setup shared by the pipeline binaries

use crate::config::{LoggingConfig, Settings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins when set; otherwise the configured level applies.
/// Output goes to stdout, which doubles as the run's trace.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Log build identification and resolved settings
pub fn log_startup(binary: &str, version: &str, settings: &Settings) {
    info!("Starting {} v{}", binary, version);
    match &settings.config_file {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    info!("Data folder: {}", settings.data_dir.display());
    for warning in &settings.warnings {
        warn!("{}", warning);
    }
}
