//! datafix-country - Country default for camera records
//!
//! Adds `country: "UAE"` to every camera record that has no `country` key.
//! The source file is always rewritten in place, even when nothing changed.
//!
//! Error strictness: a missing or malformed file propagates to the caller.
//! A file whose top level is not a list of records is reported and the run
//! ends without writing.

use datafix_common::store::{load_collection, to_json_string, write_collection};
use datafix_common::{ErrorKind, Field, JsonLayout, Record, Result, TransformSummary};
use serde_json::Value;
use std::path::Path;
use tracing::{error, info, warn};

/// Input file, rewritten in place
pub const CAMERAS_FILE: &str = "cameras.json";

/// Value written when `country` is missing
pub const DEFAULT_COUNTRY: &str = "UAE";

/// Output indentation
pub const LAYOUT: JsonLayout = JsonLayout::FOUR_SPACE;

/// What the country rule did to one record
#[derive(Debug, Clone, PartialEq)]
pub enum CountryOutcome {
    /// Field was missing and has been set to the default
    Added,
    /// Field already existed; carries its value (null included)
    Present(Value),
}

/// Apply the country default to a single record
pub fn apply_country_default(record: &mut Record) -> CountryOutcome {
    if record.set_if_absent("country", || Value::String(DEFAULT_COUNTRY.to_string())) {
        return CountryOutcome::Added;
    }
    match record.field("country") {
        Field::Value(value) => CountryOutcome::Present(value.clone()),
        Field::Null | Field::Absent => CountryOutcome::Present(Value::Null),
    }
}

/// Result of a country-default run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryRun {
    /// Collection processed and written back
    Written(TransformSummary),
    /// Top level was not a list of records; nothing written
    NotAList,
}

/// Load `path`, apply the default to every record, and write it back
pub fn run(path: &Path) -> Result<CountryRun> {
    info!("📂 Loading JSON file: {}", path.display());

    let mut records = match load_collection(path) {
        Ok(records) => records,
        Err(e) if e.kind() == ErrorKind::ShapeViolation => {
            error!("❌ The JSON file does not contain a list of records: {}", e);
            return Ok(CountryRun::NotAList);
        }
        Err(e) => return Err(e),
    };

    info!("✅ JSON file loaded successfully");
    info!("🔍 Found {} records in the JSON file", records.len());

    let mut summary = TransformSummary::default();
    for (i, record) in records.iter_mut().enumerate() {
        let before = pretty(record)?;
        info!("➡️ Processing record #{}:\n{}", i + 1, before);

        let outcome = apply_country_default(record);
        match &outcome {
            CountryOutcome::Added => {
                warn!("⚠️ 'country' field missing, adding 'country': '{}'", DEFAULT_COUNTRY)
            }
            CountryOutcome::Present(value) => {
                info!("✅ 'country' field exists with value: {}", display_value(value))
            }
        }
        summary.record(outcome == CountryOutcome::Added);
    }

    info!("💾 Writing updated data back to file...");
    write_collection(path, &records, LAYOUT)?;
    info!("✅ All records processed and saved successfully ({})", summary);

    Ok(CountryRun::Written(summary))
}

/// Full record content as it appears before mutation
fn pretty(record: &Record) -> Result<String> {
    to_json_string(record, LAYOUT)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
