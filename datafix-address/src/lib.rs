//! datafix-address - Address default for developer records
//!
//! Gives every developer record without an `address` key an empty address
//! object located in the UAE. `developers.json` is rewritten only when at
//! least one record was changed.
//!
//! This pipeline reports every load failure itself (missing file, invalid
//! JSON, wrong top-level shape) and stops cleanly with the source file left
//! untouched. Only write failures propagate.

use datafix_common::store::{load_collection, write_collection};
use datafix_common::{Error, ErrorKind, JsonLayout, Record, Result, TransformSummary};
use serde_json::{json, Value};
use std::path::Path;
use tracing::{error, info};

/// Input file, rewritten in place when dirty
pub const DEVELOPERS_FILE: &str = "developers.json";

/// Output indentation
pub const LAYOUT: JsonLayout = JsonLayout::TWO_SPACE;

/// The address object inserted for records without one
pub fn default_address() -> Value {
    json!({
        "street": "",
        "city": "",
        "state": "",
        "zipCode": "",
        "country": "UAE"
    })
}

/// Add the default address if the record has none
///
/// Returns true when the record was modified. An explicit `null` address
/// counts as present.
pub fn apply_address_default(record: &mut Record) -> bool {
    record.set_if_absent("address", default_address)
}

/// Why a run stopped before transforming anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    MissingFile,
    MalformedInput,
    NotAList,
}

/// Result of an address-default run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRun {
    /// At least one record changed and the file was rewritten
    Updated(TransformSummary),
    /// Every record already had an address; nothing written
    Unchanged(TransformSummary),
    /// Load failed and was reported; nothing written
    Aborted(AbortReason),
}

/// Load `path`, fill in missing addresses, and save if anything changed
pub fn run(path: &Path) -> Result<AddressRun> {
    let mut records = match load_collection(path) {
        Ok(records) => records,
        Err(e) => return report_load_failure(path, e),
    };

    let mut summary = TransformSummary::default();
    for record in records.iter_mut() {
        let added = apply_address_default(record);
        if added {
            info!("Adding address field to record {}", record.label());
        } else {
            info!("Record {} already has address → skipping", record.label());
        }
        summary.record(added);
    }

    if !summary.is_dirty() {
        info!("No changes were needed ({})", summary);
        return Ok(AddressRun::Unchanged(summary));
    }

    write_collection(path, &records, LAYOUT)?;
    info!("{} has been updated successfully ({})", path.display(), summary);
    Ok(AddressRun::Updated(summary))
}

fn report_load_failure(path: &Path, e: Error) -> Result<AddressRun> {
    let reason = match e.kind() {
        ErrorKind::MissingFile => {
            error!("Error: {} not found", path.display());
            AbortReason::MissingFile
        }
        ErrorKind::MalformedInput => {
            error!("Error: {} is not valid JSON: {}", path.display(), e);
            AbortReason::MalformedInput
        }
        ErrorKind::ShapeViolation => {
            error!("Error: {} must contain a list of records: {}", path.display(), e);
            AbortReason::NotAList
        }
        // Read failures other than not-found are not one of the reported kinds
        ErrorKind::Other => return Err(e),
    };
    Ok(AddressRun::Aborted(reason))
}
