//! Record collection loader and writer
//!
//! Loading checks, in order: the file exists, its content parses as JSON,
//! the top level is a list, and every element is an object. Each failure maps
//! to its own [`Error`] variant so callers can choose how strictly to react.
//!
//! Writing is a plain create-and-truncate. There is no temp-file rename, so
//! an interrupted write can leave the destination truncated.

use crate::record::{json_type_name, Record, RecordCollection};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Output formatting for a written collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonLayout {
    /// Spaces per nesting level
    pub indent: usize,
}

impl JsonLayout {
    pub const TWO_SPACE: JsonLayout = JsonLayout { indent: 2 };
    pub const FOUR_SPACE: JsonLayout = JsonLayout { indent: 4 };
}

impl Default for JsonLayout {
    fn default() -> Self {
        Self::TWO_SPACE
    }
}

/// Load a record collection from `path`
pub fn load_collection(path: &Path) -> Result<RecordCollection> {
    if !path.exists() {
        return Err(Error::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::MissingFile {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;

    let document: Value = serde_json::from_str(&content).map_err(|source| Error::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let records = into_records(document, path)?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn into_records(document: Value, path: &Path) -> Result<RecordCollection> {
    let items = match document {
        Value::Array(items) => items,
        other => {
            return Err(Error::NotAList {
                path: path.to_path_buf(),
                found: json_type_name(&other),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(Record::from(map)),
            other => Err(Error::NotARecord {
                path: path.to_path_buf(),
                index,
                found: json_type_name(&other),
            }),
        })
        .collect()
}

/// Serialize a collection or a single record to a string using `layout`
///
/// Non-ASCII characters are written literally, never `\u` escaped.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, layout: JsonLayout) -> Result<String> {
    let mut buf = Vec::new();
    serialize_into(&mut buf, value, layout)?;
    String::from_utf8(buf).map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Write a collection to `path`, replacing any existing content
pub fn write_collection(path: &Path, records: &[Record], layout: JsonLayout) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serialize_into(&mut writer, records, layout)?;
    writer.flush()?;
    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

fn serialize_into<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
    layout: JsonLayout,
) -> Result<()> {
    let indent = vec![b' '; layout.indent];
    let formatter = PrettyFormatter::with_indent(&indent);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer).map_err(|e| {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::Serialize(e)
        }
    })
}
