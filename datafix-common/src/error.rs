//! Common error types for datafix pipelines

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for datafix operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across datafix pipelines
#[derive(Error, Debug)]
pub enum Error {
    /// Input file does not exist
    #[error("File not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Input file is not valid JSON
    #[error("Invalid JSON in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON whose top level is not a list
    #[error("{} must contain a list of records (found {found})", path.display())]
    NotAList { path: PathBuf, found: &'static str },

    /// List element that is not a JSON object
    #[error("{}: element #{index} is not a record object (found {found})", path.display())]
    NotARecord {
        path: PathBuf,
        index: usize,
        found: &'static str,
    },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error on write
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of load failures
///
/// Pipelines decide per kind whether to report and stop cleanly or propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingFile,
    MalformedInput,
    ShapeViolation,
    Other,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingFile { .. } => ErrorKind::MissingFile,
            Error::Malformed { .. } => ErrorKind::MalformedInput,
            Error::NotAList { .. } | Error::NotARecord { .. } => ErrorKind::ShapeViolation,
            Error::Io(_) | Error::Serialize(_) | Error::Config(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let missing = Error::MissingFile {
            path: PathBuf::from("cameras.json"),
        };
        assert_eq!(missing.kind(), ErrorKind::MissingFile);

        let shape = Error::NotAList {
            path: PathBuf::from("users.json"),
            found: "object",
        };
        assert_eq!(shape.kind(), ErrorKind::ShapeViolation);

        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_not_a_list_message_names_file() {
        let err = Error::NotAList {
            path: PathBuf::from("developers.json"),
            found: "object",
        };
        assert_eq!(
            err.to_string(),
            "developers.json must contain a list of records (found object)"
        );
    }
}
