//! # datafix Common Library
//!
//! Shared code for the datafix record-normalization pipelines:
//! - JSON record model with tagged field presence
//! - Record collection loader and writer
//! - Error taxonomy (missing file, malformed input, shape violation)
//! - Data folder and logging configuration
//! - Evaluation instant for time-relative rules

pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod store;
pub mod summary;
pub mod time;

pub use error::{Error, ErrorKind, Result};
pub use record::{Field, Record, RecordCollection, RecordLabel};
pub use store::JsonLayout;
pub use summary::TransformSummary;
pub use time::EvaluationInstant;
