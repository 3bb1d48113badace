//! Error taxonomy for the report pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A required input file or directory does not exist. Reported to the
    /// user before any stage runs; no partial report is written.
    #[error("required input not found: {0}")]
    MissingInput(PathBuf),

    /// A results-table line carries a status token outside the recognized
    /// set. Fatal for the whole run.
    #[error("unrecognized status code '{code}' in results file (expected S, U or I)")]
    MalformedStatusCode { code: String },

    /// I/O failure reading an input. Fatal for the results table and the
    /// log file; the markdown annotator reports it per file and continues.
    #[error("failed to read {path}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
