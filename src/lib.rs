//! Cgreport: HTML report generation for call-graph test evaluation runs
//!
//! This library fuses three artifacts of an evaluation run — a results table,
//! an execution log, and a directory of markdown test-suite files — into a
//! set of enriched [`TestRecord`]s that the reporters turn into a
//! self-contained interactive HTML document.

pub mod error;
pub mod escape;
pub mod log;
pub mod markdown;
pub mod reporter;
pub mod results;

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::ReportError;

/// Placeholder shown when no markdown section described the test.
pub const NO_DESCRIPTION: &str = "No description available";
/// Placeholder shown when no markdown code block was found for the test.
pub const NO_TEST_CASE: &str = "No test case details available";

/// Evaluation outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Passed,
    Failed,
    Imprecise,
}

impl TestStatus {
    /// Maps a one-letter results-file code to a status.
    ///
    /// Anything outside the recognized set is a hard error: a record set
    /// containing an unknown status cannot be trusted, so it is never
    /// silently coerced.
    pub fn from_code(code: &str) -> Result<Self, ReportError> {
        match code {
            "S" => Ok(TestStatus::Passed),
            "U" => Ok(TestStatus::Failed),
            "I" => Ok(TestStatus::Imprecise),
            other => Err(ReportError::MalformedStatusCode {
                code: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "PASSED"),
            TestStatus::Failed => write!(f, "FAILED"),
            TestStatus::Imprecise => write!(f, "IMPRECISE"),
        }
    }
}

/// One test case of the evaluation run.
///
/// Created by [`results::parse`] from one line of the results table, then
/// enriched in place by [`log::segment`] and [`markdown::annotate`]. The
/// `status` is fixed at construction; the text fields start at their
/// placeholders and are overwritten by the enrichment stages. Repeated
/// enrichment of the same field (a re-run test in the log, a duplicate
/// section across markdown files) is last-write-wins by design.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    /// Unique, identifier-safe test name.
    pub name: String,
    pub status: TestStatus,
    /// Free-text description from the markdown suite (may contain markup).
    pub description: String,
    /// Code snippets from the markdown suite, HTML-escaped.
    pub test_case: String,
    /// This test's slice of the execution log, HTML-escaped.
    pub log: String,
    /// The CG matcher sub-block of the log, HTML-escaped.
    pub matcher_output: String,
    /// Serialized call graph produced by the native image build.
    pub json_path: PathBuf,
    pub csv_methods: PathBuf,
    pub csv_invokes: PathBuf,
    pub csv_targets: PathBuf,
    /// Reachability metadata the image was built with.
    pub config_file: PathBuf,
}

impl TestRecord {
    pub fn new(name: &str, status: TestStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
            description: NO_DESCRIPTION.to_string(),
            test_case: NO_TEST_CASE.to_string(),
            log: String::new(),
            matcher_output: String::new(),
            json_path: PathBuf::new(),
            csv_methods: PathBuf::new(),
            csv_invokes: PathBuf::new(),
            csv_targets: PathBuf::new(),
            config_file: PathBuf::new(),
        }
    }
}

/// Name → position lookup for the record set.
///
/// Built once after parsing and passed to each enrichment stage, which
/// mutates `records[index[name]]` in place. Names are unique per the results
/// table, so a plain map is enough.
pub fn name_index(records: &[TestRecord]) -> HashMap<String, usize> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| (r.name.clone(), i))
        .collect()
}
