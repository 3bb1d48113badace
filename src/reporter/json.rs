//! JSON reporter: machine-readable dump of the enriched records

use serde::Serialize;

use crate::reporter::StatusCounts;
use crate::TestRecord;

/// Reporter for JSON output (e.g. piping into other tooling)
pub struct JsonReporter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    total: usize,
    passed: usize,
    failed: usize,
    imprecise: usize,
    tests: &'a [TestRecord],
}

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, records: &[TestRecord]) -> serde_json::Result<String> {
        let counts = StatusCounts::of(records);
        serde_json::to_string_pretty(&JsonReport {
            total: counts.total(),
            passed: counts.passed,
            failed: counts.failed,
            imprecise: counts.imprecise,
            tests: records,
        })
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
