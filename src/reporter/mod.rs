//! Reporter module for output formatting

pub mod console;
pub mod html;
pub mod json;

pub use console::ConsoleReporter;
pub use html::HtmlReporter;
pub use json::JsonReporter;

use crate::{TestRecord, TestStatus};

/// Per-status totals shared by the reporters.
#[derive(Debug, Clone, Copy)]
pub struct StatusCounts {
    pub passed: usize,
    pub failed: usize,
    pub imprecise: usize,
}

impl StatusCounts {
    pub fn of(records: &[TestRecord]) -> Self {
        let count = |s: TestStatus| records.iter().filter(|r| r.status == s).count();
        Self {
            passed: count(TestStatus::Passed),
            failed: count(TestStatus::Failed),
            imprecise: count(TestStatus::Imprecise),
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.imprecise
    }

    /// Pass rate in percent; a run with no tests counts as 0.
    pub fn pass_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passed as f64 * 100.0 / self.total() as f64
        }
    }
}
