//! Console reporter with colored output

use colored::Colorize;

use crate::reporter::StatusCounts;
use crate::{TestRecord, TestStatus};

/// Reporter for the terminal summary
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Also list the names in every category, not just the failed ones.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Print the per-status summary for the run.
    pub fn report(&self, records: &[TestRecord]) {
        let counts = StatusCounts::of(records);

        println!();
        println!("{}", "Test evaluation summary".bold());
        println!(
            "  {} {}   {} {}   {} {}",
            counts.passed.to_string().green().bold(),
            "passed".green(),
            counts.failed.to_string().red().bold(),
            "failed".red(),
            counts.imprecise.to_string().yellow().bold(),
            "imprecise".yellow(),
        );
        println!(
            "  {} of {} tests passed ({:.1}%)",
            counts.passed,
            counts.total(),
            counts.pass_rate()
        );

        if self.verbose {
            self.print_names(records, TestStatus::Passed);
            self.print_names(records, TestStatus::Imprecise);
        }
        self.print_names(records, TestStatus::Failed);
        println!();
    }

    fn print_names(&self, records: &[TestRecord], status: TestStatus) {
        let names: Vec<&str> = records
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.name.as_str())
            .collect();
        if names.is_empty() {
            return;
        }

        let heading = match status {
            TestStatus::Passed => "Passed:".green().bold(),
            TestStatus::Failed => "Failed:".red().bold(),
            TestStatus::Imprecise => "Imprecise:".yellow().bold(),
        };
        println!("  {heading}");
        for name in names {
            println!("    {name}");
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
