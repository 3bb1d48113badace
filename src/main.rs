//! Cgreport: HTML report generation CLI

use anyhow::{Context, Result};
use cgreport::error::ReportError;
use cgreport::reporter::{ConsoleReporter, HtmlReporter, JsonReporter};
use cgreport::{log, markdown, name_index, results};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_OUTPUT: &str = "test_results.html";

/// Cgreport: interactive HTML reports for call-graph test evaluation runs
#[derive(Parser, Debug)]
#[command(name = "cgreport")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Results table: one `<name> <status-code>` per line
    results_file: PathBuf,

    /// Execution log of the evaluation run
    log_file: PathBuf,

    /// Directory with markdown test-suite files
    markdown_dir: PathBuf,

    /// Output HTML file
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also print the enriched records as JSON to stdout
    #[arg(long, short)]
    json: bool,

    /// Suppress the console summary
    #[arg(long, short)]
    quiet: bool,

    /// List every test name per category in the summary
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<()> {
    // All inputs are checked up front; no partial report is written for a
    // run that cannot complete.
    if !args.results_file.is_file() {
        return Err(ReportError::MissingInput(args.results_file).into());
    }
    if !args.log_file.is_file() {
        return Err(ReportError::MissingInput(args.log_file).into());
    }
    if !args.markdown_dir.is_dir() {
        return Err(ReportError::MissingInput(args.markdown_dir).into());
    }

    let mut records = results::parse(&args.results_file)
        .with_context(|| format!("parsing {}", args.results_file.display()))?;
    let index = name_index(&records);

    log::segment(&args.log_file, &mut records, &index)
        .with_context(|| format!("segmenting {}", args.log_file.display()))?;
    markdown::annotate(&args.markdown_dir, &mut records, &index)
        .with_context(|| format!("annotating from {}", args.markdown_dir.display()))?;

    if args.json {
        println!("{}", JsonReporter::new().report(&records)?);
    }

    HtmlReporter::new()
        .write_to(&records, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    if !args.quiet {
        let console = if args.verbose {
            ConsoleReporter::new().verbose()
        } else {
            ConsoleReporter::new()
        };
        console.report(&records);
        println!(
            "{} {}",
            "HTML report generated:".green().bold(),
            args.output.display()
        );
    }

    Ok(())
}
