//! Results-table parsing.
//!
//! The evaluation run leaves a plain-text table with one test per line:
//! whitespace-delimited `<name> <status-code>`, `#` comments and blank lines
//! allowed, extra trailing tokens ignored. Each accepted line becomes one
//! [`TestRecord`] with its artifact paths derived from the test name and a
//! fixed directory layout. Whether those artifacts exist is checked only at
//! render time, never here.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::{TestRecord, TestStatus};

const CALL_GRAPH_DIR: &str = "./CallGraphs";
const CONFIG_DIR: &str = "./config";

/// Parses the results table into records, preserving input order.
///
/// Lines with fewer than two tokens are silently dropped; an unrecognized
/// status code fails the whole parse.
pub fn parse(path: &Path) -> Result<Vec<TestRecord>, ReportError> {
    let content = fs::read_to_string(path).map_err(|source| ReportError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;

    let results_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| tokens.len() >= 2)
        .map(|tokens| build_record(tokens[0], tokens[1], results_dir))
        .collect()
}

fn build_record(name: &str, code: &str, results_dir: &Path) -> Result<TestRecord, ReportError> {
    let status = TestStatus::from_code(code)?;
    let mut record = TestRecord::new(name, status);

    record.json_path = results_dir
        .join(name)
        .join("NativeImage")
        .join("PTA")
        .join("cg.json");

    let call_graphs = PathBuf::from(CALL_GRAPH_DIR).join(name);
    record.csv_methods = call_graphs.join("call_tree_methods.csv");
    record.csv_invokes = call_graphs.join("call_tree_invokes.csv");
    record.csv_targets = call_graphs.join("call_tree_targets.csv");
    record.config_file = PathBuf::from(CONFIG_DIR)
        .join(name)
        .join("reachability-metadata.json");

    Ok(record)
}
