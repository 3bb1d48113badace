//! Execution-log segmentation.
//!
//! The log is one unstructured stream for the whole run, with two literal
//! markers giving it just enough shape to slice: a `performing test case:`
//! line opens a test's segment, and a `[info][CG matcher]` line opens a
//! nested matcher block that runs through the next blank line. Everything
//! between two test markers belongs to the first test; the marker line
//! itself is consumed, not stored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ReportError;
use crate::{escape, TestRecord};

const TEST_CASE_MARKER: &str = "performing test case:";
const MATCHER_MARKER: &str = "[info][CG matcher]";

/// Accumulated text for the test currently being scanned.
struct ActiveBlock {
    name: String,
    log: String,
    matcher: String,
    in_matcher: bool,
}

impl ActiveBlock {
    fn new(name: String) -> Self {
        Self {
            name,
            log: String::new(),
            matcher: String::new(),
            in_matcher: false,
        }
    }
}

/// Splits the log into per-test excerpts and stores them, HTML-escaped, on
/// the matching records.
///
/// Records whose name never appears in the log keep their defaults; log
/// segments for names absent from the record set are silently discarded.
/// A test that reappears later in the log (a re-run) replaces its earlier
/// segment entirely.
pub fn segment(
    path: &Path,
    records: &mut [TestRecord],
    index: &HashMap<String, usize>,
) -> Result<(), ReportError> {
    let content = fs::read_to_string(path).map_err(|source| ReportError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut log_map: HashMap<String, String> = HashMap::new();
    let mut matcher_map: HashMap<String, String> = HashMap::new();
    let mut active: Option<ActiveBlock> = None;

    for line in content.lines() {
        if line.contains(TEST_CASE_MARKER) {
            if let Some(block) = active.take() {
                flush(block, &mut log_map, &mut matcher_map);
            }
            let name = line
                .split_once(':')
                .map(|(_, rest)| rest.trim())
                .unwrap_or("");
            active = Some(ActiveBlock::new(name.to_string()));
        } else if let Some(block) = active.as_mut() {
            block.log.push_str(line);
            block.log.push('\n');

            if line.contains(MATCHER_MARKER) {
                block.in_matcher = true;
            }
            if block.in_matcher {
                block.matcher.push_str(line);
                block.matcher.push('\n');
                // The terminating blank line is kept in both buffers.
                if line.trim().is_empty() {
                    block.in_matcher = false;
                }
            }
        }
    }

    // A matcher block with no terminating blank line still flushes here.
    if let Some(block) = active {
        flush(block, &mut log_map, &mut matcher_map);
    }

    for (name, text) in log_map {
        if let Some(&i) = index.get(&name) {
            records[i].log = escape::escape(&text);
        }
    }
    for (name, text) in matcher_map {
        if let Some(&i) = index.get(&name) {
            records[i].matcher_output = escape::escape(&text);
        }
    }

    Ok(())
}

/// Upsert, not append: a repeated name overwrites its earlier buffers.
fn flush(
    block: ActiveBlock,
    log_map: &mut HashMap<String, String>,
    matcher_map: &mut HashMap<String, String>,
) {
    log_map.insert(block.name.clone(), block.log);
    matcher_map.insert(block.name, block.matcher);
}
