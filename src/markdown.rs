//! Markdown test-suite annotation.
//!
//! Each suite file holds `## <TestName>` sections with a prose description
//! and optional fenced `java` code blocks. Sections whose name matches a
//! record enrich it with a description and the concatenated code blocks;
//! everything else is ignored. Files are processed in lexicographic path
//! order so the last-match-wins overwrite for duplicate names is
//! deterministic.

use colored::Colorize;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ReportError;
use crate::{escape, TestRecord};

const CODE_FENCE: &str = "```java";

/// Enriches records with descriptions and test-case code from every `*.md`
/// file directly inside `dir`.
///
/// A file that cannot be read is reported to stderr and skipped; one bad
/// file must not abort the whole annotation pass.
pub fn annotate(
    dir: &Path,
    records: &mut [TestRecord],
    index: &HashMap<String, usize>,
) -> Result<(), ReportError> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();

    for file in files {
        match fs::read_to_string(&file) {
            Ok(content) => annotate_from(&content, records, index),
            Err(e) => eprintln!(
                "{} skipping markdown file {}: {}",
                "warning:".yellow().bold(),
                file.display(),
                e
            ),
        }
    }

    Ok(())
}

/// Applies every `## <name>` section of one file to the matching records.
fn annotate_from(content: &str, records: &mut [TestRecord], index: &HashMap<String, usize>) {
    // `\r?` keeps CRLF suites working: multi-line `$` only asserts before
    // `\n`, so a bare `$` would skip every `## Name\r\n` heading.
    let heading = Regex::new(r"(?m)^## (\w+)\r?$").unwrap();

    let matches: Vec<(String, usize, usize)> = heading
        .captures_iter(content)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            (caps[1].to_string(), whole.start(), whole.end())
        })
        .collect();

    for (i, (name, _, body_start)) in matches.iter().enumerate() {
        let body_end = matches
            .get(i + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(content.len());
        if let Some(&r) = index.get(name) {
            apply_section(content[*body_start..body_end].trim(), &mut records[r]);
        }
    }
}

/// Splits one section into description and code, overwriting the record's
/// fields. Later sections for the same name overwrite earlier ones.
fn apply_section(section: &str, record: &mut TestRecord) {
    // Hidden annotation lines like `[//]: # (reviewed 2024-03)` carry no
    // reader-facing content.
    let comment_line = Regex::new(r"(?m)^\[//\]:? # \(.*?\)\n?").unwrap();
    let section = comment_line.replace_all(section, "");
    let section: &str = &section;

    let Some(code_start) = section.find(CODE_FENCE) else {
        record.description = clean_description(section);
        return;
    };

    record.description = clean_description(&section[..code_start]);

    let code_block = Regex::new(r"(?s)```java\n(.*?)```").unwrap();
    let blocks: Vec<&str> = code_block
        .captures_iter(section)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()).trim())
        .filter(|block| !block.is_empty())
        .collect();

    record.test_case = escape::escape(&blocks.join("\n\n"));
}

/// Wraps inline code, empties whitespace-only lines, and collapses runs of
/// three or more newlines down to two.
fn clean_description(input: &str) -> String {
    let inline_code = Regex::new(r"`([^`]+)`").unwrap();
    let blank_line = Regex::new(r"(?m)^[ \t]*\r?\n").unwrap();
    let newline_runs = Regex::new(r"\n{3,}").unwrap();

    let out = inline_code.replace_all(input.trim(), "<code>$1</code>");
    let out = blank_line.replace_all(&out, "\n");
    newline_runs.replace_all(&out, "\n\n").into_owned()
}
