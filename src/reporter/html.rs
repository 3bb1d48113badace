//! HTML reporter: generates the self-contained interactive report
//!
//! Embeds all CSS and JS inline so the document has no external resource
//! dependencies. Summary cards filter per-status test lists; each test
//! expands into togglable panels for description, test case, matcher output
//! and log, plus links to the artifacts that exist on disk at render time.

use chrono::Local;
use std::fs;
use std::path::Path;

use crate::reporter::StatusCounts;
use crate::{TestRecord, TestStatus};

const NO_TESTS: &str = "<p class='no-tests'>No test cases matching this category.</p>";

/// Reporter that generates the self-contained HTML document
pub struct HtmlReporter;

impl HtmlReporter {
    pub fn new() -> Self {
        Self
    }

    /// Generate the full HTML report
    pub fn report(&self, records: &[TestRecord]) -> String {
        let counts = StatusCounts::of(records);

        let mut html = String::with_capacity(32_768);
        html.push_str(Self::template_head());
        self.push_summary(&mut html, counts);
        self.push_cards(&mut html, counts);
        self.push_category(&mut html, "passed-tests", "Passed Tests", records, TestStatus::Passed);
        self.push_category(&mut html, "failed-tests", "Failed Tests", records, TestStatus::Failed);
        self.push_category(
            &mut html,
            "imprecise-tests",
            "Imprecise Tests",
            records,
            TestStatus::Imprecise,
        );
        self.push_footer(&mut html, counts);
        html
    }

    /// Render and write the report to `path`.
    pub fn write_to(&self, records: &[TestRecord], path: &Path) -> std::io::Result<()> {
        fs::write(path, self.report(records))
    }

    fn push_summary(&self, html: &mut String, counts: StatusCounts) {
        html.push_str("<h2>Test Summary</h2>\n");
        html.push_str(&format!(
            "<p><span id='passed-tests-count'>{}</span> of <span id='total-tests'>{}</span> tests passed</p>\n",
            counts.passed,
            counts.total()
        ));
        html.push_str(&format!(
            "<p class='percentage'>Pass rate: <span id='pass-percentage'>{:.1}%</span></p>\n",
            counts.pass_rate()
        ));
        html.push_str("</div>\n");
    }

    fn push_cards(&self, html: &mut String, counts: StatusCounts) {
        html.push_str("<div class='summary-container'>\n");
        for (class, label, n) in [
            ("passed", "PASSED", counts.passed),
            ("failed", "FAILED", counts.failed),
            ("imprecise", "IMPRECISE", counts.imprecise),
        ] {
            html.push_str(&format!(
                "<div class='summary-card {class}'><div class='count'>{n}</div><div class='status'>{label}</div></div>\n"
            ));
        }
        html.push_str("</div>\n");
    }

    fn push_category(
        &self,
        html: &mut String,
        id: &str,
        title: &str,
        records: &[TestRecord],
        status: TestStatus,
    ) {
        html.push_str(&format!("<div id='{id}' class='test-list'>\n<h3>{title}</h3>\n"));
        let mut any = false;
        for record in records.iter().filter(|r| r.status == status) {
            any = true;
            self.push_test_item(html, record);
        }
        if !any {
            html.push_str(NO_TESTS);
            html.push('\n');
        }
        html.push_str("</div>\n");
    }

    fn push_test_item(&self, html: &mut String, r: &TestRecord) {
        html.push_str(&format!("<div class='test-item'>{}</div>\n", r.name));
        html.push_str(&format!(
            "<div id='{0}-details' class='test-details'>\n<h4>{0}</h4>\n",
            r.name
        ));

        self.push_toggle_section(html, &r.name, "Description", &r.description);
        self.push_toggle_section(html, &r.name, "Test Case", &r.test_case);
        if !r.matcher_output.is_empty() {
            self.push_toggle_section(html, &r.name, "Matcher Output", &r.matcher_output);
        }
        self.push_toggle_section(html, &r.name, "Debug Log", &r.log);

        if is_valid_file(&r.json_path) {
            html.push_str("<div class='detail-section'>\n");
            html.push_str(&format!(
                "<div id='{}-callgraph-toggle' class='detail-toggle'>Call Graph</div>\n",
                r.name
            ));
            html.push_str(&format!(
                "<div id='{}-callgraph-content' class='detail-content'>\n",
                r.name
            ));
            html.push_str("<p>Call graph from Native Image serialized into JSON:</p>\n");
            html.push_str(&link_to(&r.json_path));
            html.push_str("</div></div>\n");
        }

        self.push_additional_files(html, r);

        html.push_str("</div>\n");
    }

    fn push_toggle_section(&self, html: &mut String, name: &str, label: &str, content: &str) {
        let id_base = format!("{}-{}", name, label.to_lowercase().replace(' ', "-"));
        html.push_str("<div class='detail-section'>\n");
        html.push_str(&format!(
            "<div id='{id_base}-toggle' class='detail-toggle'>{label}</div>\n"
        ));
        html.push_str(&format!(
            "<div id='{id_base}-content' class='detail-content'>{content}</div>\n"
        ));
        html.push_str("</div>\n");
    }

    fn push_additional_files(&self, html: &mut String, r: &TestRecord) {
        html.push_str("<div class='detail-section'>\n");
        html.push_str(&format!(
            "<div id='{}-files-toggle' class='detail-toggle'>Additional Files</div>\n",
            r.name
        ));
        html.push_str(&format!(
            "<div id='{}-files-content' class='detail-content'>\n",
            r.name
        ));

        html.push_str("<div class='file-group'>\n<p>Config generated for native image:</p>\n");
        if is_valid_file(&r.config_file) {
            html.push_str(&link_to(&r.config_file));
        } else {
            html.push_str("Configuration file not found.\n");
        }
        html.push_str("</div>\n");

        html.push_str("<div class='file-group'>\n<p>Call graph analysis files (CSV):</p>\n<ul>\n");
        self.push_csv_link(html, &r.csv_methods, "Methods in call graph");
        self.push_csv_link(html, &r.csv_invokes, "Method invocation relationships");
        self.push_csv_link(html, &r.csv_targets, "Target methods");
        html.push_str("</ul></div>\n");

        html.push_str("</div></div>\n");
    }

    fn push_csv_link(&self, html: &mut String, path: &Path, description: &str) {
        if is_valid_file(path) {
            html.push_str(&format!(
                "<li><a href='{}' target='_blank'>{}</a> - {}</li>\n",
                href(path),
                file_name(path),
                description
            ));
        } else {
            html.push_str(&format!("<li>{description} - file not generated</li>\n"));
        }
    }

    fn push_footer(&self, html: &mut String, counts: StatusCounts) {
        html.push_str(&format!(
            "<p class='generated-at'>Generated {}</p>\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        html.push_str(&Self::footer_script(counts));
        html.push_str("</body></html>\n");
    }

    fn footer_script(counts: StatusCounts) -> String {
        format!(
            r#"<script>
document.addEventListener('DOMContentLoaded', function() {{
    document.querySelectorAll('.test-list, .test-details, .detail-content')
        .forEach(el => el.style.display = 'none');

    document.getElementById('total-tests').textContent = {total};
    document.getElementById('passed-tests-count').textContent = {passed};
    document.getElementById('pass-percentage').textContent =
        Math.round(({passed} / {total_or_one}) * 100) + '%';

    document.querySelectorAll('.summary-card').forEach(card => {{
        card.addEventListener('click', function() {{
            document.querySelectorAll('.summary-card').forEach(c => c.classList.remove('active'));
            this.classList.add('active');

            document.querySelectorAll('.test-list').forEach(list => list.style.display = 'none');
            const category = this.classList.contains('passed') ? 'passed' :
                             this.classList.contains('failed') ? 'failed' : 'imprecise';
            document.getElementById(category + '-tests').style.display = 'block';
        }});
    }});

    document.querySelectorAll('.test-item').forEach(item => {{
        item.addEventListener('click', function() {{
            const details = document.getElementById(this.textContent.trim() + '-details');
            if (details) {{
                details.style.display = details.style.display === 'none' ? 'block' : 'none';
            }}
        }});
    }});

    document.querySelectorAll('.detail-toggle').forEach(toggle => {{
        toggle.addEventListener('click', function() {{
            this.classList.toggle('active');
            const sectionId = this.id.replace('-toggle', '-content');
            const section = document.getElementById(sectionId);
            if (section) {{
                section.style.display = section.style.display === 'none' ? 'block' : 'none';
            }}
        }});
    }});

    document.querySelector('.summary-card.failed').click();
}});
</script>
"#,
            total = counts.total(),
            passed = counts.passed,
            total_or_one = counts.total().max(1),
        )
    }

    // ─── HTML template pieces ────────────────────────────────────────────

    fn template_head() -> &'static str {
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Test Results Report</title>
<style>
body{font-family:'Segoe UI',Tahoma,Geneva,Verdana,sans-serif;margin:0;padding:20px;color:#333;line-height:1.5}
.header{background-color:#2c3e50;color:white;padding:20px;margin-bottom:20px}
.header h1{padding-bottom:10px}
.summary-container{display:flex;gap:15px;margin-bottom:30px;flex-wrap:wrap}
.summary-card{flex:1;min-width:200px;padding:15px;border-radius:4px;cursor:pointer;opacity:.9;transition:opacity .2s}
.summary-card.active{opacity:1;box-shadow:0 0 0 2px rgba(52,152,219,.5)}
.summary-card:hover{opacity:1}
.passed{background-color:#2ecc71;color:white}
.failed{background-color:#e74c3c;color:white}
.imprecise{background-color:#f39c12;color:white}
.test-list{display:none;margin:15px 0 30px 0}
.test-item{padding:12px 15px;margin:8px 0;background-color:#f5f5f5;border-left:4px solid #3498db;cursor:pointer}
.test-details{display:none;padding:15px;margin:10px 0 20px 0;background-color:#f9f9f9;border:1px solid #ddd}
.detail-section{margin-bottom:15px}
.detail-toggle{font-weight:bold;color:#2980b9;cursor:pointer;margin-bottom:8px;display:flex;align-items:center}
.detail-toggle:before{content:'\25B6';margin-right:8px;font-size:.8em}
.detail-toggle.active:before{content:'\25BC'}
.detail-content{display:none;padding:10px;background-color:white;border:1px solid #eee;font-family:monospace;font-size:.9em;overflow-x:auto}
.count{font-size:1.8em;font-weight:bold;margin-bottom:5px}
.status{font-size:1em}
.no-tests{color:#666;font-style:italic;padding:15px;background-color:#f5f5f5;border-left:4px solid #ddd}
.generated-at{color:#999;font-size:.85em;margin-top:30px}
.ansi-blue{color:#4f81bd}
.ansi-red{color:#c00000}
.ansi-green{color:#00a000}
.ansi-yellow{color:#b58900}
h1,h2,h3,h4{margin:0}
.percentage{font-size:1.2em;font-weight:bold;color:white}
</style>
</head>
<body>
<div class="header">
<h1>Native Image Test Results</h1>
"#
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Existence is probed here, at render time, so the report reflects the
/// filesystem as it is when the document is written.
fn is_valid_file(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.exists()
}

fn href(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn link_to(path: &Path) -> String {
    format!(
        "<a href='{}' target='_blank'>{}</a>\n",
        href(path),
        file_name(path)
    )
}
