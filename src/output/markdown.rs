//! Markdown report generation
//!
//! Writes the same sorted link counts as the text report, plus the run
//! parameters and statistics, as a markdown document.

use crate::crawler::CrawlReport;
use crate::output::report::build_report;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown report for `report` to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(std::io::Error)` - Failed to create or write the file
pub fn write_markdown_report(report: &CrawlReport, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(report: &CrawlReport) -> String {
    let mut md = String::new();
    let stats = &report.statistics;

    md.push_str(&format!("# Link Report for {}\n\n", report.config.seed));

    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Max concurrency**: {}\n",
        report.config.max_concurrency
    ));
    md.push_str(&format!("- **Max pages**: {}\n", report.config.max_pages));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        stats.elapsed.as_secs_f64()
    ));
    md.push_str(&format!("- **Pages recorded**: {}\n", stats.pages_recorded));
    md.push_str(&format!("- **Pages fetched**: {}\n", stats.pages_fetched));
    md.push_str(&format!("- **Fetch failures**: {}\n", stats.fetch_failures));
    md.push('\n');

    md.push_str("## Inbound Links\n\n");

    let entries = build_report(&report.pages);
    if entries.is_empty() {
        md.push_str("_No pages recorded._\n");
        return md;
    }

    md.push_str("| Page | Inbound links |\n");
    md.push_str("|------|---------------|\n");
    for entry in entries {
        md.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(&entry.url),
            entry.count
        ));
    }

    md
}

/// Escapes pipe characters so a URL cannot break the table
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
