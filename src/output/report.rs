//! Plain-text link report

use crate::crawler::CrawlReport;
use crate::url::NormalizedUrl;
use std::cmp::Ordering;
use std::collections::HashMap;

const BANNER: &str = "=============================";

/// One report line: a page and how many internal links point at it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCount {
    pub url: String,
    pub count: usize,
}

/// Sorts a link-count snapshot for reporting
///
/// Highest count first; ties ordered by URL ascending.
pub fn build_report(pages: &HashMap<NormalizedUrl, usize>) -> Vec<PageCount> {
    let mut entries: Vec<PageCount> = pages
        .iter()
        .map(|(url, count)| PageCount {
            url: url.to_string(),
            count: *count,
        })
        .collect();

    entries.sort_by(compare_entries);
    entries
}

fn compare_entries(a: &PageCount, b: &PageCount) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.url.cmp(&b.url))
}

/// Formats the text report for a finished crawl
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str(BANNER);
    out.push('\n');
    out.push_str(&format!("  REPORT for {}\n", report.config.seed));
    out.push_str(BANNER);
    out.push('\n');

    for entry in build_report(&report.pages) {
        out.push_str(&format!(
            "Found {} internal links to {}\n",
            entry.count, entry.url
        ));
    }

    out
}

/// Prints the text report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}
