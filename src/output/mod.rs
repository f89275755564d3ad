//! Output module for crawl reports
//!
//! This module handles:
//! - Sorting the final link-count snapshot
//! - Printing the text report
//! - Exporting a markdown report
//! - Recording and logging run statistics

mod markdown;
mod report;
pub mod stats;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{build_report, format_report, print_report, PageCount};
pub use stats::{log_statistics, CrawlStatistics};
