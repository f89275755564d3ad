//! Crawler module for page fetching and recursive link following
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - HTML parsing and link extraction
//! - Bounded-parallel task scheduling and termination tracking
//! - Per-page task coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{Coordinator, CrawlReport};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use parser::{extract_links, ExtractedLinks};
pub use scheduler::{Scheduler, TaskLauncher};

use crate::config::{CrawlConfig, HttpConfig};
use crate::Result;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Launch the seed task
/// 3. Fetch pages and follow links until every task is done
/// 4. Return the link-count snapshot and run statistics
///
/// # Arguments
///
/// * `config` - The per-run crawl configuration
/// * `http` - HTTP client settings
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(CrawlError)` - The HTTP client could not be built
pub async fn crawl(config: CrawlConfig, http: &HttpConfig) -> Result<CrawlReport> {
    let coordinator = Coordinator::with_http(config, http)?;
    Ok(coordinator.run().await)
}
