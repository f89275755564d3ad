//! Crawler coordinator - per-run orchestration and the crawl task body
//!
//! This module wires a run together:
//! - Building the shared crawl state and the scheduler
//! - The per-page task: cap check, dedup, domain scoping, fetch, expansion
//! - Collecting the final snapshot and run statistics

use crate::config::{CrawlConfig, HttpConfig};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::{Scheduler, TaskLauncher};
use crate::output::CrawlStatistics;
use crate::state::{CrawlState, TaskOutcome, TaskPhase};
use crate::url::{is_same_host, normalize_parsed, NormalizedUrl};
use crate::CrawlError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Result of a finished crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Configuration the run used
    pub config: CrawlConfig,

    /// Inbound link count per normalized page
    pub pages: HashMap<NormalizedUrl, usize>,

    /// Task outcome tallies and timing
    pub statistics: CrawlStatistics,
}

/// Everything a crawl task reads or writes, shared by reference
struct TaskContext {
    config: Arc<CrawlConfig>,
    state: Arc<CrawlState>,
    fetcher: Arc<dyn PageFetcher>,
    launcher: TaskLauncher,
    base_host: String,
}

/// Main crawler coordinator structure
///
/// One coordinator drives exactly one run; `run` consumes it.
pub struct Coordinator {
    config: Arc<CrawlConfig>,
    state: Arc<CrawlState>,
    fetcher: Arc<dyn PageFetcher>,
}

impl Coordinator {
    /// Creates a coordinator that fetches pages through `fetcher`
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            state: Arc::new(CrawlState::new()),
            fetcher,
        }
    }

    /// Creates a coordinator backed by an HTTP fetcher
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn with_http(config: CrawlConfig, http: &HttpConfig) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(http)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    /// Crawls from the seed URL until every launched task is done
    pub async fn run(self) -> CrawlReport {
        let seed = self.config.seed.clone();
        tracing::info!(
            "Starting crawl of {} (max concurrency: {}, max pages: {})",
            seed,
            self.config.max_concurrency,
            self.config.max_pages
        );

        let scheduler = Scheduler::new(self.config.max_concurrency);
        let context = Arc::new(TaskContext {
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            fetcher: Arc::clone(&self.fetcher),
            launcher: scheduler.launcher(),
            base_host: self.config.base_host(),
        });

        let start_time = Instant::now();
        let mut statistics = CrawlStatistics::default();

        scheduler
            .run(
                seed,
                |url| crawl_page(Arc::clone(&context), url),
                &mut statistics,
            )
            .await;

        statistics.elapsed = start_time.elapsed();
        statistics.pages_recorded = self.state.size();

        tracing::info!(
            "Crawl complete: {} pages recorded, {} fetched in {:.2}s",
            statistics.pages_recorded,
            statistics.pages_fetched,
            statistics.elapsed.as_secs_f64()
        );

        CrawlReport {
            config: (*self.config).clone(),
            pages: self.state.snapshot(),
            statistics,
        }
    }
}

/// Body of one crawl task, run while holding a concurrency slot
async fn crawl_page(context: Arc<TaskContext>, raw_url: String) -> TaskOutcome {
    let phase = TaskPhase::Admitted;

    // Advisory: concurrent tasks may all pass this check before any of them records a page
    if context.state.size() >= context.config.max_pages {
        tracing::debug!(
            "page cap of {} reached, skipping {}",
            context.config.max_pages,
            raw_url
        );
        return finish(phase, &raw_url, TaskOutcome::CapReached);
    }
    let phase = phase.advance(TaskPhase::Fetching, &raw_url);

    let current_url = match Url::parse(&raw_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Error normalizing URL {}: {}", raw_url, e);
            return finish(phase, &raw_url, TaskOutcome::InvalidUrl);
        }
    };
    let normalized = normalize_parsed(&current_url);

    if !context.state.record_visit_if_new(&normalized) {
        tracing::debug!("already visited {}", normalized);
        return finish(phase, &raw_url, TaskOutcome::AlreadyVisited);
    }

    // Off-host pages keep their dedup entry but are never fetched
    if !is_same_host(&current_url, &context.base_host) {
        tracing::debug!("not crawling off-host page {}", raw_url);
        return finish(phase, &raw_url, TaskOutcome::OffDomain);
    }

    tracing::info!("crawling {}", normalized);

    let body = match context.fetcher.fetch(&raw_url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Error getting HTML: {}", e);
            return finish(phase, &raw_url, TaskOutcome::FetchFailed);
        }
    };
    let phase = phase.advance(TaskPhase::Expanding, &raw_url);

    let links = match extract_links(&body, &raw_url) {
        Ok(links) => links,
        Err(e) => {
            tracing::warn!("Error getting URLs from HTML for {}: {}", raw_url, e);
            return finish(phase, &raw_url, TaskOutcome::InvalidUrl);
        }
    };

    let mut launched = 0;
    for link in links {
        if is_same_host(&link, &context.base_host) {
            context.state.record_link(&normalize_parsed(&link));
        }

        if context.launcher.launch(link.into()) {
            launched += 1;
        }
    }

    tracing::debug!("{} launched {} child tasks", normalized, launched);
    finish(phase, &raw_url, TaskOutcome::Expanded { links: launched })
}

fn finish(phase: TaskPhase, raw_url: &str, outcome: TaskOutcome) -> TaskOutcome {
    phase.advance(TaskPhase::Done, raw_url);
    outcome
}
