//! Run statistics
//!
//! Tallied by the dispatcher from task outcomes, so no extra shared state is
//! needed while the crawl runs.

use crate::state::TaskOutcome;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Tasks that reached Done normally
    pub tasks_completed: usize,

    /// Pages fetched and expanded
    pub pages_fetched: usize,

    /// Child tasks launched from expanded pages
    pub links_launched: usize,

    /// Pages whose fetch failed (network, HTTP status, content type)
    pub fetch_failures: usize,

    /// Tasks skipped because the page cap was reached
    pub cap_skips: usize,

    /// Tasks skipped because the page was already visited
    pub duplicate_skips: usize,

    /// Pages recorded but not fetched because they are off-host
    pub off_domain_skips: usize,

    /// Tasks whose URL could not be parsed
    pub invalid_urls: usize,

    /// Tasks that never got a concurrency slot
    pub not_admitted: usize,

    /// Tasks that panicked
    pub panicked_tasks: usize,

    /// Distinct pages in the final snapshot
    pub pages_recorded: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Tallies one finished task
    pub fn record(&mut self, outcome: TaskOutcome) {
        self.tasks_completed += 1;
        match outcome {
            TaskOutcome::Expanded { links } => {
                self.pages_fetched += 1;
                self.links_launched += links;
            }
            TaskOutcome::CapReached => self.cap_skips += 1,
            TaskOutcome::AlreadyVisited => self.duplicate_skips += 1,
            TaskOutcome::OffDomain => self.off_domain_skips += 1,
            TaskOutcome::InvalidUrl => self.invalid_urls += 1,
            TaskOutcome::FetchFailed => self.fetch_failures += 1,
            TaskOutcome::NotAdmitted => self.not_admitted += 1,
        }
    }

    /// Tallies one panicked task
    pub fn record_panic(&mut self) {
        self.panicked_tasks += 1;
    }

    /// Fetch throughput over the whole run
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages_fetched as f64 / secs
        } else {
            0.0
        }
    }
}

/// Logs run statistics at info level
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!("=== Crawl Statistics ===");
    tracing::info!("Pages recorded: {}", stats.pages_recorded);
    tracing::info!(
        "Pages fetched: {} ({:.2} pages/sec)",
        stats.pages_fetched,
        stats.pages_per_second()
    );
    tracing::info!("Tasks completed: {}", stats.tasks_completed);
    tracing::info!("Links followed: {}", stats.links_launched);
    tracing::info!(
        "Skipped: {} already visited, {} off-host, {} over page cap",
        stats.duplicate_skips,
        stats.off_domain_skips,
        stats.cap_skips
    );

    if stats.fetch_failures > 0 || stats.invalid_urls > 0 {
        tracing::info!(
            "Errors: {} fetch failures, {} invalid URLs",
            stats.fetch_failures,
            stats.invalid_urls
        );
    }

    if stats.panicked_tasks > 0 || stats.not_admitted > 0 {
        tracing::warn!(
            "{} tasks panicked, {} tasks were never admitted",
            stats.panicked_tasks,
            stats.not_admitted
        );
    }
}
