//! Integration tests for the crawl engine
//!
//! These tests drive full runs against an in-memory site, so link counts,
//! dedup, scoping, and termination can be checked without a network.

use async_trait::async_trait;
use link_census::config::CrawlConfig;
use link_census::crawler::{Coordinator, CrawlReport, PageFetcher};
use link_census::output::build_report;
use link_census::FetchError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Serves canned pages and records every URL it is asked for
#[derive(Default)]
struct StaticSite {
    pages: HashMap<String, Result<String, u16>>,
    requests: Mutex<Vec<String>>,
}

impl StaticSite {
    fn new() -> Self {
        Self::default()
    }

    fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl PageFetcher for StaticSite {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

fn config(seed: &str, max_concurrency: usize, max_pages: usize) -> CrawlConfig {
    CrawlConfig::new(Url::parse(seed).unwrap(), max_concurrency, max_pages)
}

async fn run_crawl(site: Arc<StaticSite>, config: CrawlConfig) -> CrawlReport {
    let coordinator = Coordinator::new(config, site);
    tokio::time::timeout(Duration::from_secs(10), coordinator.run())
        .await
        .expect("crawl should terminate")
}

fn count(report: &CrawlReport, url: &str) -> Option<usize> {
    report
        .pages
        .iter()
        .find(|(key, _)| key.as_str() == url)
        .map(|(_, count)| *count)
}

#[tokio::test]
async fn test_seed_with_internal_external_and_self_links() {
    let site = Arc::new(
        StaticSite::new()
            .page(
                "https://a.test/",
                r#"<html><body>
                <a href="https://a.test/x">X</a>
                <a href="https://external.test/y">External</a>
                <a href="https://a.test/">Home</a>
                </body></html>"#,
            )
            .page("https://a.test/x", r#"<a href="/z">Z</a>"#),
    );

    let report = run_crawl(Arc::clone(&site), config("https://a.test/", 4, 100)).await;

    // First sighting of the seed plus its self-link
    assert_eq!(count(&report, "https://a.test/"), Some(2));
    assert_eq!(count(&report, "https://a.test/x"), Some(1));

    // Recorded as a dedup entry, never fetched or expanded
    assert_eq!(count(&report, "https://external.test/y"), Some(1));
    assert_eq!(site.request_count("https://external.test/y"), 0);

    // /x was recorded as a link target before its task ran, so it counts as
    // visited and its own links are never discovered
    assert_eq!(site.request_count("https://a.test/x"), 0);
    assert_eq!(count(&report, "https://a.test/z"), None);

    assert_eq!(report.pages.len(), 3);
    assert_eq!(site.requests(), ["https://a.test/"]);
    assert_eq!(report.statistics.pages_fetched, 1);
    assert_eq!(report.statistics.duplicate_skips, 2);
    assert_eq!(report.statistics.off_domain_skips, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_link_variants_share_one_key() {
    let site = Arc::new(StaticSite::new().page(
        "https://site.test/",
        r#"<a href="/a">A</a>
           <a href="/a#top">A again</a>
           <a href="http://site.test/a?ref=nav">A with query</a>
           <a href="/b">B</a>
           <a href="/b/">B with slash</a>"#,
    ));

    let report = run_crawl(Arc::clone(&site), config("https://site.test/", 3, 100)).await;

    assert_eq!(count(&report, "https://site.test/"), Some(1));
    assert_eq!(count(&report, "https://site.test/a"), Some(3));
    assert_eq!(count(&report, "https://site.test/b"), Some(1));
    assert_eq!(count(&report, "https://site.test/b/"), Some(1));
    assert_eq!(report.pages.len(), 4);

    assert_eq!(site.requests(), ["https://site.test/"]);
    assert_eq!(report.statistics.duplicate_skips, 5);
    assert_eq!(report.statistics.tasks_completed, 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_link_counts_are_deterministic_across_runs() {
    let mut html = String::new();
    for i in 0..20 {
        html.push_str(&format!(r#"<a href="/p{}">p</a>"#, i));
    }
    for i in 0..20 {
        html.push_str(&format!(r#"<a href="/p{}">again</a>"#, i % 4));
    }
    let site = Arc::new(StaticSite::new().page("https://hub.test/", &html));

    let first = run_crawl(Arc::clone(&site), config("https://hub.test/", 8, 1000)).await;
    let second = run_crawl(Arc::clone(&site), config("https://hub.test/", 2, 1000)).await;

    assert_eq!(build_report(&first.pages), build_report(&second.pages));
    assert_eq!(count(&first, "https://hub.test/"), Some(1));
    assert_eq!(count(&first, "https://hub.test/p0"), Some(6));
    assert_eq!(count(&first, "https://hub.test/p3"), Some(6));
    assert_eq!(count(&first, "https://hub.test/p4"), Some(1));
    assert_eq!(first.pages.len(), 21);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_page_cap_bounds_fetches() {
    let site = Arc::new(
        StaticSite::new()
            .page(
                "https://cap.test/",
                r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a>
                   <a href="/4">4</a><a href="/5">5</a>"#,
            )
            .page("https://cap.test/1", r#"<a href="/6">6</a>"#)
            .page("https://cap.test/2", r#"<a href="/7">7</a>"#)
            .page("https://cap.test/3", r#"<a href="/8">8</a>"#)
            .page("https://cap.test/4", r#"<a href="/9">9</a>"#)
            .page("https://cap.test/5", r#"<a href="/10">10</a>"#),
    );
    let max_concurrency = 3;

    let report = run_crawl(
        Arc::clone(&site),
        config("https://cap.test/", max_concurrency, 1),
    )
    .await;

    // The seed plus the link targets it recorded; none of them is expanded
    assert_eq!(report.pages.len(), 6);
    assert!(report.statistics.pages_fetched <= 1 + (max_concurrency - 1));
    assert_eq!(site.requests(), ["https://cap.test/"]);
    assert_eq!(report.statistics.cap_skips, 5);
}

#[tokio::test]
async fn test_zero_page_cap_skips_seed() {
    let site = Arc::new(StaticSite::new().page("https://empty.test/", "<a href='/x'>x</a>"));

    let report = run_crawl(Arc::clone(&site), config("https://empty.test/", 2, 0)).await;

    assert!(report.pages.is_empty());
    assert!(site.requests().is_empty());
    assert_eq!(report.statistics.cap_skips, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failing_link_target_does_not_affect_siblings() {
    let site = Arc::new(
        StaticSite::new()
            .page(
                "https://mixed.test/",
                r#"<a href="/missing">Missing</a>
                   <a href="https://gone.test/">Gone</a>
                   <a href="/ok">Ok</a>
                   <a href="/broken">Broken</a>"#,
            )
            .status("https://mixed.test/missing", 404)
            .status("https://gone.test/", 404)
            .status("https://mixed.test/broken", 500)
            .page("https://mixed.test/ok", "<p>done</p>"),
    );

    let report = run_crawl(Arc::clone(&site), config("https://mixed.test/", 4, 100)).await;

    // Every sibling keeps the link count the seed gave it
    assert_eq!(count(&report, "https://mixed.test/missing"), Some(1));
    assert_eq!(count(&report, "https://mixed.test/ok"), Some(1));
    assert_eq!(count(&report, "https://mixed.test/broken"), Some(1));
    assert_eq!(count(&report, "https://gone.test/"), Some(1));

    assert_eq!(report.statistics.fetch_failures, 0);
    assert_eq!(report.statistics.tasks_completed, 5);
    assert_eq!(site.requests(), ["https://mixed.test/"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_wide_fan_out_terminates() {
    let mut html = String::new();
    for i in 0..30 {
        html.push_str(&format!(r#"<a href="/leaf{}">leaf</a>"#, i));
    }
    let site = Arc::new(StaticSite::new().page("https://wide.test/", &html));

    let report = run_crawl(Arc::clone(&site), config("https://wide.test/", 4, 1000)).await;

    assert_eq!(report.pages.len(), 31);
    assert_eq!(report.statistics.tasks_completed, 31);
    assert_eq!(report.statistics.links_launched, 30);
    assert_eq!(report.statistics.duplicate_skips, 30);
    assert_eq!(report.statistics.pages_fetched, 1);
}

#[tokio::test]
async fn test_off_host_links_not_counted_but_deduplicated() {
    let site = Arc::new(StaticSite::new().page(
        "https://home.test/",
        r#"<a href="https://other.test/a">1</a>
           <a href="http://other.test/a?x=1">2</a>
           <a href="mailto:team@home.test">mail</a>"#,
    ));

    let report = run_crawl(Arc::clone(&site), config("https://home.test/", 2, 100)).await;

    // The second link to other.test collapses onto the first visit
    assert_eq!(count(&report, "https://other.test/a"), Some(1));
    assert_eq!(count(&report, "https://"), Some(1));
    assert_eq!(count(&report, "https://home.test/"), Some(1));
    assert_eq!(site.requests(), ["https://home.test/"]);
    assert_eq!(report.statistics.duplicate_skips, 1);
    assert_eq!(report.statistics.off_domain_skips, 2);
}

#[tokio::test]
async fn test_seed_fetch_failure_yields_seed_only_report() {
    let site = Arc::new(StaticSite::new().status("https://down.test/", 503));

    let report = run_crawl(Arc::clone(&site), config("https://down.test/", 2, 100)).await;

    assert_eq!(report.pages.len(), 1);
    assert_eq!(count(&report, "https://down.test/"), Some(1));
    assert_eq!(report.statistics.fetch_failures, 1);
    assert_eq!(report.statistics.tasks_completed, 1);
}

#[tokio::test]
async fn test_seed_launched_as_typed() {
    let site = Arc::new(StaticSite::new().page("https://root.test", r#"<a href="/">Home</a>"#));
    let config = config("https://root.test", 2, 100).with_seed("https://root.test");

    let report = run_crawl(Arc::clone(&site), config).await;

    assert_eq!(report.config.seed, "https://root.test");
    assert_eq!(site.requests(), ["https://root.test"]);
    assert_eq!(count(&report, "https://root.test/"), Some(2));
}
