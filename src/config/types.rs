use serde::Deserialize;
use url::Url;

use crate::url::host_key;

/// Default number of concurrent fetches
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Default page ceiling
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Settings loaded from an optional TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub crawler: CrawlerSettings,
    pub http: HttpConfig,
}

/// Crawl limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerSettings {
    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrency")]
    pub max_concurrency: usize,

    /// Maximum number of distinct pages to record before expansion stops
    #[serde(rename = "max-pages")]
    pub max_pages: usize,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("link-census/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Immutable configuration for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URL exactly as the user gave it; launched as the root task and
    /// shown in report headers
    pub seed: String,

    /// Parsed seed URL; its host defines the crawl scope
    pub base_url: Url,

    /// Maximum number of in-flight fetches
    pub max_concurrency: usize,

    /// Page ceiling, checked when each task is admitted
    pub max_pages: usize,
}

impl CrawlConfig {
    pub fn new(base_url: Url, max_concurrency: usize, max_pages: usize) -> Self {
        Self {
            seed: base_url.to_string(),
            base_url,
            max_concurrency,
            max_pages,
        }
    }

    /// Keeps the seed spelling the user typed, which may differ from the
    /// parsed form (`https://a.test` parses as `https://a.test/`)
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Host key (host plus explicit port) every internal link must match
    pub fn base_host(&self) -> String {
        host_key(&self.base_url)
    }
}
