//! Link-Census: a bounded-concurrency same-domain crawler
//!
//! This crate crawls a website from a seed URL, counts internal inbound links
//! per normalized page, and stops expanding once a page ceiling is reached.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Census operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),
}

/// Per-page fetch failures; all of them prune a single branch of the crawl
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}: status {status}")]
    Status { url: String, status: u16 },

    #[error("Content type is not text/html for {url}: {content_type}")]
    ContentType { url: String, content_type: String },
}

/// Result type alias for Link-Census operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::{CrawlConfig, Settings};
pub use crawler::{Coordinator, CrawlReport, HttpFetcher, PageFetcher};
pub use state::{CrawlState, TaskPhase};
pub use url::{normalize_url, NormalizedUrl};
