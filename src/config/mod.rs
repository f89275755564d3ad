//! Configuration module for Link-Census
//!
//! This module handles the optional TOML settings file, command-line limit
//! parsing, seed validation, and the immutable per-run `CrawlConfig`.
//!
//! # Example
//!
//! ```no_run
//! use link_census::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("census.toml")).unwrap();
//! println!("Crawler will use {} slots", settings.crawler.max_concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CrawlConfig, CrawlerSettings, HttpConfig, Settings, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_PAGES,
};

// Re-export parser functions
pub use parser::{load_settings, parse_limit};
pub use validation::{validate, validate_seed_url};
