//! Link-Census main entry point
//!
//! This is the command-line interface for the Link-Census crawler.

use anyhow::Context;
use clap::Parser;
use link_census::config::{
    load_settings, parse_limit, validate_seed_url, CrawlConfig, Settings,
};
use link_census::crawler::crawl;
use link_census::output::{log_statistics, print_report, write_markdown_report};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Link-Census: count internal inbound links across a website
///
/// Link-Census fetches the seed URL, follows its links with a bounded number
/// of concurrent tasks, and reports how many internal links point at each
/// page.
#[derive(Parser, Debug)]
#[command(name = "link-census")]
#[command(version)]
#[command(about = "Count internal inbound links across a website", long_about = None)]
struct Cli {
    /// Seed URL; its host defines the crawl scope
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum concurrent fetches (default 10)
    #[arg(value_name = "MAX_CONCURRENCY")]
    max_concurrency: Option<String>,

    /// Maximum distinct pages to record (default 100)
    #[arg(value_name = "MAX_PAGES")]
    max_pages: Option<String>,

    /// One trailing argument is tolerated and ignored
    #[arg(value_name = "IGNORED", hide = true)]
    ignored: Option<String>,

    /// Path to a TOML settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write the report as markdown to this path
    #[arg(long, value_name = "PATH")]
    markdown: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_census=info,warn"),
            1 => EnvFilter::new("link_census=debug,info"),
            2 => EnvFilter::new("link_census=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Validates inputs, runs the crawl, and emits the reports
async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => {
            tracing::info!("Loading settings from: {}", path.display());
            load_settings(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?
        }
        None => Settings::default(),
    };

    let max_concurrency = parse_limit(
        cli.max_concurrency.as_deref(),
        settings.crawler.max_concurrency,
        1,
        "concurrency",
    );
    let max_pages = parse_limit(
        cli.max_pages.as_deref(),
        settings.crawler.max_pages,
        0,
        "pages",
    );

    if let Some(extra) = &cli.ignored {
        tracing::debug!("ignoring extra argument '{}'", extra);
    }

    let base_url = validate_seed_url(&cli.url).context("cannot start crawl")?;
    let config =
        CrawlConfig::new(base_url, max_concurrency, max_pages).with_seed(cli.url.as_str());

    if !cli.quiet {
        println!("starting crawl of: {}", cli.url);
    }

    let report = crawl(config, &settings.http).await?;

    print_report(&report);
    log_statistics(&report.statistics);

    if let Some(path) = &cli.markdown {
        write_markdown_report(&report, path)
            .with_context(|| format!("failed to write markdown report to {}", path.display()))?;
        tracing::info!("Markdown report written to: {}", path.display());
    }

    Ok(())
}
