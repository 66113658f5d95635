//! Cine-Scrape main entry point
//!
//! This is the command-line interface for the Cine-Scrape movie chart harvester.

use anyhow::{bail, Context};
use cine_scrape::config::{load_config_with_hash, validate, Config};
use cine_scrape::crawler::HttpFetcher;
use cine_scrape::output::print_statistics;
use cine_scrape::pipeline::{run, RunOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cine-Scrape: a movie chart harvester
///
/// Cine-Scrape crawls a movie chart, visits every linked title page and
/// joins the chart entries with the title details into a CSV dataset.
/// Before scraping it documents the target site in a research report.
#[derive(Parser, Debug)]
#[command(name = "cine-scrape")]
#[command(version = "1.0.0")]
#[command(about = "A movie chart harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long, conflicts_with_all = ["skip_research", "research_only"])]
    dry_run: bool,

    /// Do not produce the background research report
    #[arg(long, conflicts_with = "research_only")]
    skip_research: bool,

    /// Produce only the background research report
    #[arg(long)]
    research_only: bool,

    /// Override the chart page the crawl starts from
    #[arg(long, value_name = "URL")]
    seed_url: Option<String>,

    /// Override the dataset CSV path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let fetcher = HttpFetcher::from_config(&config.scraper)
        .context("Failed to build HTTP client")?;

    let options = RunOptions {
        research: !cli.skip_research,
        scrape: !cli.research_only,
    };
    handle_run(&fetcher, &config, options)
        .await
        .with_context(|| format!("Run against {} failed", config.scraper.seed_url))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cine_scrape=info,warn"),
            1 => EnvFilter::new("cine_scrape=debug,info"),
            2 => EnvFilter::new("cine_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (or defaults) and applies CLI overrides
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(seed_url) = &cli.seed_url {
        config.scraper.seed_url = seed_url.clone();
    }
    if let Some(output) = &cli.output {
        let Some(path) = output.to_str() else {
            bail!("Output path {} is not valid UTF-8", output.display());
        };
        config.output.dataset_path = path.to_string();
    }

    validate(&config).context("Invalid configuration after applying command-line overrides")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Cine-Scrape Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Seed URL: {}", config.scraper.seed_url);
    println!("  User agent: {}", config.scraper.user_agent);
    println!("  Max retries: {}", config.scraper.max_retries);
    match config.scraper.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unlimited"),
    }
    match config.scraper.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: transport default"),
    }
    println!("  Listing mode: {:?}", config.scraper.listing_mode);

    println!("\nOutput:");
    println!("  Dataset: {}", config.output.dataset_path);
    println!("  Research: {}", config.output.research_path);

    println!("\nResearch:");
    if config.research.whois_server.is_empty() {
        println!("  WHOIS: disabled");
    } else {
        println!(
            "  WHOIS: {} ({}s timeout)",
            config.research.whois_server, config.research.whois_timeout_secs
        );
    }

    println!("\nMarkup Selectors:");
    for (key, selector) in config.markup.selectors() {
        println!("  {}: {}", key, selector);
    }
    println!("  ranking-attribute: {}", config.markup.ranking_attribute);

    println!("\n✓ Configuration is valid");
}

/// Runs research and scrape, then reports what was produced
async fn handle_run(fetcher: &HttpFetcher, config: &Config, options: RunOptions) -> anyhow::Result<()> {
    let summary = match run(fetcher, config, options).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    if let Some(path) = &summary.research_report {
        println!("✓ Research report written to: {}", path.display());
    }
    if let Some(outcome) = &summary.scrape {
        print_statistics(&outcome.crawl, outcome.listing_records, outcome.dataset.len());
        println!("✓ Dataset written to: {}", config.output.dataset_path);
    }

    Ok(())
}
