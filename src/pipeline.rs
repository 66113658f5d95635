//! Top-level run: background research, then the scrape
//!
//! The research report is a side product. Any failure while producing it is
//! logged and the scrape still runs.

use crate::config::{validate, Config};
use crate::crawler::HttpFetcher;
use crate::dataset::{build_dataset, BuildOutcome};
use crate::output::write_research_report;
use crate::research::perform_research;
use crate::Result;
use std::path::{Path, PathBuf};

/// Which stages a run performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub research: bool,
    pub scrape: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            research: true,
            scrape: true,
        }
    }
}

/// What a run produced
#[derive(Debug)]
pub struct RunSummary {
    /// Path of the research report, if one was written
    pub research_report: Option<PathBuf>,
    /// Dataset and crawl statistics, if the scrape ran
    pub scrape: Option<BuildOutcome>,
}

/// Runs the selected stages with one shared fetcher
///
/// # Errors
///
/// * `ScrapeError::Config` - the configuration does not validate
/// * Any error from [`build_dataset`] or from writing the dataset CSV
///
/// Research errors are never returned.
pub async fn run(fetcher: &HttpFetcher, config: &Config, options: RunOptions) -> Result<RunSummary> {
    validate(config)?;

    let research_report = if options.research {
        match write_background_research(fetcher, config).await {
            Ok(path) => {
                tracing::info!("Research report written to {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::error!("Background research failed, continuing with scrape: {}", e);
                None
            }
        }
    } else {
        None
    };

    let scrape = if options.scrape {
        tracing::info!("Starting crawl at {}", config.scraper.seed_url);
        let outcome = build_dataset(fetcher, config).await?;
        outcome.dataset.write_csv(Path::new(&config.output.dataset_path))?;
        Some(outcome)
    } else {
        None
    };

    Ok(RunSummary {
        research_report,
        scrape,
    })
}

async fn write_background_research(fetcher: &HttpFetcher, config: &Config) -> Result<PathBuf> {
    let report = perform_research(
        fetcher.client(),
        &config.scraper.seed_url,
        &config.scraper.user_agent,
        &config.research,
    )
    .await?;

    let path = PathBuf::from(&config.output.research_path);
    write_research_report(&report, &path)?;
    Ok(path)
}
