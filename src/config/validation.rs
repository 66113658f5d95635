use crate::config::types::{Config, MarkupConfig, OutputConfig, ResearchConfig, ScraperConfig};
use crate::{ConfigError, ConfigResult};
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_scraper_config(&config.scraper)?;
    validate_output_config(&config.output)?;
    validate_markup_config(&config.markup)?;
    validate_research_config(&config.research)?;
    Ok(())
}

/// Validates crawl and fetch settings
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed-url '{}': {}", config.seed_url, e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "seed-url '{}' must use http or https",
            config.seed_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dataset_path.is_empty() {
        return Err(ConfigError::Validation(
            "dataset-path cannot be empty".to_string(),
        ));
    }

    if config.research_path.is_empty() {
        return Err(ConfigError::Validation(
            "research-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that every markup selector compiles
fn validate_markup_config(config: &MarkupConfig) -> Result<(), ConfigError> {
    for (key, selector) in config.selectors() {
        Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("{} = '{}': {}", key, selector, e))
        })?;
    }

    if config.ranking_attribute.trim().is_empty() {
        return Err(ConfigError::Validation(
            "ranking-attribute cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates research settings
fn validate_research_config(config: &ResearchConfig) -> Result<(), ConfigError> {
    if config.whois_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "whois-timeout-secs must be >= 1".to_string(),
        ));
    }

    if !config.whois_server.is_empty() && !config.whois_server.contains(':') {
        return Err(ConfigError::Validation(format!(
            "whois-server must be host:port, got '{}'",
            config.whois_server
        )));
    }

    Ok(())
}
