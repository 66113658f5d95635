//! Background research on the target site
//!
//! Three independent probes document the site before it is scraped:
//! its robots.txt, the technologies it is built with and the owner of its
//! domain. A failing probe leaves its section empty and is logged; only an
//! unusable seed URL fails the whole pass.

mod fingerprint;
mod whois;

pub use fingerprint::{fingerprint, Technologies};
pub use whois::{lookup as whois_lookup, referral as whois_referral, registrable_domain};

use crate::config::ResearchConfig;
use crate::robots::fetch_robots;
use crate::ScrapeError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// What robots.txt says about the seed page
#[derive(Debug, Clone, PartialEq)]
pub struct RobotsFindings {
    /// Raw file content
    pub content: String,
    /// Whether the configured user agent may fetch the seed URL
    pub seed_allowed: bool,
    pub crawl_delay: Option<f64>,
}

/// Collected research findings, rendered by the markdown writer
#[derive(Debug, Clone)]
pub struct ResearchReport {
    pub seed_url: String,
    pub host: String,
    /// Registrable domain queried over WHOIS (the host for IP literals)
    pub domain: String,
    pub user_agent: String,
    pub generated_at: DateTime<Utc>,
    pub robots: Option<RobotsFindings>,
    pub technologies: Option<Technologies>,
    pub whois: Option<String>,
}

/// Runs every research probe against the site serving `seed_url`
///
/// # Errors
///
/// * `ScrapeError::UrlParse` - `seed_url` is not a valid URL
pub async fn perform_research(
    client: &Client,
    seed_url: &str,
    user_agent: &str,
    config: &ResearchConfig,
) -> Result<ResearchReport, ScrapeError> {
    let seed = Url::parse(seed_url)?;
    let host = seed.host_str().unwrap_or_default().to_string();
    let domain = registrable_domain(&host);

    tracing::info!("Researching {}", host);

    let robots = fetch_robots(client, &seed).await.map(|parsed| RobotsFindings {
        seed_allowed: parsed.is_allowed(seed.as_str(), user_agent),
        crawl_delay: parsed.crawl_delay(user_agent),
        content: parsed.content().to_string(),
    });

    let technologies = probe_technologies(client, &seed).await;

    let whois = match (&domain, config.whois_server.is_empty()) {
        (Some(domain), false) => {
            let limit = Duration::from_secs(config.whois_timeout_secs);
            whois_lookup(&config.whois_server, domain, limit).await
        }
        (None, _) => {
            tracing::warn!("No registrable domain for host '{}', skipping WHOIS", host);
            None
        }
        (Some(_), true) => {
            tracing::debug!("WHOIS lookup disabled");
            None
        }
    };

    Ok(ResearchReport {
        seed_url: seed_url.to_string(),
        domain: domain.unwrap_or_else(|| host.clone()),
        host,
        user_agent: user_agent.to_string(),
        generated_at: Utc::now(),
        robots,
        technologies,
        whois,
    })
}

/// Downloads the seed page once and fingerprints its headers and markup
async fn probe_technologies(client: &Client, seed: &Url) -> Option<Technologies> {
    let response = match client.get(seed.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Technology probe of {} failed: {}", seed, e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::warn!("Technology probe of {} returned HTTP {}", seed, response.status());
        return None;
    }

    let headers = response.headers().clone();
    match response.text().await {
        Ok(body) => Some(fingerprint(&headers, &body)),
        Err(e) => {
            tracing::warn!("Technology probe of {} could not read body: {}", seed, e);
            None
        }
    }
}
