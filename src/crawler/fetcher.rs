//! HTTP fetcher implementation
//!
//! This module handles all page downloads for the crawler, including:
//! - Building HTTP clients with the configured user agent
//! - Classifying failures as transient (retried) or fatal (propagated)
//! - Bounded retry of transient failures
//! - Reporting every attempt to an injected [`FetchObserver`]

use crate::config::ScraperConfig;
use crate::ScrapeError;
use reqwest::Client;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Anything the crawl can download pages from
///
/// `Ok(None)` means the page could not be retrieved after all retries and
/// should be skipped; `Err` is reserved for failures the caller cannot
/// recover from.
pub trait PageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Option<String>, ScrapeError>>;
}

/// A failed attempt that is worth retrying
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransientFailure {
    /// Connection, timeout, redirect or body transfer failure
    Network(String),
    /// The server answered with a non-success status
    Status(u16),
    /// The body is not valid UTF-8
    Decode(String),
}

impl fmt::Display for TransientFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "network error: {}", e),
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::Decode(e) => write!(f, "decode error: {}", e),
        }
    }
}

/// Receives fetch lifecycle events
///
/// The fetcher owns no logging setup of its own; whoever builds it decides
/// where these events go.
pub trait FetchObserver: Send + Sync {
    /// Called before every attempt, including retries
    fn downloading(&self, url: &str);

    /// Called after every failed attempt
    fn failed(&self, url: &str, failure: &TransientFailure);

    /// Called before a retry; `remaining` counts this retry
    fn retrying(&self, url: &str, remaining: u32);
}

/// Forwards fetch events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FetchObserver for TracingObserver {
    fn downloading(&self, url: &str) {
        tracing::info!("Downloading: {}", url);
    }

    fn failed(&self, url: &str, failure: &TransientFailure) {
        tracing::error!("Download error for {}: {}", url, failure);
    }

    fn retrying(&self, url: &str, remaining: u32) {
        tracing::info!("Retrying {} ({} attempts left)...", url, remaining);
    }
}

/// Builds an HTTP client with the configured user agent
///
/// No timeout is set unless `request_timeout_secs` is configured.
///
/// # Example
///
/// ```no_run
/// use cine_scrape::config::ScraperConfig;
/// use cine_scrape::crawler::build_http_client;
///
/// let client = build_http_client(&ScraperConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Downloads pages over HTTP with bounded retries
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    observer: Arc<dyn FetchObserver>,
}

impl HttpFetcher {
    /// Creates a fetcher that reports to [`TracingObserver`]
    pub fn new(client: Client, max_retries: u32) -> Self {
        Self::with_observer(client, max_retries, Arc::new(TracingObserver))
    }

    pub fn with_observer(client: Client, max_retries: u32, observer: Arc<dyn FetchObserver>) -> Self {
        Self {
            client,
            max_retries,
            observer,
        }
    }

    /// Builds a client from the scraper configuration and wraps it
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let client = build_http_client(config).map_err(|source| ScrapeError::Http {
            url: config.seed_url.clone(),
            source,
        })?;
        Ok(Self::new(client, config.max_retries))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches a URL, retrying transient failures
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Connect/timeout/body error | Retry |
    /// | Non-2xx status | Retry |
    /// | Body not UTF-8 | Retry |
    /// | Request cannot be built (bad URL) | Return `Err` immediately |
    ///
    /// After `max_retries` retries the page is given up on and `Ok(None)` is
    /// returned.
    pub async fn fetch_page(&self, url: &str) -> Result<Option<String>, ScrapeError> {
        let mut remaining = self.max_retries;

        loop {
            self.observer.downloading(url);

            let failure = match self.attempt(url).await? {
                Ok(body) => return Ok(Some(body)),
                Err(failure) => failure,
            };

            self.observer.failed(url, &failure);
            if remaining == 0 {
                return Ok(None);
            }
            self.observer.retrying(url, remaining);
            remaining -= 1;
        }
    }

    /// A single GET; the outer `Result` carries fatal errors, the inner one
    /// transient failures
    async fn attempt(&self, url: &str) -> Result<Result<String, TransientFailure>, ScrapeError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return classify(url, e).map(Err),
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(Err(TransientFailure::Status(status.as_u16())));
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return classify(url, e).map(Err),
        };

        Ok(String::from_utf8(bytes.to_vec()).map_err(|e| TransientFailure::Decode(e.to_string())))
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<String>, ScrapeError> {
        self.fetch_page(url).await
    }
}

/// Splits reqwest errors into retryable network failures and fatal ones
fn classify(url: &str, error: reqwest::Error) -> Result<TransientFailure, ScrapeError> {
    if error.is_builder() {
        return Err(ScrapeError::Http {
            url: url.to_string(),
            source: error,
        });
    }
    Ok(TransientFailure::Network(error.to_string()))
}
