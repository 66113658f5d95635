use serde::Deserialize;

/// Main configuration structure for Cine-Scrape
///
/// Every section is optional; a missing file section falls back to the
/// defaults below, which target the IMDb "Most Popular Movies" chart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
    #[serde(default)]
    pub research: ResearchConfig,
}

/// How listing rows are associated with their metadata and ranking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    /// One pass over row containers; each field is looked up inside its row
    #[default]
    Structural,
    /// Three document-wide lists zipped by position
    Positional,
}

/// Crawl and fetch behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Chart page the crawl starts from
    #[serde(rename = "seed-url", default = "default_seed_url")]
    pub seed_url: String,

    /// Value of the User-Agent header
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Additional attempts after a transient fetch failure
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Stop the crawl after this many pages have produced a record
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<usize>,

    /// Whole-request timeout; unset leaves the transport default in place
    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(rename = "listing-mode", default)]
    pub listing_mode: ListingMode,
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the joined CSV dataset
    #[serde(rename = "dataset-path", default = "default_dataset_path")]
    pub dataset_path: String,

    /// Path of the background research report
    #[serde(rename = "research-path", default = "default_research_path")]
    pub research_path: String,
}

/// Background research settings
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchConfig {
    /// Root WHOIS server as `host:port`; empty disables the lookup
    #[serde(rename = "whois-server", default = "default_whois_server")]
    pub whois_server: String,

    /// Timeout for each WHOIS connection and response
    #[serde(rename = "whois-timeout-secs", default = "default_whois_timeout_secs")]
    pub whois_timeout_secs: u64,
}

/// CSS selectors describing the target site's markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MarkupConfig {
    // Title page
    pub original_title: String,
    pub title: String,
    pub rating: String,
    pub genre_list: String,
    pub genre_chip: String,
    pub director: String,

    // Chart page
    pub listing_row: String,
    pub listing_name: String,
    pub metadata_group: String,
    pub metadata_item: String,
    pub ranking: String,
    pub ranking_attribute: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            seed_url: default_seed_url(),
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            max_pages: None,
            request_timeout_secs: None,
            listing_mode: ListingMode::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            research_path: default_research_path(),
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            whois_server: default_whois_server(),
            whois_timeout_secs: default_whois_timeout_secs(),
        }
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            original_title: "div.sc-d8941411-1.fTeJrK".to_string(),
            title: "span.hero__primary-text".to_string(),
            rating: "span.sc-bde20123-1.cMEQkK".to_string(),
            genre_list: "div.ipc-chip-list__scroller".to_string(),
            genre_chip: "a.ipc-chip".to_string(),
            director: "a.ipc-metadata-list-item__list-content-item".to_string(),
            listing_row: "li.ipc-metadata-list-summary-item".to_string(),
            listing_name: "h3.ipc-title__text".to_string(),
            metadata_group: "div.sc-b189961a-7.feoqjK.cli-title-metadata".to_string(),
            metadata_item: "span.sc-b189961a-8.kLaxqf.cli-title-metadata-item".to_string(),
            ranking: "div.sc-b8b74125-0.eukXAN.meter-const-ranking.sc-b189961a-6.fabIxY.cli-meter-title-header".to_string(),
            ranking_attribute: "aria-label".to_string(),
        }
    }
}

impl MarkupConfig {
    /// All selector fields paired with their config key, for validation
    pub fn selectors(&self) -> [(&'static str, &str); 11] {
        [
            ("original-title", &self.original_title),
            ("title", &self.title),
            ("rating", &self.rating),
            ("genre-list", &self.genre_list),
            ("genre-chip", &self.genre_chip),
            ("director", &self.director),
            ("listing-row", &self.listing_row),
            ("listing-name", &self.listing_name),
            ("metadata-group", &self.metadata_group),
            ("metadata-item", &self.metadata_item),
            ("ranking", &self.ranking),
        ]
    }
}

fn default_seed_url() -> String {
    "https://www.imdb.com/chart/moviemeter/?ref_=nv_mv_mpm".to_string()
}

fn default_user_agent() -> String {
    "*".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_dataset_path() -> String {
    "dataset/dataset.csv".to_string()
}

fn default_research_path() -> String {
    "dataset/background_research.md".to_string()
}

fn default_whois_server() -> String {
    "whois.iana.org:43".to_string()
}

fn default_whois_timeout_secs() -> u64 {
    10
}
