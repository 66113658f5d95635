//! End-to-end crawl, join and CSV output against a mock chart site

use cine_scrape::config::Config;
use cine_scrape::crawler::HttpFetcher;
use cine_scrape::dataset::{build_dataset, Dataset, DatasetRow};
use cine_scrape::pipeline::{run, RunOptions};
use cine_scrape::ScrapeError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const META: &str = "sc-b189961a-7 feoqjK cli-title-metadata";
const ITEM: &str = "sc-b189961a-8 kLaxqf cli-title-metadata-item";
const RANK: &str =
    "sc-b8b74125-0 eukXAN meter-const-ranking sc-b189961a-6 fabIxY cli-meter-title-header";

const SEED_PATH: &str = "/chart/moviemeter/";

fn chart_row(n: u32, name: &str, items: [&str; 3]) -> String {
    let items: String = items
        .iter()
        .map(|i| format!(r#"<span class="{ITEM}">{i}</span>"#))
        .collect();
    format!(
        r#"<li class="ipc-metadata-list-summary-item">
             <div class="{RANK}" aria-label="Current ranking: {n}"></div>
             <a href="/title/tt000000{n}/?ref_=chtmvm_t_{n}"><h3 class="ipc-title__text">{name}</h3></a>
             <div class="{META}">{items}</div>
           </li>"#
    )
}

fn chart_page() -> String {
    format!(
        r#"<html><body>
             <h3 class="ipc-title__text">Most Popular Movies</h3>
             <ul>{}{}{}</ul>
           </body></html>"#,
        chart_row(1, "Dune", ["2024", "2h 46m", "PG-13"]),
        chart_row(2, "Arrival", ["2016", "1h 56m", "PG-13"]),
        chart_row(3, "Ghost", ["1990", "2h 7m", "PG-13"]),
    )
}

const DUNE_PAGE: &str = r#"
    <html><body>
      <h1><span class="hero__primary-text">Dune</span></h1>
      <div class="sc-d8941411-1 fTeJrK">Original title: Dune: Part Two</div>
      <span class="sc-bde20123-1 cMEQkK">8.6</span>
      <div class="ipc-chip-list__scroller">
        <a class="ipc-chip"><span>Action</span></a>
        <a class="ipc-chip"><span>Adventure</span></a>
        <a class="ipc-chip"><span>Drama</span></a>
        <a class="ipc-chip"><span>Sci-Fi</span></a>
      </div>
      <a class="ipc-metadata-list-item__list-content-item" href="/name/nm1">Denis Villeneuve</a>
    </body></html>
"#;

// Links back to Dune so the crawl meets an already queued URL
const ARRIVAL_PAGE: &str = r#"
    <html><body>
      <h1><span class="hero__primary-text">Arrival</span></h1>
      <span class="sc-bde20123-1 cMEQkK">7.9</span>
      <div class="ipc-chip-list__scroller">
        <a class="ipc-chip"><span>Drama</span></a>
        <a class="ipc-chip"><span>Sci-Fi</span></a>
      </div>
      <a class="ipc-metadata-list-item__list-content-item" href="/name/nm1">Denis Villeneuve</a>
      <a href="/title/tt0000001/?ref_=chtmvm_t_1">More like this</a>
    </body></html>
"#;

/// Mounts the chart, two title pages and a missing third title
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(chart_page()))
        .expect(2)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt0000001/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DUNE_PAGE))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt0000002/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARRIVAL_PAGE))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt0000003/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(server)
        .await;
}

fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.scraper.seed_url = format!("{}{}?ref_=nv_mv_mpm", server.uri(), SEED_PATH);
    config.scraper.max_retries = 0;
    config
}

#[tokio::test]
async fn test_full_scrape_joins_crawled_titles_with_chart() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = test_config(&server);
    let fetcher = HttpFetcher::from_config(&config.scraper).unwrap();

    let outcome = build_dataset(&fetcher, &config).await.unwrap();

    // Crawl order is last-discovered first, so Arrival precedes Dune
    assert_eq!(
        outcome.dataset.rows,
        vec![
            DatasetRow {
                original_title: None,
                title: "Arrival".to_string(),
                rating: Some("7.9".to_string()),
                genre1: Some("Drama".to_string()),
                genre2: Some("Sci-Fi".to_string()),
                genre3: None,
                director: Some("Denis Villeneuve".to_string()),
                year: Some("2016".to_string()),
                duration: Some("1h 56m".to_string()),
                classification: Some("PG-13".to_string()),
                ranking: Some("2".to_string()),
            },
            DatasetRow {
                original_title: Some("Dune: Part Two".to_string()),
                title: "Dune".to_string(),
                rating: Some("8.6".to_string()),
                genre1: Some("Action".to_string()),
                genre2: Some("Adventure".to_string()),
                genre3: Some("Drama".to_string()),
                director: Some("Denis Villeneuve".to_string()),
                year: Some("2024".to_string()),
                duration: Some("2h 46m".to_string()),
                classification: Some("PG-13".to_string()),
                ranking: Some("1".to_string()),
            },
        ]
    );

    assert_eq!(outcome.listing_records, 3);

    let crawl = &outcome.crawl;
    assert_eq!(crawl.pages_fetched, 3, "seed plus two title pages");
    assert_eq!(crawl.records, 3);
    assert_eq!(crawl.fetch_failures, 1, "the missing third title");
    assert_eq!(crawl.duplicates_skipped, 1, "Dune linked twice");
    assert_eq!(crawl.links_discovered, 4);
    assert!(!crawl.stopped_at_limit);
}

#[tokio::test]
async fn test_dataset_csv_written_and_read_back() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let config = test_config(&server);
    let fetcher = HttpFetcher::from_config(&config.scraper).unwrap();
    let outcome = build_dataset(&fetcher, &config).await.unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let csv_path = dir.path().join("dataset/dataset.csv");
    outcome.dataset.write_csv(&csv_path).unwrap();

    let text = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("original_title,title,rating,genre1,genre2,genre3,director,year,duration,classification,ranking")
    );
    assert_eq!(
        lines.next(),
        Some(",Arrival,7.9,Drama,Sci-Fi,,Denis Villeneuve,2016,1h 56m,PG-13,2")
    );
    assert_eq!(
        lines.next(),
        Some("Dune: Part Two,Dune,8.6,Action,Adventure,Drama,Denis Villeneuve,2024,2h 46m,PG-13,1")
    );
    assert_eq!(lines.next(), None);

    assert_eq!(Dataset::read_csv(&csv_path).unwrap(), outcome.dataset);
}

#[tokio::test]
async fn test_page_limit_stops_crawl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(chart_page()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/title/tt0000003/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/title/tt0000002/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARRIVAL_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/title/tt0000001/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DUNE_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.scraper.max_pages = Some(2);
    let fetcher = HttpFetcher::from_config(&config.scraper).unwrap();

    let outcome = build_dataset(&fetcher, &config).await.unwrap();

    assert!(outcome.crawl.stopped_at_limit);
    assert_eq!(outcome.crawl.records, 2);
    assert_eq!(outcome.dataset.rows.len(), 1);
    assert_eq!(outcome.dataset.rows[0].title, "Arrival");
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_crawl_and_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEED_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let fetcher = HttpFetcher::from_config(&config.scraper).unwrap();

    let result = build_dataset(&fetcher, &config).await;

    assert!(matches!(result, Err(ScrapeError::SeedUnavailable { .. })));
}

#[tokio::test]
async fn test_unwritable_research_report_does_not_block_dataset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(chart_page()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/title/tt0000001/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DUNE_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/title/tt0000002/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARRIVAL_PAGE))
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let csv_path = dir.path().join("dataset.csv");

    let mut config = test_config(&server);
    config.research.whois_server = String::new();
    // A directory cannot be written as a file
    config.output.research_path = dir.path().to_string_lossy().into_owned();
    config.output.dataset_path = csv_path.to_string_lossy().into_owned();
    let fetcher = HttpFetcher::from_config(&config.scraper).unwrap();

    let summary = run(&fetcher, &config, RunOptions::default()).await.unwrap();

    assert_eq!(summary.research_report, None);
    let outcome = summary.scrape.unwrap();
    assert_eq!(outcome.dataset.len(), 2);
    assert_eq!(Dataset::read_csv(&csv_path).unwrap(), outcome.dataset);
}

#[tokio::test]
async fn test_research_only_run_writes_no_dataset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(chart_page()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let report_path = dir.path().join("research.md");
    let csv_path = dir.path().join("dataset.csv");

    let mut config = test_config(&server);
    config.research.whois_server = String::new();
    config.output.research_path = report_path.to_string_lossy().into_owned();
    config.output.dataset_path = csv_path.to_string_lossy().into_owned();
    let fetcher = HttpFetcher::from_config(&config.scraper).unwrap();

    let options = RunOptions {
        research: true,
        scrape: false,
    };
    let summary = run(&fetcher, &config, options).await.unwrap();

    assert_eq!(summary.research_report.as_deref(), Some(report_path.as_path()));
    assert!(summary.scrape.is_none());
    assert!(report_path.exists());
    assert!(!csv_path.exists());
}
