//! Background research probes against a mock site

use cine_scrape::config::ResearchConfig;
use cine_scrape::output::{format_research_report, write_research_report};
use cine_scrape::research::perform_research;
use cine_scrape::robots::fetch_robots;
use reqwest::Client;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROBOTS: &str = "User-agent: *\nDisallow: /chart/\nCrawl-delay: 5\n";

fn no_whois() -> ResearchConfig {
    ResearchConfig {
        whois_server: String::new(),
        ..ResearchConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_robots_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ROBOTS))
        .mount(&server)
        .await;

    let page = Url::parse(&format!("{}/chart/moviemeter/", server.uri())).unwrap();
    let robots = fetch_robots(&Client::new(), &page).await.unwrap();

    assert_eq!(robots.content(), ROBOTS);
    assert!(!robots.is_allowed(page.as_str(), "*"));
    assert_eq!(robots.crawl_delay("*"), Some(5.0));
}

#[tokio::test]
async fn test_fetch_robots_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let page = Url::parse(&server.uri()).unwrap();
    assert!(fetch_robots(&Client::new(), &page).await.is_none());
}

#[tokio::test]
async fn test_research_report_from_mock_site() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ROBOTS))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/chart/moviemeter/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("server", "nginx")
                .set_body_string(
                    r#"<html><head><script src="/js/jquery.min.js"></script></head></html>"#,
                ),
        )
        .mount(&server)
        .await;

    let seed = format!("{}/chart/moviemeter/", server.uri());
    let report = perform_research(&Client::new(), &seed, "*", &no_whois())
        .await
        .unwrap();

    assert_eq!(report.host, "127.0.0.1");
    assert_eq!(report.domain, "127.0.0.1");
    assert_eq!(report.whois, None);

    let robots = report.robots.as_ref().unwrap();
    assert!(!robots.seed_allowed);
    assert_eq!(robots.crawl_delay, Some(5.0));

    let tech = report.technologies.as_ref().unwrap();
    assert_eq!(tech["web-servers"], vec!["nginx"]);
    assert_eq!(tech["javascript-libraries"], vec!["jQuery"]);

    let dir = tempfile::TempDir::new().unwrap();
    let md_path = dir.path().join("dataset/background_research.md");
    write_research_report(&report, &md_path).unwrap();

    let md = std::fs::read_to_string(&md_path).unwrap();
    assert_eq!(md, format_research_report(&report));
    assert!(md.contains("- **Seed path allowed for `*`**: no"));
    assert!(md.contains("| web-servers | nginx |"));
    assert!(md.contains("Could not retrieve domain owner information"));
}

#[tokio::test]
async fn test_research_survives_failing_probes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let seed = format!("{}/chart/", server.uri());
    let report = perform_research(&Client::new(), &seed, "*", &no_whois())
        .await
        .unwrap();

    assert!(report.robots.is_none());
    assert!(report.technologies.is_none());

    let md = format_research_report(&report);
    assert!(md.contains("Could not retrieve robots.txt"));
    assert!(md.contains("Could not retrieve information about the technologies used"));
}
