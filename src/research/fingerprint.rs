//! Technology fingerprinting from response headers and page markup

use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use std::collections::BTreeMap;

/// Technologies keyed by category, names in discovery order
pub type Technologies = BTreeMap<String, Vec<String>>;

/// Script markers: (needle in a script src or inline body, category, name)
const SCRIPT_HINTS: &[(&str, &str, &str)] = &[
    ("/_next/", "javascript-frameworks", "Next.js"),
    ("__NEXT_DATA__", "javascript-frameworks", "Next.js"),
    ("react", "javascript-frameworks", "React"),
    ("jquery", "javascript-libraries", "jQuery"),
    ("googletagmanager.com", "tag-managers", "Google Tag Manager"),
    ("google-analytics.com", "analytics", "Google Analytics"),
];

fn add(tech: &mut Technologies, category: &str, name: &str) {
    let names = tech.entry(category.to_string()).or_default();
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Classifies what a page's headers and HTML reveal about its stack
pub fn fingerprint(headers: &HeaderMap, html: &str) -> Technologies {
    let mut tech = Technologies::new();

    if let Some(server) = header(headers, "server") {
        add(&mut tech, "web-servers", server);
    }
    if let Some(powered_by) = header(headers, "x-powered-by") {
        add(&mut tech, "web-frameworks", powered_by);
    }

    // CDNs
    if headers.contains_key("cf-ray") {
        add(&mut tech, "cdn", "Cloudflare");
    }
    let via = header(headers, "via").unwrap_or_default();
    if headers.contains_key("x-amz-cf-id") || via.to_ascii_lowercase().contains("cloudfront") {
        add(&mut tech, "cdn", "Amazon CloudFront");
    }
    if headers.keys().any(|k| k.as_str().starts_with("x-akamai")) {
        add(&mut tech, "cdn", "Akamai");
    }
    if header(headers, "x-served-by").is_some_and(|v| v.contains("cache-")) {
        add(&mut tech, "cdn", "Fastly");
    }

    inspect_markup(&mut tech, html);
    tech
}

fn inspect_markup(tech: &mut Technologies, html: &str) {
    let document = Html::parse_document(html);

    if let Ok(generator) = Selector::parse(r#"meta[name="generator"]"#) {
        for meta in document.select(&generator) {
            if let Some(content) = meta.value().attr("content").map(str::trim) {
                if !content.is_empty() {
                    add(tech, "cms", content);
                }
            }
        }
    }

    let Ok(scripts) = Selector::parse("script") else {
        return;
    };
    for script in document.select(&scripts) {
        let src = script.value().attr("src").unwrap_or_default().to_ascii_lowercase();
        let id = script.value().attr("id").unwrap_or_default();
        let body: String = script.text().collect();

        for (needle, category, name) in SCRIPT_HINTS {
            let hit = src.contains(&needle.to_ascii_lowercase())
                || id == *needle
                || (src.is_empty() && body.contains(needle));
            if hit {
                add(tech, category, name);
            }
        }
    }
}
