// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use relevador::config::settings::FetchSettings;
use relevador::domain::catalog::TermCatalog;
use relevador::domain::models::category::Category;
use relevador::domain::services::scanner::SiteScanner;
use relevador::engines::http_fetcher::HttpFetcher;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scanner() -> SiteScanner {
    let settings = FetchSettings {
        timeout_secs: 5,
        accept_language: "es-ES,es;q=0.9".to_string(),
        cache_ttl_secs: 60,
        politeness_delay_ms: 0,
    };
    SiteScanner::new(
        Arc::new(HttpFetcher::new(&settings)),
        Arc::new(TermCatalog::builtin()),
        10,
        Duration::ZERO,
    )
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

#[tokio::test]
async fn scan_follows_relevant_links_and_scores_all_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "<p>La universidad impulsa la investigación y la ciencia para sus estudiantes.</p>\
             <a href=\"/ciencia/politica-abierta\">Ciencia abierta</a>\
             <a href=\"https://otherdomain.com/research\">Red externa</a>\
             <a href=\"/agenda\">Agenda</a>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ciencia/politica-abierta"))
        .respond_with(html_page(
            "<p>Apostamos por la ciencia abierta y los datos abiertos en el repositorio institucional.</p>",
        ))
        .mount(&server)
        .await;

    let card = scanner().scan(&server.uri(), 3).await;

    assert!(card.accessible);
    assert_eq!(card.detected_language, "español");
    assert!(!card.sample_content.is_empty());
    assert_eq!(card.analyzed_urls.len(), 2);
    assert!(card.analyzed_urls[1].ends_with("/ciencia/politica-abierta"));

    let ca = card.category(Category::CienciaAbierta);
    assert!(ca.found);
    assert!(ca.score >= 3);
    let terms = ca.matched_terms();
    assert!(terms.contains(&"ciencia abierta"));
    assert!(terms.contains(&"datos abiertos"));
    assert!(terms.contains(&"repositorio institucional"));
}

#[tokio::test]
async fn primary_fetch_failure_ends_the_scan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let card = scanner().scan(&server.uri(), 3).await;
    assert!(!card.accessible);
    assert!(card.analyzed_urls.is_empty());
    assert!(card.sample_content.is_empty());
    assert!(card.all_scores_zero());
}

#[tokio::test]
async fn failed_followed_link_is_skipped_silently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "<a href=\"/research/rota\">Research</a>\
             <a href=\"/research/viva\">Open science group</a>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/research/rota"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/research/viva"))
        .respond_with(html_page("<p>We publish open science and open data.</p>"))
        .mount(&server)
        .await;

    let card = scanner().scan(&server.uri(), 5).await;
    assert!(card.accessible);
    assert_eq!(card.analyzed_urls.len(), 2);
    assert!(card.analyzed_urls[1].ends_with("/research/viva"));
    assert_eq!(card.category(Category::CienciaAbierta).score, 2);
}

#[tokio::test]
async fn scanning_the_same_fixture_twice_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "<p>university open science and open data with science communication</p>",
        ))
        .mount(&server)
        .await;

    let scanner = scanner();
    let first = scanner.scan(&server.uri(), 0).await;
    let second = scanner.scan(&server.uri(), 0).await;
    assert_eq!(first.categories, second.categories);
    assert_eq!(first.analyzed_urls, second.analyzed_urls);
}
