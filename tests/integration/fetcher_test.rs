// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use relevador::config::settings::FetchSettings;
use relevador::engines::http_fetcher::HttpFetcher;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetch_settings() -> FetchSettings {
    FetchSettings {
        timeout_secs: 5,
        accept_language: "es-ES,es;q=0.9,en;q=0.8".to_string(),
        cache_ttl_secs: 60,
        politeness_delay_ms: 0,
    }
}

#[tokio::test]
async fn fetch_returns_html_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>universidad</body></html>")
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&fetch_settings());
    let page = fetcher.fetch(&server.uri()).await;
    assert_eq!(page.status, 200);
    assert!(page.text.contains("universidad"));
    assert!(page.content_type.starts_with("text/html"));
}

#[tokio::test]
async fn binary_body_is_skipped_but_status_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/folleto.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.7".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&fetch_settings());
    let page = fetcher.fetch(&format!("{}/folleto.pdf", server.uri())).await;
    // fetched but not parsed: distinguishable from a fetch failure
    assert_eq!(page.status, 200);
    assert!(page.text.is_empty());
    assert_eq!(page.content_type, "application/pdf");
}

#[tokio::test]
async fn http_error_status_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/desaparecida"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&fetch_settings());
    let page = fetcher.fetch(&format!("{}/desaparecida", server.uri())).await;
    assert_eq!(page.status, 404);
    assert!(page.text.is_empty());
}

#[tokio::test]
async fn transport_failure_normalizes_to_status_zero() {
    let server = MockServer::start().await;
    let dead_uri = server.uri();
    drop(server);

    let fetcher = HttpFetcher::new(&fetch_settings());
    let page = fetcher.fetch(&dead_uri).await;
    assert_eq!(page.status, 0);
    assert!(page.text.is_empty());
}

#[tokio::test]
async fn repeat_fetches_hit_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>una vez</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&fetch_settings());
    let first = fetcher.fetch(&server.uri()).await;
    let second = fetcher.fetch(&server.uri()).await;
    assert_eq!(first, second);
    // the mock's expect(1) verifies on drop that only one request
    // reached the server
}
