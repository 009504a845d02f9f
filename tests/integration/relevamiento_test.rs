// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use relevador::application::progress::NullProgress;
use relevador::application::relevamiento::{Relevamiento, RelevamientoConfig, RelevamientoError};
use relevador::config::settings::{ControlSettings, FetchSettings};
use relevador::domain::catalog::TermCatalog;
use relevador::domain::models::category::Category;
use relevador::domain::search::{SearchError, SearchHit, SearchProvider};
use relevador::engines::http_fetcher::HttpFetcher;
use relevador::infrastructure::search::ProviderChain;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Search stub: fixed hit lists for category queries and for
/// site-restricted reinforcement queries.
struct ScriptedSearch {
    hits: Vec<SearchHit>,
    reinforcement_hits: Vec<SearchHit>,
}

#[async_trait]
impl SearchProvider for ScriptedSearch {
    async fn search(&self, query: &str, _wanted: u32) -> Result<Vec<SearchHit>, SearchError> {
        if query.starts_with("site:") {
            Ok(self.reinforcement_hits.clone())
        } else {
            Ok(self.hits.clone())
        }
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn hit(url: &str, title: &str) -> SearchHit {
    SearchHit {
        url: url.to_string(),
        title: title.to_string(),
        snippet: None,
    }
}

fn config(control_url: &str) -> RelevamientoConfig {
    RelevamientoConfig {
        control: ControlSettings {
            name: "Universitat Jaume I".to_string(),
            url: control_url.to_string(),
            country: "España".to_string(),
        },
        results_per_query: 10,
        max_query_terms: 1,
        follow_links: 0,
        link_limit: 10,
        query_delay: Duration::ZERO,
        politeness_delay: Duration::ZERO,
    }
}

fn fetcher() -> Arc<HttpFetcher> {
    Arc::new(HttpFetcher::new(&FetchSettings {
        timeout_secs: 5,
        accept_language: "es-ES,es;q=0.9".to_string(),
        cache_ttl_secs: 60,
        politeness_delay_ms: 0,
    }))
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn relevamiento(
    control_url: &str,
    hits: Vec<SearchHit>,
    reinforcement_hits: Vec<SearchHit>,
) -> Relevamiento {
    let chain = ProviderChain::new(vec![Arc::new(ScriptedSearch {
        hits,
        reinforcement_hits,
    })]);
    Relevamiento::with_components(
        config(control_url),
        Arc::new(TermCatalog::builtin()),
        fetcher(),
        chain,
    )
}

#[tokio::test]
async fn full_run_filters_deduplicates_and_orders_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/control"))
        .respond_with(html_page(
            "<p>La universitat aposta per la ciència oberta i les dades obertes.</p>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/uni"))
        .respond_with(html_page(
            "<p>Our university promotes open science and open data.</p>",
        ))
        .mount(&server)
        .await;

    let control_url = format!("{}/control", server.uri());
    let hits = vec![
        hit(&format!("{}/uni", server.uri()), "Universidad de Prueba"),
        // blocked by the classifier despite the title
        hit(
            "https://ranking-universities.com/top100",
            "Top Universities Ranking 2025",
        ),
        // same domain as the first hit: deduplicated within the category
        hit(&format!("{}/uni/otra", server.uri()), "Universidad Dos"),
    ];
    let runner = relevamiento(&control_url, hits, Vec::new());
    let records = runner.run(&NullProgress).await.unwrap();

    // control first, then one deduplicated candidate per category
    assert_eq!(records.len(), 1 + Category::ALL.len());
    assert!(records[0].is_control());
    assert!(records[0].scorecard.accessible);
    assert!(records[0]
        .scorecard
        .category(Category::CienciaAbierta)
        .found);

    for (record, category) in records[1..].iter().zip(Category::ALL) {
        assert_eq!(record.category, Some(category));
        assert!(record.scorecard.url.ends_with("/uni"));
        assert_eq!(
            record.search_term.as_deref(),
            Some(TermCatalog::builtin().query_terms(category)[0].as_str())
        );
        assert_eq!(
            record.scorecard.category(Category::CienciaAbierta).score,
            2
        );
    }
    assert!(records
        .iter()
        .all(|r| !r.institution.url.contains("ranking-universities")));
}

#[tokio::test]
async fn run_without_configured_backend_fails_up_front() {
    struct Unconfigured;

    #[async_trait]
    impl SearchProvider for Unconfigured {
        async fn search(&self, _q: &str, _w: u32) -> Result<Vec<SearchHit>, SearchError> {
            Ok(Vec::new())
        }
        fn is_configured(&self) -> bool {
            false
        }
        fn name(&self) -> &'static str {
            "unconfigured"
        }
    }

    let runner = Relevamiento::with_components(
        config("https://www.uji.es"),
        Arc::new(TermCatalog::builtin()),
        fetcher(),
        ProviderChain::new(vec![Arc::new(Unconfigured)]),
    );
    let result = runner.run(&NullProgress).await;
    assert!(matches!(result, Err(RelevamientoError::SearchUnavailable)));
}

#[tokio::test]
async fn reinforcement_search_rescues_an_empty_control_scan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/control"))
        .respond_with(html_page("<p>Benvinguts al portal institucional.</p>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/control/ciencia"))
        .respond_with(html_page(
            "<p>El repositori institucional difon la ciència oberta.</p>",
        ))
        .mount(&server)
        .await;

    let control_url = format!("{}/control", server.uri());
    let reinforcement = vec![
        // off-domain hit is ignored
        hit("https://otherdomain.com/ciencia", "Otra cosa"),
        hit(&format!("{}/control/ciencia", server.uri()), "Ciència oberta"),
    ];
    let runner = relevamiento(&control_url, Vec::new(), reinforcement);
    let records = runner.run(&NullProgress).await.unwrap();

    assert_eq!(records.len(), 1);
    let control = &records[0];
    assert!(control.is_control());
    let ca = control.scorecard.category(Category::CienciaAbierta);
    assert!(ca.found);
    assert!(ca.matched_terms().contains(&"ciència oberta"));
    assert!(control
        .scorecard
        .analyzed_urls
        .iter()
        .any(|u| u.ends_with("/control/ciencia")));
}

#[tokio::test]
async fn inaccessible_candidate_still_produces_a_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/control"))
        .respond_with(html_page("<p>ciencia abierta</p>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/desaparecida"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let control_url = format!("{}/control", server.uri());
    let hits = vec![hit(
        &format!("{}/desaparecida", server.uri()),
        "Universidad Fantasma",
    )];
    let runner = relevamiento(&control_url, hits, Vec::new());
    let records = runner.run(&NullProgress).await.unwrap();

    let ghost = records
        .iter()
        .find(|r| r.institution.url.ends_with("/desaparecida"))
        .expect("inaccessible candidate should still be reported");
    assert!(!ghost.scorecard.accessible);
    assert!(ghost.scorecard.analyzed_urls.is_empty());
    assert!(ghost.scorecard.all_scores_zero());
}

#[tokio::test]
async fn cancelled_run_returns_partial_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/control"))
        .respond_with(html_page("<p>ciencia abierta</p>"))
        .mount(&server)
        .await;

    let control_url = format!("{}/control", server.uri());
    let hits = vec![hit(&format!("{}/uni", server.uri()), "Universidad de Prueba")];
    let runner = relevamiento(&control_url, hits, Vec::new());

    runner.cancel_token().cancel();
    let records = runner.run(&NullProgress).await.unwrap();

    // the control scan completes, category work never starts
    assert_eq!(records.len(), 1);
    assert!(records[0].is_control());
}
