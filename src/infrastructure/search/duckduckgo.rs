// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SearchSettings;
use crate::domain::search::{SearchError, SearchHit, SearchProvider};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Unauthenticated fallback backend: scrapes the HTML results page
/// of DuckDuckGo. Needs no credentials, so it is "configured"
/// whenever the scrape fallback is enabled in settings.
pub struct DuckDuckGoProvider {
    client: reqwest::Client,
    endpoint: String,
    enabled: bool,
    max_pages: u32,
    request_delay: Duration,
}

impl DuckDuckGoProvider {
    pub fn new(settings: &SearchSettings) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            enabled: settings.enable_scrape_fallback,
            max_pages: settings.max_pages,
            request_delay: Duration::from_millis(settings.request_delay_ms),
        }
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Parse a DuckDuckGo HTML results page into hits.
    pub fn parse_results(html: &str) -> Result<Vec<SearchHit>, SearchError> {
        // anti-bot interstitial instead of results
        if html.contains("anomaly-modal") || html.contains("challenge-form") {
            return Err(SearchError::RateLimitExceeded);
        }

        let document = Html::parse_document(html);
        let result_selector =
            Selector::parse(".result").expect("Failed to parse result selector");
        let title_selector =
            Selector::parse("a.result__a").expect("Failed to parse title selector");
        let snippet_selector =
            Selector::parse(".result__snippet").expect("Failed to parse snippet selector");

        let mut hits = Vec::new();
        for element in document.select(&result_selector) {
            let anchor = match element.select(&title_selector).next() {
                Some(a) => a,
                None => continue,
            };
            let href = match anchor.value().attr("href") {
                Some(h) => h,
                None => continue,
            };
            let url = match clean_redirect_url(href) {
                Some(u) => u,
                None => continue,
            };
            let title = anchor.text().collect::<String>().trim().to_string();
            if title.is_empty() || !url.starts_with("http") {
                continue;
            }
            let snippet = element
                .select(&snippet_selector)
                .next()
                .map(|s| s.text().collect::<String>().trim().to_string())
                .filter(|s| !s.is_empty());
            hits.push(SearchHit {
                url,
                title,
                snippet,
            });
        }
        Ok(hits)
    }

    async fn fetch_page(&self, query: &str, offset: u32) -> Result<Vec<SearchHit>, SearchError> {
        let mut request = self.client.get(&self.endpoint).query(&[("q", query)]);
        if offset > 0 {
            request = request.query(&[("s", &offset.to_string())]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::ProviderError(format!(
                "DuckDuckGo error: {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::ProviderError(e.to_string()))?;

        Self::parse_results(&html)
    }
}

/// Undo DuckDuckGo's redirect wrapping. Result hrefs usually point
/// at /l/?uddg=<encoded target>&rut=...; plain http(s) links pass
/// through, everything else is dropped.
fn clean_redirect_url(href: &str) -> Option<String> {
    for prefix in ["/l/?uddg=", "//duckduckgo.com/l/?uddg="] {
        if let Some(rest) = href.strip_prefix(prefix) {
            let encoded = rest.split('&').next().unwrap_or(rest);
            return urlencoding::decode(encoded).ok().map(|s| s.into_owned());
        }
    }
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    None
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str, wanted: u32) -> Result<Vec<SearchHit>, SearchError> {
        if !self.enabled {
            return Err(SearchError::NotConfigured);
        }

        let mut hits: Vec<SearchHit> = Vec::new();
        let mut offset = 0u32;

        for page in 0..self.max_pages {
            if hits.len() >= wanted as usize {
                break;
            }
            if page > 0 {
                tokio::time::sleep(self.request_delay).await;
            }
            match self.fetch_page(query, offset).await {
                Ok(page_hits) => {
                    if page_hits.is_empty() {
                        break;
                    }
                    offset += page_hits.len() as u32;
                    hits.extend(page_hits);
                }
                Err(e) if hits.is_empty() => return Err(e),
                Err(e) => {
                    debug!("duckduckgo page {} failed, stopping pagination: {}", page, e);
                    break;
                }
            }
        }

        hits.truncate(wanted as usize);
        Ok(hits)
    }

    fn is_configured(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}
