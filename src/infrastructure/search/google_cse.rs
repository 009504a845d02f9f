// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SearchSettings;
use crate::domain::search::{SearchError, SearchHit, SearchProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
/// The Custom Search API rejects num above 10.
const PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
struct CseResponse {
    items: Option<Vec<CseItem>>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    title: String,
    link: String,
    snippet: Option<String>,
}

/// Google Custom Search JSON API client. Requires an API key and an
/// engine identifier (cx); unconfigured instances are skipped by the
/// provider chain.
pub struct GoogleCseProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    engine_id: Option<String>,
    max_pages: u32,
    request_delay: Duration,
}

impl GoogleCseProvider {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: settings.google_api_key.clone(),
            engine_id: settings.google_engine_id.clone(),
            max_pages: settings.max_pages,
            request_delay: Duration::from_millis(settings.request_delay_ms),
        }
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn fetch_page(
        &self,
        key: &str,
        cx: &str,
        query: &str,
        start: u32,
        num: u32,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", key),
                ("cx", cx),
                ("q", query),
                ("num", &num.to_string()),
                ("start", &start.to_string()),
                ("hl", "es"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        if response.status().as_u16() == 429 {
            return Err(SearchError::RateLimitExceeded);
        }
        if !response.status().is_success() {
            return Err(SearchError::ProviderError(format!(
                "Google Search API error: {}",
                response.status()
            )));
        }

        let parsed: CseResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ProviderError(e.to_string()))?;

        Ok(parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| SearchHit {
                url: item.link,
                title: item.title,
                snippet: item.snippet,
            })
            .collect())
    }
}

#[async_trait]
impl SearchProvider for GoogleCseProvider {
    async fn search(&self, query: &str, wanted: u32) -> Result<Vec<SearchHit>, SearchError> {
        let (key, cx) = match (&self.api_key, &self.engine_id) {
            (Some(key), Some(cx)) => (key.clone(), cx.clone()),
            _ => return Err(SearchError::NotConfigured),
        };

        let mut hits: Vec<SearchHit> = Vec::new();
        // the API uses 1-based result offsets
        let mut start = 1u32;

        for page in 0..self.max_pages {
            if hits.len() >= wanted as usize {
                break;
            }
            if page > 0 {
                tokio::time::sleep(self.request_delay).await;
            }
            let num = PAGE_SIZE.min(wanted - hits.len() as u32);
            match self.fetch_page(&key, &cx, query, start, num).await {
                Ok(page_hits) => {
                    if page_hits.is_empty() {
                        break;
                    }
                    start += page_hits.len() as u32;
                    hits.extend(page_hits);
                }
                Err(e) if hits.is_empty() => return Err(e),
                Err(e) => {
                    // a failed page ends pagination, it is not retried
                    debug!("google page {} failed, stopping pagination: {}", page, e);
                    break;
                }
            }
        }

        hits.truncate(wanted as usize);
        Ok(hits)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }

    fn name(&self) -> &'static str {
        "google_cse"
    }
}
