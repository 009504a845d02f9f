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

const DEFAULT_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";
const PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
struct BingResponse {
    #[serde(rename = "webPages")]
    web_pages: Option<BingWebPages>,
}

#[derive(Debug, Deserialize)]
struct BingWebPages {
    value: Vec<BingWebPage>,
}

#[derive(Debug, Deserialize)]
struct BingWebPage {
    name: String,
    url: String,
    snippet: Option<String>,
}

/// Bing Web Search API client, authenticated with a subscription
/// key sent in the Ocp-Apim-Subscription-Key header.
pub struct BingApiProvider {
    client: reqwest::Client,
    endpoint: String,
    subscription_key: Option<String>,
    max_pages: u32,
    request_delay: Duration,
}

impl BingApiProvider {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            subscription_key: settings.bing_subscription_key.clone(),
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
        query: &str,
        offset: u32,
        count: u32,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", key)
            .query(&[
                ("q", query),
                ("count", &count.to_string()),
                ("offset", &offset.to_string()),
                ("mkt", "es-ES"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        if response.status().as_u16() == 429 {
            return Err(SearchError::RateLimitExceeded);
        }
        if !response.status().is_success() {
            return Err(SearchError::ProviderError(format!(
                "Bing Search API error: {}",
                response.status()
            )));
        }

        let parsed: BingResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ProviderError(e.to_string()))?;

        Ok(parsed
            .web_pages
            .map(|w| w.value)
            .unwrap_or_default()
            .into_iter()
            .map(|page| SearchHit {
                url: page.url,
                title: page.name,
                snippet: page.snippet,
            })
            .collect())
    }
}

#[async_trait]
impl SearchProvider for BingApiProvider {
    async fn search(&self, query: &str, wanted: u32) -> Result<Vec<SearchHit>, SearchError> {
        let key = match &self.subscription_key {
            Some(key) => key.clone(),
            None => return Err(SearchError::NotConfigured),
        };

        let mut hits: Vec<SearchHit> = Vec::new();
        let mut offset = 0u32;

        for page in 0..self.max_pages {
            if hits.len() >= wanted as usize {
                break;
            }
            if page > 0 {
                tokio::time::sleep(self.request_delay).await;
            }
            let count = PAGE_SIZE.min(wanted - hits.len() as u32);
            match self.fetch_page(&key, query, offset, count).await {
                Ok(page_hits) => {
                    if page_hits.is_empty() {
                        break;
                    }
                    offset += page_hits.len() as u32;
                    hits.extend(page_hits);
                }
                Err(e) if hits.is_empty() => return Err(e),
                Err(e) => {
                    debug!("bing page {} failed, stopping pagination: {}", page, e);
                    break;
                }
            }
        }

        hits.truncate(wanted as usize);
        Ok(hits)
    }

    fn is_configured(&self) -> bool {
        self.subscription_key.is_some()
    }

    fn name(&self) -> &'static str {
        "bing_api"
    }
}
