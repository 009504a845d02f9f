// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::FetchSettings;
use crate::infrastructure::cache::fetch_cache::FetchCache;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Rotating desktop User-Agent pool. Courtesy variation, not a
/// security control.
const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
];

/// Normalized outcome of a page fetch. Transport failures collapse
/// to status 0 with empty text; callers never see an error. An HTTP
/// error status is preserved so "fetched but unusable" stays
/// distinguishable from "fetch failed".
#[derive(Debug, Clone, PartialEq)]
pub struct PageFetch {
    pub status: u16,
    pub text: String,
    pub content_type: String,
}

impl PageFetch {
    pub fn failed() -> Self {
        Self {
            status: 0,
            text: String::new(),
            content_type: String::new(),
        }
    }
}

/// HTTP page fetcher with a per-run URL cache. Body text is only
/// kept for textual content types; binary responses keep their
/// status code and an empty body.
pub struct HttpFetcher {
    client: reqwest::Client,
    cache: Arc<FetchCache>,
    accept_language: String,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            cache: Arc::new(FetchCache::new(Duration::from_secs(settings.cache_ttl_secs))),
            accept_language: settings.accept_language.clone(),
        }
    }

    /// Replace the default cache, e.g. to share one across fetchers.
    pub fn with_cache(mut self, cache: Arc<FetchCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Fetch a URL, serving repeat requests from the cache.
    pub async fn fetch(&self, url: &str) -> PageFetch {
        if let Some(cached) = self.cache.get(url) {
            debug!("cache hit for {}", url);
            return cached;
        }
        let outcome = self.fetch_uncached(url).await;
        // transport failures stay uncached so a later attempt can
        // succeed
        if outcome.status != 0 {
            self.cache.put(url, outcome.clone());
        }
        outcome
    }

    async fn fetch_uncached(&self, url: &str) -> PageFetch {
        let user_agent = USER_AGENTS[rand::rng().random_range(0..USER_AGENTS.len())];
        let response = match self
            .client
            .get(url)
            .header("User-Agent", user_agent)
            .header("Accept-Language", &self.accept_language)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                debug!("fetch failed for {}: {}", url, e);
                return PageFetch::failed();
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !response.status().is_success() || !is_textual(&content_type) {
            return PageFetch {
                status,
                text: String::new(),
                content_type,
            };
        }

        match response.text().await {
            Ok(text) => PageFetch {
                status,
                text,
                content_type,
            },
            Err(e) => {
                debug!("failed to read body of {}: {}", url, e);
                PageFetch::failed()
            }
        }
    }
}

/// Whether a content type is worth parsing as text. A missing header
/// is assumed to be HTML.
fn is_textual(content_type: &str) -> bool {
    let ct = content_type.to_lowercase();
    ct.is_empty() || ct.starts_with("text/") || ct.contains("html") || ct.contains("xml")
}
