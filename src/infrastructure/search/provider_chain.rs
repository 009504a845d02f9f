// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SearchSettings;
use crate::domain::search::{SearchError, SearchHit, SearchProvider};
use crate::infrastructure::search::bing_api::BingApiProvider;
use crate::infrastructure::search::duckduckgo::DuckDuckGoProvider;
use crate::infrastructure::search::google_cse::GoogleCseProvider;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tries search backends in a fixed preference order and returns the
/// first non-empty result set. Unconfigured backends are skipped; a
/// backend error moves on to the next backend. With no configured
/// backend at all the chain reports `NotConfigured` so the caller
/// can surface "search unavailable" instead of an empty report.
pub struct ProviderChain {
    providers: Vec<Arc<dyn SearchProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>) -> Self {
        Self { providers }
    }

    /// Standard order: Google Custom Search, Bing Web Search, then
    /// the DuckDuckGo scrape fallback.
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(vec![
            Arc::new(GoogleCseProvider::new(settings)),
            Arc::new(BingApiProvider::new(settings)),
            Arc::new(DuckDuckGoProvider::new(settings)),
        ])
    }

    pub fn has_configured_provider(&self) -> bool {
        self.providers.iter().any(|p| p.is_configured())
    }

    pub async fn search(&self, query: &str, wanted: u32) -> Result<Vec<SearchHit>, SearchError> {
        let mut tried_any = false;
        for provider in &self.providers {
            if !provider.is_configured() {
                continue;
            }
            tried_any = true;
            match provider.search(query, wanted).await {
                Ok(hits) if !hits.is_empty() => {
                    info!(
                        "provider {} returned {} hits for \"{}\"",
                        provider.name(),
                        hits.len(),
                        query
                    );
                    return Ok(hits);
                }
                Ok(_) => {
                    debug!("provider {} returned no hits for \"{}\"", provider.name(), query);
                }
                Err(e) => {
                    warn!("provider {} failed for \"{}\": {}", provider.name(), query, e);
                }
            }
        }
        if !tried_any {
            return Err(SearchError::NotConfigured);
        }
        Ok(Vec::new())
    }
}
