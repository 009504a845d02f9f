// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SearchError {
    #[error("Search provider error: {0}")]
    ProviderError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Provider not configured")]
    NotConfigured,
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// A single result returned by a search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub snippet: Option<String>,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a search query, returning up to `wanted` hits.
    /// Providers paginate internally; a failed page ends pagination
    /// for the query.
    async fn search(&self, query: &str, wanted: u32) -> Result<Vec<SearchHit>, SearchError>;

    /// Whether the provider has the credentials it needs to run.
    fn is_configured(&self) -> bool;

    /// Name of the backend.
    fn name(&self) -> &'static str;
}
