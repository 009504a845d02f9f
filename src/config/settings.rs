// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
///
/// Covers search backend credentials, fetch behavior, scan limits,
/// the control institution and export output
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Search backend configuration
    pub search: SearchSettings,
    /// Page fetch configuration
    pub fetch: FetchSettings,
    /// Site scan configuration
    pub scan: ScanSettings,
    /// Control institution
    pub control: ControlSettings,
    /// Export configuration
    pub export: ExportSettings,
}

/// Search backend configuration
///
/// Credentials are optional; with none present the unauthenticated
/// scrape fallback carries the run (or, if disabled, search is
/// reported as unavailable)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// Google Custom Search API key
    pub google_api_key: Option<String>,
    /// Google Custom Search engine identifier (cx)
    pub google_engine_id: Option<String>,
    /// Bing Web Search subscription key
    pub bing_subscription_key: Option<String>,
    /// Allow the DuckDuckGo HTML scrape when no API is configured
    pub enable_scrape_fallback: bool,
    /// Results requested per search query
    pub results_per_query: u32,
    /// Query terms taken per category
    pub max_query_terms: usize,
    /// Pagination cap per query
    pub max_pages: u32,
    /// Courtesy delay between requests to the same backend (ms)
    pub request_delay_ms: u64,
}

/// Page fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
    /// Accept-Language header sent with every fetch
    pub accept_language: String,
    /// Fetch cache time-to-live (seconds)
    pub cache_ttl_secs: u64,
    /// Courtesy delay between fetches against the same site (ms)
    pub politeness_delay_ms: u64,
}

/// Site scan configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSettings {
    /// Relevant links followed per site
    pub follow_links: usize,
    /// Candidate links collected before the follow cut
    pub link_limit: usize,
}

/// Control institution settings
#[derive(Debug, Clone, Deserialize)]
pub struct ControlSettings {
    /// Display name
    pub name: String,
    /// Root URL
    pub url: String,
    /// Country label used in the report
    pub country: String,
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    /// Directory where report files are written
    pub output_dir: String,
}

impl Settings {
    /// Load settings from defaults, optional config files and
    /// `RELEVADOR__`-prefixed environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default search settings
            .set_default("search.enable_scrape_fallback", true)?
            .set_default("search.results_per_query", 10)?
            .set_default("search.max_query_terms", 5)?
            .set_default("search.max_pages", 3)?
            .set_default("search.request_delay_ms", 1500)?
            // Default fetch settings
            .set_default("fetch.timeout_secs", 15)?
            .set_default("fetch.accept_language", "es-ES,es;q=0.9,en;q=0.8,ca;q=0.7")?
            .set_default("fetch.cache_ttl_secs", 86_400)?
            .set_default("fetch.politeness_delay_ms", 1000)?
            // Default scan settings
            .set_default("scan.follow_links", 3)?
            .set_default("scan.link_limit", 15)?
            // Control institution (Universitat Jaume I)
            .set_default("control.name", "Universitat Jaume I")?
            .set_default("control.url", "https://www.uji.es")?
            .set_default("control.country", "España")?
            // Default export settings
            .set_default("export.output_dir", "./informes")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("RELEVADOR").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
