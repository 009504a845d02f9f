// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::progress::ProgressSink;
use crate::config::settings::{ControlSettings, Settings};
use crate::domain::catalog::TermCatalog;
use crate::domain::models::candidate::Candidate;
use crate::domain::models::category::Category;
use crate::domain::models::institution::InstitutionRecord;
use crate::domain::models::scorecard::SiteScorecard;
use crate::domain::models::survey::SurveyRecord;
use crate::domain::services::classifier::SiteClassifier;
use crate::domain::services::scanner::SiteScanner;
use crate::domain::services::term_scorer::TermScorer;
use crate::engines::http_fetcher::HttpFetcher;
use crate::infrastructure::search::ProviderChain;
use crate::utils::text::html_to_text;
use crate::utils::url_utils::host_of;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Hits requested per site-restricted reinforcement query.
const REINFORCEMENT_HITS: u32 = 5;

#[derive(Debug, Error)]
pub enum RelevamientoError {
    #[error(
        "no search backend is configured; set Google or Bing credentials or enable the scrape fallback"
    )]
    SearchUnavailable,
}

/// Cooperative cancellation flag, checked between site scans. A
/// cancelled run finishes the scan in flight and returns the records
/// accumulated so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run parameters of the orchestrator, split from `Settings` so
/// tests can build a run without the full configuration machinery.
#[derive(Debug, Clone)]
pub struct RelevamientoConfig {
    pub control: ControlSettings,
    pub results_per_query: u32,
    pub max_query_terms: usize,
    pub follow_links: usize,
    pub link_limit: usize,
    /// Courtesy delay between search queries.
    pub query_delay: Duration,
    /// Courtesy delay between fetches against target sites.
    pub politeness_delay: Duration,
}

impl RelevamientoConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            control: settings.control.clone(),
            results_per_query: settings.search.results_per_query,
            max_query_terms: settings.search.max_query_terms,
            follow_links: settings.scan.follow_links,
            link_limit: settings.scan.link_limit,
            query_delay: Duration::from_millis(settings.search.request_delay_ms),
            politeness_delay: Duration::from_millis(settings.fetch.politeness_delay_ms),
        }
    }
}

/// End-to-end survey orchestrator: scans the control institution,
/// then for each category searches, filters, deduplicates by domain
/// and scans every surviving candidate. Strictly sequential; every
/// external call is followed by a courtesy delay.
pub struct Relevamiento {
    config: RelevamientoConfig,
    catalog: Arc<TermCatalog>,
    classifier: SiteClassifier,
    fetcher: Arc<HttpFetcher>,
    scanner: SiteScanner,
    search: ProviderChain,
    scorer: TermScorer,
    cancel: CancelToken,
}

impl Relevamiento {
    pub fn new(settings: &Settings) -> Self {
        let catalog = Arc::new(TermCatalog::builtin());
        let fetcher = Arc::new(HttpFetcher::new(&settings.fetch));
        let search = ProviderChain::from_settings(&settings.search);
        Self::with_components(
            RelevamientoConfig::from_settings(settings),
            catalog,
            fetcher,
            search,
        )
    }

    /// Build an orchestrator from pre-built components. The scanner
    /// shares the fetcher (and thereby its cache).
    pub fn with_components(
        config: RelevamientoConfig,
        catalog: Arc<TermCatalog>,
        fetcher: Arc<HttpFetcher>,
        search: ProviderChain,
    ) -> Self {
        let scanner = SiteScanner::new(
            fetcher.clone(),
            catalog.clone(),
            config.link_limit,
            config.politeness_delay,
        );
        Self {
            config,
            catalog,
            classifier: SiteClassifier::new(),
            fetcher,
            scanner,
            search,
            scorer: TermScorer::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Token to abort the run between site scans.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run the complete survey. The control institution is always
    /// the first record; within a category, records follow candidate
    /// discovery order.
    pub async fn run(
        &self,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<SurveyRecord>, RelevamientoError> {
        if !self.search.has_configured_provider() {
            return Err(RelevamientoError::SearchUnavailable);
        }

        let total = Category::ALL.len() + 1;
        let mut records: Vec<SurveyRecord> = Vec::new();

        progress.update(0, total, "Analizando universidad de control");
        records.push(self.scan_control().await);

        for (index, category) in Category::ALL.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!("run cancelled; returning {} records", records.len());
                return Ok(records);
            }
            progress.update(
                index + 1,
                total,
                &format!("Buscando universidades: {}", category.label()),
            );
            let candidates = self.discover_candidates(*category).await;
            info!("{} candidates found for {}", candidates.len(), category);

            for candidate in candidates {
                if self.cancel.is_cancelled() {
                    warn!("run cancelled; returning {} records", records.len());
                    return Ok(records);
                }
                let scorecard = self
                    .scanner
                    .scan(&candidate.url, self.config.follow_links)
                    .await;
                records.push(self.attribute(candidate, scorecard));
                tokio::time::sleep(self.config.politeness_delay).await;
            }
        }

        progress.update(total, total, "Relevamiento completado");
        Ok(records)
    }

    fn attribute(&self, candidate: Candidate, scorecard: SiteScorecard) -> SurveyRecord {
        let institution = InstitutionRecord::from_search_hit(&candidate.url, &candidate.title)
            .unwrap_or_else(|| {
                InstitutionRecord::known(&candidate.title, &candidate.url, "Desconocido")
            });
        SurveyRecord {
            institution,
            category: Some(candidate.category),
            search_term: Some(candidate.matched_term),
            analyzed_at: Utc::now(),
            scorecard,
        }
    }

    async fn scan_control(&self) -> SurveyRecord {
        let control = &self.config.control;
        info!("scanning control institution {}", control.url);
        let mut scorecard = self
            .scanner
            .scan(&control.url, self.config.follow_links)
            .await;
        if scorecard.accessible && scorecard.all_scores_zero() {
            info!("control scan matched nothing; running reinforcement search");
            scorecard = self.reinforce(scorecard).await;
        }
        SurveyRecord {
            institution: InstitutionRecord::known(&control.name, &control.url, &control.country),
            category: None,
            search_term: None,
            analyzed_at: Utc::now(),
            scorecard,
        }
    }

    /// Site-restricted fallback search for the control institution.
    /// Stops at the first same-domain hit whose text scores nonzero.
    async fn reinforce(&self, mut scorecard: SiteScorecard) -> SiteScorecard {
        let domain = match host_of(&scorecard.url) {
            Some(d) => d,
            None => return scorecard,
        };
        for term in self.catalog.reinforcement_terms() {
            if self.cancel.is_cancelled() {
                break;
            }
            let query = format!("site:{} {}", domain, term);
            let hits = match self.search.search(&query, REINFORCEMENT_HITS).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("reinforcement search failed: {}", e);
                    break;
                }
            };
            for hit in hits {
                if host_of(&hit.url).as_deref() != Some(domain.as_str()) {
                    continue;
                }
                tokio::time::sleep(self.config.politeness_delay).await;
                let page = self.fetcher.fetch(&hit.url).await;
                if page.status != 200 || page.text.is_empty() {
                    continue;
                }
                let text = html_to_text(&page.text);
                let categories = self.scorer.score_categories(&text, &self.catalog);
                if categories.values().any(|r| r.score > 0) {
                    info!("reinforcement hit {} produced matches", hit.url);
                    scorecard.analyzed_urls.push(hit.url);
                    scorecard.categories = categories;
                    return scorecard;
                }
            }
            tokio::time::sleep(self.config.query_delay).await;
        }
        scorecard
    }

    /// Search a category's query terms, keep hits the classifier
    /// accepts and deduplicate by domain across the whole category.
    async fn discover_candidates(&self, category: Category) -> Vec<Candidate> {
        let mut seen_domains: HashSet<String> = HashSet::new();
        let mut candidates = Vec::new();

        let terms = self.catalog.query_terms(category);
        for term in terms.iter().take(self.config.max_query_terms) {
            if self.cancel.is_cancelled() {
                break;
            }
            let hits = match self.search.search(term, self.config.results_per_query).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("search failed for \"{}\": {}", term, e);
                    continue;
                }
            };
            for hit in hits {
                if !self.classifier.is_university(&hit.url, &hit.title) {
                    continue;
                }
                let domain = match host_of(&hit.url) {
                    Some(d) => d,
                    None => continue,
                };
                if !seen_domains.insert(domain) {
                    continue;
                }
                candidates.push(Candidate {
                    url: hit.url,
                    title: hit.title,
                    category,
                    matched_term: term.clone(),
                });
            }
            tokio::time::sleep(self.config.query_delay).await;
        }
        candidates
    }
}
