// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::catalog::TermCatalog;
use crate::domain::services::language::LanguageDetector;
use crate::domain::services::term_scorer::TermScorer;
use crate::domain::models::scorecard::SiteScorecard;
use crate::engines::http_fetcher::HttpFetcher;
use crate::utils::text::{html_to_text, truncate_chars};
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Characters kept as the content sample of the primary page.
const SAMPLE_LEN: usize = 500;

/// Scans one site: fetch the primary page, follow a handful of
/// relevant same-domain links, accumulate text and score it against
/// every category. A failed primary fetch ends the scan immediately;
/// failed followed links are skipped.
pub struct SiteScanner {
    fetcher: Arc<HttpFetcher>,
    catalog: Arc<TermCatalog>,
    scorer: TermScorer,
    language: LanguageDetector,
    link_limit: usize,
    politeness_delay: Duration,
}

impl SiteScanner {
    pub fn new(
        fetcher: Arc<HttpFetcher>,
        catalog: Arc<TermCatalog>,
        link_limit: usize,
        politeness_delay: Duration,
    ) -> Self {
        let language = LanguageDetector::new(&catalog);
        Self {
            fetcher,
            catalog,
            scorer: TermScorer::new(),
            language,
            link_limit,
            politeness_delay,
        }
    }

    pub async fn scan(&self, url: &str, follow_links: usize) -> SiteScorecard {
        let page = self.fetcher.fetch(url).await;
        if page.status != 200 || page.text.is_empty() {
            debug!("primary fetch failed for {} (status {})", url, page.status);
            return SiteScorecard::inaccessible(url);
        }

        let primary_text = html_to_text(&page.text);
        let sample_content = truncate_chars(&primary_text, SAMPLE_LEN);
        let detected_language = self.language.detect(&primary_text);

        let links = find_relevant_links(url, &page.text, self.catalog.link_keywords(), self.link_limit);
        let mut analyzed_urls = vec![url.to_string()];
        let mut corpus = primary_text;

        for link in links.into_iter().take(follow_links) {
            tokio::time::sleep(self.politeness_delay).await;
            let extra = self.fetcher.fetch(&link).await;
            if extra.status != 200 || extra.text.is_empty() {
                debug!("skipping followed link {} (status {})", link, extra.status);
                continue;
            }
            corpus.push(' ');
            corpus.push_str(&html_to_text(&extra.text));
            analyzed_urls.push(link);
        }

        let categories = self.scorer.score_categories(&corpus, &self.catalog);

        SiteScorecard {
            url: url.to_string(),
            accessible: true,
            detected_language,
            sample_content,
            analyzed_urls,
            categories,
        }
    }
}

/// Extract same-host links whose href or anchor text contains a
/// relevance keyword. Relative hrefs are resolved against the base
/// URL; duplicates are dropped; at most `limit` links are returned.
pub fn find_relevant_links(
    base_url: &str,
    html: &str,
    keywords: &[String],
    limit: usize,
) -> Vec<String> {
    let base = match Url::parse(base_url) {
        Ok(b) => b,
        Err(_) => return Vec::new(),
    };
    let base_host = match base.host_str() {
        Some(h) => h.to_string(),
        None => return Vec::new(),
    };

    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("Failed to parse anchor selector");

    let mut links: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        if links.len() >= limit {
            break;
        }
        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };
        let href_lower = href.to_lowercase();
        let anchor_text = element.text().collect::<String>().to_lowercase();
        let relevant = keywords
            .iter()
            .any(|k| href_lower.contains(k.as_str()) || anchor_text.contains(k.as_str()));
        if !relevant {
            continue;
        }
        let resolved = match base.join(href) {
            Ok(u) => u,
            Err(_) => continue,
        };
        if resolved.host_str() != Some(base_host.as_str()) {
            continue;
        }
        let absolute = resolved.to_string();
        if absolute == base_url {
            continue;
        }
        if !links.contains(&absolute) {
            links.push(absolute);
        }
    }
    links
}
