// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A matched validation term with the text surrounding its first
/// occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermHit {
    pub term: String,
    /// Whitespace-collapsed window around the match, capped at 240
    /// characters.
    pub context: String,
}

/// Scoring outcome for one category on one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub found: bool,
    /// Count of distinct matched terms, not occurrences.
    pub score: u32,
    pub hits: Vec<TermHit>,
}

impl CategoryResult {
    pub fn empty() -> Self {
        Self {
            found: false,
            score: 0,
            hits: Vec::new(),
        }
    }

    /// Build a result from scored hits; `found` and `score` are
    /// derived so they cannot drift apart.
    pub fn from_hits(hits: Vec<TermHit>) -> Self {
        let score = hits.len() as u32;
        Self {
            found: score > 0,
            score,
            hits,
        }
    }

    pub fn matched_terms(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.term.as_str()).collect()
    }
}

/// The complete analysis record for one site. Created fresh per scan
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteScorecard {
    pub url: String,
    pub accessible: bool,
    pub detected_language: String,
    /// First ~500 characters of the cleaned primary page text.
    pub sample_content: String,
    /// Primary URL plus every followed link that contributed text.
    /// Empty exactly when the site was inaccessible.
    pub analyzed_urls: Vec<String>,
    pub categories: HashMap<Category, CategoryResult>,
}

impl SiteScorecard {
    /// Scorecard for a site whose primary fetch failed: no scores, no
    /// sample, no analyzed URLs.
    pub fn inaccessible(url: &str) -> Self {
        Self {
            url: url.to_string(),
            accessible: false,
            detected_language: String::new(),
            sample_content: String::new(),
            analyzed_urls: Vec::new(),
            categories: Category::ALL
                .iter()
                .map(|c| (*c, CategoryResult::empty()))
                .collect(),
        }
    }

    pub fn category(&self, category: Category) -> &CategoryResult {
        // every constructor fills all three categories
        &self.categories[&category]
    }

    /// Whether no category matched anything. Drives the reinforcement
    /// search on the control institution.
    pub fn all_scores_zero(&self) -> bool {
        Category::ALL.iter().all(|c| self.category(*c).score == 0)
    }
}
