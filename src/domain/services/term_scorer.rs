// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::catalog::TermCatalog;
use crate::domain::models::category::Category;
use crate::domain::models::scorecard::{CategoryResult, TermHit};
use crate::utils::text::{collapse_whitespace, truncate_chars};
use std::collections::{HashMap, HashSet};

/// Characters kept on each side of a match.
const CONTEXT_WINDOW: usize = 120;
/// Cap on the collapsed context string.
const CONTEXT_CAP: usize = 240;

/// Scans accumulated site text for each category's validation terms.
/// Matching is case-insensitive, first-occurrence-only per term, in
/// catalog order.
#[derive(Debug, Clone, Default)]
pub struct TermScorer;

impl TermScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a text against all categories of the catalog.
    pub fn score_categories(
        &self,
        text: &str,
        catalog: &TermCatalog,
    ) -> HashMap<Category, CategoryResult> {
        let lowered = text.to_lowercase();
        Category::ALL
            .iter()
            .map(|c| (*c, self.score_terms(&lowered, catalog.validation_terms(*c))))
            .collect()
    }

    /// Score a lower-cased text against one ordered term list. The
    /// catalog repeats a few terms across languages; a term is only
    /// ever reported once.
    fn score_terms(&self, lowered: &str, terms: &[String]) -> CategoryResult {
        let mut hits = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for term in terms {
            let needle = term.to_lowercase();
            if needle.is_empty() || !seen.insert(needle.clone()) {
                continue;
            }
            if let Some(pos) = lowered.find(&needle) {
                hits.push(TermHit {
                    term: term.clone(),
                    context: extract_context(lowered, pos, needle.len()),
                });
            }
        }
        CategoryResult::from_hits(hits)
    }
}

/// Context window around a match: up to CONTEXT_WINDOW chars on each
/// side, whitespace collapsed, capped at CONTEXT_CAP chars.
fn extract_context(text: &str, pos: usize, match_len: usize) -> String {
    let start = floor_char_boundary(text, pos.saturating_sub(CONTEXT_WINDOW));
    let end = ceil_char_boundary(text, (pos + match_len + CONTEXT_WINDOW).min(text.len()));
    truncate_chars(&collapse_whitespace(&text[start..end]), CONTEXT_CAP)
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
