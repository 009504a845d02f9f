// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

// script/style bodies carry no prose and would pollute term matching
static NON_CONTENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?si)<(script|style|noscript)[^>]*>.*?</(script|style|noscript)>")
        .expect("Failed to compile non-content regex")
});

/// Extract the visible text of an HTML document as a single
/// whitespace-collapsed string. Entities are decoded by the parser.
pub fn html_to_text(html: &str) -> String {
    let stripped = NON_CONTENT_RE.replace_all(html, " ");
    let document = Html::parse_document(&stripped);
    let text: Vec<&str> = document.root_element().text().collect();
    collapse_whitespace(&text.join(" "))
}

/// Collapse runs of whitespace (including newlines and tabs) into
/// single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Take the first `limit` characters of a string, respecting char
/// boundaries.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
