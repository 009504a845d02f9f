// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Country inference by domain suffix. Unmatched suffixes fall back
/// to "Internacional".
const COUNTRY_SUFFIXES: [(&str, &str); 21] = [
    (".es", "España"),
    (".edu", "Estados Unidos"),
    (".uk", "Reino Unido"),
    (".ca", "Canadá"),
    (".au", "Australia"),
    (".de", "Alemania"),
    (".fr", "Francia"),
    (".it", "Italia"),
    (".br", "Brasil"),
    (".ar", "Argentina"),
    (".mx", "México"),
    (".cl", "Chile"),
    (".co", "Colombia"),
    (".pe", "Perú"),
    (".jp", "Japón"),
    (".cn", "China"),
    (".in", "India"),
    (".nl", "Países Bajos"),
    (".ch", "Suiza"),
    (".se", "Suecia"),
    (".no", "Noruega"),
];

// search-result decorations stripped from display names
static TRAILING_SOURCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|\s.*$").expect("Failed to compile trailing source regex"));
static BREADCRUMB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*›.*$").expect("Failed to compile breadcrumb regex"));

/// Identity of a surveyed site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRecord {
    pub name: String,
    pub url: String,
    pub domain: String,
    pub country: String,
}

impl InstitutionRecord {
    /// Build an institution record from a search hit. Returns `None`
    /// for non-HTTP or host-less URLs.
    pub fn from_search_hit(url: &str, title: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }
        let domain = parsed.host_str()?.to_lowercase();
        let name = clean_display_name(title).unwrap_or_else(|| domain.clone());
        Some(Self {
            name,
            url: url.to_string(),
            domain: domain.clone(),
            country: country_for_domain(&domain).to_string(),
        })
    }

    /// Record for a site known ahead of time, such as the control
    /// institution.
    pub fn known(name: &str, url: &str, country: &str) -> Self {
        let domain = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .unwrap_or_default();
        Self {
            name: name.to_string(),
            url: url.to_string(),
            domain,
            country: country.to_string(),
        }
    }
}

/// Map a domain to a country label by its suffix.
pub fn country_for_domain(domain: &str) -> &'static str {
    if domain.is_empty() {
        return "Desconocido";
    }
    for (suffix, country) in COUNTRY_SUFFIXES {
        if domain.ends_with(suffix) {
            return country;
        }
    }
    "Internacional"
}

/// Strip search-result decoration from a title and cap its length.
/// Returns `None` when nothing usable remains.
pub fn clean_display_name(title: &str) -> Option<String> {
    let decoded = html_escape::decode_html_entities(title);
    let cleaned = TRAILING_SOURCE_RE.replace(decoded.trim(), "");
    let cleaned = BREADCRUMB_RE.replace(&cleaned, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.chars().count() > 100 {
        let capped: String = cleaned.chars().take(100).collect();
        return Some(format!("{}...", capped.trim_end()));
    }
    Some(cleaned.to_string())
}
