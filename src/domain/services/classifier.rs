// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

// URL shapes that identify an institution outright
static INSTITUTIONAL_URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\.edu($|/|\.)",
        r"\.ac\.",
        r"university",
        r"universidad",
        r"universitat",
        r"universidade",
        r"université",
        r"università",
        r"college",
        r"instituto",
        r"institute",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Failed to compile institutional URL pattern"))
    .collect()
});

/// Substrings that disqualify a URL no matter what else it matches:
/// ranking aggregators, wikis, archive mirrors, blog and social
/// platforms, directory sites.
const BLOCKED_SUBSTRINGS: &[&str] = &[
    "ranking",
    "wiki",
    "blog",
    "archive.org",
    "webometrics",
    "topuniversities",
    "timeshighereducation",
    "usnews.com",
    "studyportal",
    "mastersportal",
    "directory",
    "facebook.com",
    "twitter.com",
    "youtube.com",
    "linkedin.com",
    "instagram.com",
];

const TITLE_KEYWORDS: &[&str] = &[
    "university",
    "universidad",
    "universitat",
    "universidade",
    "université",
    "università",
    "college",
    "instituto",
    "school",
];

const TITLE_DISQUALIFIERS: &[&str] = &["ranking", "list", "directory", "top"];

/// Decides whether a (url, title) search hit denotes a university
/// site. Fails closed on malformed input; the blocklist wins over
/// every positive signal.
#[derive(Debug, Clone, Default)]
pub struct SiteClassifier;

impl SiteClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn is_university(&self, url: &str, title: &str) -> bool {
        if url.trim().is_empty() {
            return false;
        }
        let url_lower = url.to_lowercase();
        let parsed = match Url::parse(&url_lower) {
            Ok(u) => u,
            Err(_) => return false,
        };
        let host = match parsed.host_str() {
            Some(h) => h,
            None => return false,
        };

        if BLOCKED_SUBSTRINGS.iter().any(|b| url_lower.contains(b)) {
            return false;
        }

        // hosts like uni.lu or univ.xyz carry the signal in the
        // prefix alone
        if host.starts_with("uni.") || host.starts_with("univ.") {
            return true;
        }

        if INSTITUTIONAL_URL_PATTERNS
            .iter()
            .any(|re| re.is_match(&url_lower))
        {
            return true;
        }

        let title_lower = title.to_lowercase();
        if !title_lower.is_empty()
            && TITLE_KEYWORDS.iter().any(|k| title_lower.contains(k))
            && !TITLE_DISQUALIFIERS.iter().any(|d| title_lower.contains(d))
        {
            return true;
        }

        false
    }
}
