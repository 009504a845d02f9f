// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::http_fetcher::PageFetch;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Time-bounded fetch cache keyed by URL. Entries older than the TTL
/// are evicted lazily on lookup. Caching is a courtesy toward target
/// sites during link-following, not a correctness requirement.
pub struct FetchCache {
    entries: DashMap<String, (PageFetch, Instant)>,
    ttl: Duration,
}

impl FetchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, url: &str) -> Option<PageFetch> {
        if let Some(entry) = self.entries.get(url) {
            if entry.1.elapsed() < self.ttl {
                return Some(entry.0.clone());
            }
        }
        // expired or missing; drop a stale entry if there was one
        self.entries.remove(url);
        None
    }

    pub fn put(&self, url: &str, outcome: PageFetch) {
        self.entries.insert(url.to_string(), (outcome, Instant::now()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
