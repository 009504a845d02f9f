// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::catalog::TermCatalog;

/// Keyword-vote language detection over the catalog's six language
/// profiles. Ties resolve to the first language at the maximum, in
/// profile order.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    profiles: Vec<(String, Vec<String>)>,
}

impl LanguageDetector {
    pub fn new(catalog: &TermCatalog) -> Self {
        Self {
            profiles: catalog.language_profiles().to_vec(),
        }
    }

    /// Detect the dominant language of a text. Returns
    /// "desconocido" when no profile keyword appears at all.
    pub fn detect(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let mut best_lang = "desconocido";
        let mut best_count = 0usize;
        for (lang, words) in &self.profiles {
            let count = words
                .iter()
                .filter(|w| lowered.contains(w.as_str()))
                .count();
            // strictly greater keeps the first language at the max
            if count > best_count {
                best_lang = lang;
                best_count = count;
            }
        }
        best_lang.to_string()
    }
}
