// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use serde::{Deserialize, Serialize};

/// A search hit that passed the university classifier but has not
/// been scanned yet. One candidate survives per domain within a
/// category's search round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub url: String,
    pub title: String,
    pub category: Category,
    /// The query term that surfaced this hit.
    pub matched_term: String,
}
