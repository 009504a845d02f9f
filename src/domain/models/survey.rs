// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::institution::InstitutionRecord;
use crate::domain::models::scorecard::SiteScorecard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scorecard plus its discovery attribution: one entry of the
/// survey result set. The control institution carries no category or
/// search term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub institution: InstitutionRecord,
    /// Category whose search surfaced this site; `None` for the
    /// control institution.
    pub category: Option<Category>,
    /// Query term that surfaced this site; `None` for the control
    /// institution.
    pub search_term: Option<String>,
    pub analyzed_at: DateTime<Utc>,
    pub scorecard: SiteScorecard,
}

impl SurveyRecord {
    pub fn is_control(&self) -> bool {
        self.category.is_none()
    }
}
