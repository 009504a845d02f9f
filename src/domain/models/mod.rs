// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Domain models
///
/// Data structures flowing through the pipeline:
/// - category: the three thematic axes
/// - candidate: a filtered search hit awaiting a scan
/// - institution: identity of a surveyed site (name, domain, country)
/// - scorecard: the per-site analysis output
/// - survey: scorecard plus discovery attribution
pub mod candidate;
pub mod category;
pub mod institution;
pub mod scorecard;
pub mod survey;
