// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Domain layer
///
/// Core business logic of the survey pipeline:
/// - models: categories, candidates, scorecards and survey records
/// - catalog: the immutable multilingual term catalog
/// - search: the search provider abstraction
/// - services: classifier, language detection, term scoring and
///   the per-site scanner
pub mod catalog;
pub mod models;
pub mod search;
pub mod services;
