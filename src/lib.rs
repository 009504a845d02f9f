// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Application layer
///
/// Orchestrates the end-to-end survey run, progress reporting and
/// report/export building
pub mod application;

/// Configuration module
///
/// Handles application settings and environment variables
pub mod config;

/// Domain layer
///
/// Core business entities, the term catalog and domain services
pub mod domain;

/// Engines module
///
/// HTTP page fetching with content-type gating and caching
pub mod engines;

/// Infrastructure layer
///
/// External service integrations: search backends and the fetch cache
pub mod infrastructure;

/// Utilities module
///
/// Telemetry bootstrap, URL helpers and text processing
pub mod utils;
