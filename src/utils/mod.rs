// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Utilities module
///
/// Shared helpers: telemetry bootstrap, URL resolution and
/// HTML-to-text processing
pub mod telemetry;
pub mod text;
pub mod url_utils;
