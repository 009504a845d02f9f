// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::info;

/// Narrow observer the orchestrator pushes progress events to,
/// keeping it decoupled from any presentation.
pub trait ProgressSink: Send + Sync {
    fn update(&self, step: usize, total: usize, description: &str);
}

/// Sink that reports progress through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn update(&self, step: usize, total: usize, description: &str) {
        info!("[{}/{}] {}", step, total, description);
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&self, _step: usize, _total: usize, _description: &str) {}
}
