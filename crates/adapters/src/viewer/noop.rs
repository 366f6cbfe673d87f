// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op viewer.

use super::{Viewer, ViewerError};
use async_trait::async_trait;

/// Viewer that never opens anything.
///
/// Used for `--no-open` and `LP_VIEWER=none`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpViewer;

impl NoOpViewer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Viewer for NoOpViewer {
    async fn show(&self, _url: &str) -> Result<(), ViewerError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
