// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake viewer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Viewer, ViewerError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
struct FakeViewerState {
    shown: Vec<String>,
    fail: bool,
}

/// Fake viewer that records every URL it is asked to show
#[derive(Clone, Default)]
pub struct FakeViewer {
    inner: Arc<Mutex<FakeViewerState>>,
}

impl FakeViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `show` calls fail
    pub fn set_failing(&self, fail: bool) {
        self.inner.lock().fail = fail;
    }

    /// URLs shown so far, including ones whose `show` failed
    pub fn shown(&self) -> Vec<String> {
        self.inner.lock().shown.clone()
    }
}

#[async_trait]
impl Viewer for FakeViewer {
    async fn show(&self, url: &str) -> Result<(), ViewerError> {
        let mut inner = self.inner.lock();
        inner.shown.push(url.to_string());
        if inner.fail {
            return Err(ViewerError::LaunchFailed("no browser available".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
