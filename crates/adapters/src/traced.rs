// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::fs::{FsAdapter, FsError};
use crate::process::{OutputSubscription, ProcessAdapter, ProcessError};
use crate::viewer::{Viewer, ViewerError};
use async_trait::async_trait;
use lp_core::ProcessId;
use std::path::Path;
use tracing::Instrument;

/// Wrapper that adds tracing to any ProcessAdapter
#[derive(Clone)]
pub struct TracedProcess<P> {
    inner: P,
}

impl<P> TracedProcess<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: ProcessAdapter> ProcessAdapter for TracedProcess<P> {
    async fn spawn(&self, label: &str, cwd: &Path, cmd: &str) -> Result<ProcessId, ProcessError> {
        async {
            tracing::info!(cmd, "starting");
            let start = std::time::Instant::now();
            let result = self.inner.spawn(label, cwd, cmd).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(id) => tracing::info!(process = %id, elapsed_ms, "process spawned"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "spawn failed"),
            }
            result
        }
        .instrument(tracing::info_span!("process.spawn", label, cwd = %cwd.display()))
        .await
    }

    fn subscribe(&self, id: &ProcessId) -> OutputSubscription {
        tracing::debug!(process = %id, "subscribing to output");
        self.inner.subscribe(id)
    }

    async fn wait_closed(&self, id: &ProcessId) -> Result<Option<i32>, ProcessError> {
        let result = self.inner.wait_closed(id).await;
        tracing::info_span!("process.closed", process = %id).in_scope(|| match &result {
            Ok(exit_code) => tracing::info!(exit_code = ?exit_code, "closed"),
            Err(e) => tracing::error!(error = %e, "wait failed"),
        });
        result
    }

    async fn is_alive(&self, id: &ProcessId) -> Result<bool, ProcessError> {
        let result = self.inner.is_alive(id).await;
        tracing::trace!(process = %id, alive = ?result.as_ref().ok(), "checked");
        result
    }

    async fn kill(&self, id: &ProcessId) -> Result<(), ProcessError> {
        let result = self.inner.kill(id).await;
        tracing::info_span!("process.kill", process = %id).in_scope(|| match &result {
            Ok(()) => tracing::info!("killed"),
            Err(e) => tracing::warn!(error = %e, "kill failed"),
        });
        result
    }
}

/// Wrapper that adds tracing to any FsAdapter
#[derive(Clone)]
pub struct TracedFs<F> {
    inner: F,
}

impl<F> TracedFs<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<F: FsAdapter> FsAdapter for TracedFs<F> {
    async fn exists(&self, path: &Path) -> bool {
        let exists = self.inner.exists(path).await;
        tracing::trace!(path = %path.display(), exists, "checked");
        exists
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        let result = self.inner.read_to_string(path).await;
        tracing::info_span!("fs.read", path = %path.display()).in_scope(|| match &result {
            Ok(text) => tracing::debug!(len = text.len(), "read"),
            Err(e) => tracing::warn!(error = %e, "read failed"),
        });
        result
    }
}

/// Wrapper that adds tracing to any Viewer
#[derive(Clone)]
pub struct TracedViewer<V> {
    inner: V,
}

impl<V> TracedViewer<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<V: Viewer> Viewer for TracedViewer<V> {
    async fn show(&self, url: &str) -> Result<(), ViewerError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.show(url).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "shown"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "show failed"),
            }
            result
        }
        .instrument(tracing::info_span!("viewer.show", url))
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
