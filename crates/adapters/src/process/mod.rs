// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process adapters: spawn commands and observe their output

mod channel;
mod local;

pub use channel::{OutputChannel, OutputSubscription};
pub use local::LocalProcessAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProcess, FakeProcessAdapter, ProcessCall};

use async_trait::async_trait;
use lp_core::ProcessId;
use std::path::Path;
use thiserror::Error;

/// Errors from process operations
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("process not found: {0}")]
    NotFound(ProcessId),
    #[error("spawn failed: {0}")]
    SpawnFailed(String),
    #[error("kill failed: {0}")]
    KillFailed(String),
}

/// Adapter for spawning long-running commands and watching what they print.
///
/// Output from every process goes to one shared channel; subscribers only
/// see the events of the process they subscribed to.
#[async_trait]
pub trait ProcessAdapter: Clone + Send + Sync + 'static {
    /// Spawn `cmd` through the shell in `cwd`. `label` names the process in
    /// logs and ids.
    async fn spawn(&self, label: &str, cwd: &Path, cmd: &str) -> Result<ProcessId, ProcessError>;

    /// Subscribe to the output of `id`.
    ///
    /// Output the process wrote before the call is replayed first, so a
    /// subscriber that attaches right after `spawn` misses nothing.
    fn subscribe(&self, id: &ProcessId) -> OutputSubscription;

    /// Resolve once the process has closed, with its exit code when known.
    ///
    /// May be awaited any number of times, before or after closure.
    async fn wait_closed(&self, id: &ProcessId) -> Result<Option<i32>, ProcessError>;

    /// Check if the process is still running
    async fn is_alive(&self, id: &ProcessId) -> Result<bool, ProcessError>;

    /// Terminate the process. Killing a closed process is a no-op.
    async fn kill(&self, id: &ProcessId) -> Result<(), ProcessError>;
}
