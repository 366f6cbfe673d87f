// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Viewer adapters: show a URL to the user

mod noop;
mod system;

pub use noop::NoOpViewer;
pub use system::SystemViewer;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeViewer;

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;

/// Errors from viewer operations
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("{0}")]
    LaunchFailed(String),
    #[error("{command} exited with {status}")]
    CommandFailed { command: String, status: String },
}

/// Adapter for opening a URL in the user's browser
#[async_trait]
pub trait Viewer: Clone + Send + Sync + 'static {
    async fn show(&self, url: &str) -> Result<(), ViewerError>;
}

/// Run the opener `name args..` and require a successful exit within
/// `timeout`.
///
/// Only the opener's own exit status is awaited. Its output is discarded, so
/// a browser that inherits the opener's stdio cannot hold the launch open,
/// and an opener still running at the timeout is left alone rather than
/// killed.
pub async fn run_system_command(
    name: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<(), ViewerError> {
    let mut child = tokio::process::Command::new(name)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ViewerError::LaunchFailed(format!("{} failed: {}", name, e)))?;

    let status = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => {
            return Err(ViewerError::LaunchFailed(format!("{} failed: {}", name, e)));
        }
        Err(_elapsed) => {
            return Err(ViewerError::LaunchFailed(format!(
                "{} did not exit within {}ms",
                name,
                timeout.as_millis()
            )));
        }
    };
    if status.success() {
        return Ok(());
    }
    Err(ViewerError::CommandFailed {
        command: name.to_string(),
        status: status.to_string(),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
