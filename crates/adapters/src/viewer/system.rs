// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Viewer that opens URLs with the platform's default handler.
//!
//! `LP_VIEWER` replaces the platform opener with another program, invoked as
//! `<program> <url>`. Setting it to `none` disables opening entirely.

use super::{run_system_command, Viewer, ViewerError};
use async_trait::async_trait;
use std::time::Duration;

const DISABLED: &str = "none";

#[derive(Clone, Debug)]
pub struct SystemViewer {
    command: Option<String>,
    timeout: Duration,
}

impl Default for SystemViewer {
    fn default() -> Self {
        Self::from_env()
    }
}

impl SystemViewer {
    pub fn from_env() -> Self {
        Self {
            command: crate::env::viewer_command(),
            timeout: crate::env::viewer_timeout(),
        }
    }

    /// Use `command` instead of the platform opener.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.command
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(DISABLED))
    }
}

#[async_trait]
impl Viewer for SystemViewer {
    async fn show(&self, url: &str) -> Result<(), ViewerError> {
        if self.is_disabled() {
            tracing::debug!(url, "viewer disabled");
            return Ok(());
        }
        match &self.command {
            Some(command) => run_system_command(command, &[url], self.timeout).await,
            None => open_default(url, self.timeout).await,
        }
    }
}

async fn open_default(url: &str, timeout: Duration) -> Result<(), ViewerError> {
    let (program, args) = default_opener(url);
    run_system_command(program, &args, timeout).await
}

/// Program and arguments that hand `url` to the platform's default handler.
///
/// The URL is always passed as its own argument and never through a shell,
/// so characters such as `&` in a query string reach the handler intact.
#[cfg(target_os = "macos")]
fn default_opener(url: &str) -> (&'static str, Vec<&str>) {
    ("open", vec![url])
}

#[cfg(windows)]
fn default_opener(url: &str) -> (&'static str, Vec<&str>) {
    ("rundll32", vec!["url.dll,FileProtocolHandler", url])
}

#[cfg(not(any(target_os = "macos", windows)))]
fn default_opener(url: &str) -> (&'static str, Vec<&str>) {
    ("xdg-open", vec![url])
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
