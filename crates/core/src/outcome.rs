// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal results of a watch session and of a whole launch.

use crate::manifest::MANIFEST_FILE;
use crate::process::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a watch session ended. Produced exactly once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// A URL was seen in the process output
    Found { url: String },
    /// The deadline elapsed first
    TimedOut,
    /// The caller withdrew the request
    Cancelled,
    /// The process closed before printing a URL
    Exited { exit_code: Option<i32> },
}

impl ExtractionResult {
    pub fn found(url: impl Into<String>) -> Self {
        ExtractionResult::Found { url: url.into() }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ExtractionResult::Found { url } => Some(url),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionResult::Found { url } => write!(f, "found {}", url),
            ExtractionResult::TimedOut => write!(f, "timed out"),
            ExtractionResult::Cancelled => write!(f, "cancelled"),
            ExtractionResult::Exited {
                exit_code: Some(code),
            } => write!(f, "exited with code {}", code),
            ExtractionResult::Exited { exit_code: None } => write!(f, "exited"),
        }
    }
}

/// Categorized reasons a launch did not produce a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// No project root to work in
    NoWorkspace,
    /// The project has no manifest
    NoManifest,
    /// The manifest declares neither a `dev` nor a `start` script
    NoRunScript,
    /// Installing dependencies did not succeed
    InstallFailed { detail: String },
    /// The server never printed a URL before the deadline
    UrlDetectionTimeout { timeout_ms: u64 },
    /// The server process ended before printing a URL
    ServerExited { exit_code: Option<i32> },
    /// The caller withdrew the request
    Cancelled,
    /// Any other collaborator fault (I/O, malformed manifest, spawn failure)
    UnexpectedError { message: String },
}

impl FailureReason {
    /// Short category name, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            FailureReason::NoWorkspace => "no_workspace",
            FailureReason::NoManifest => "no_manifest",
            FailureReason::NoRunScript => "no_run_script",
            FailureReason::InstallFailed { .. } => "install_failed",
            FailureReason::UrlDetectionTimeout { .. } => "url_detection_timeout",
            FailureReason::ServerExited { .. } => "server_exited",
            FailureReason::Cancelled => "cancelled",
            FailureReason::UnexpectedError { .. } => "unexpected_error",
        }
    }

    /// Expected outcomes that are not faults of the tool itself.
    pub fn is_expected(&self) -> bool {
        !matches!(self, FailureReason::UnexpectedError { .. })
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoWorkspace => write!(f, "No workspace folder is open."),
            FailureReason::NoManifest => write!(f, "No {} found in the workspace.", MANIFEST_FILE),
            FailureReason::NoRunScript => {
                write!(f, "No \"dev\" or \"start\" script found in {}.", MANIFEST_FILE)
            }
            FailureReason::InstallFailed { detail } => {
                write!(f, "Installing dependencies failed: {}", detail)
            }
            FailureReason::UrlDetectionTimeout { timeout_ms } => write!(
                f,
                "Could not determine the server URL within {}.",
                format_timeout(*timeout_ms)
            ),
            FailureReason::ServerExited {
                exit_code: Some(code),
            } => write!(
                f,
                "The development server exited with code {} before printing a URL.",
                code
            ),
            FailureReason::ServerExited { exit_code: None } => {
                write!(f, "The development server exited before printing a URL.")
            }
            FailureReason::Cancelled => write!(f, "Cancelled."),
            FailureReason::UnexpectedError { message } => {
                write!(f, "An error occurred: {}", message)
            }
        }
    }
}

fn format_timeout(ms: u64) -> String {
    if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{}ms", ms)
    }
}

/// The single terminal value of one launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LaunchOutcome {
    /// The server is running and listening at `url`
    Done { url: String, server: ProcessId },
    Failed { reason: FailureReason },
}

impl LaunchOutcome {
    pub fn failed(reason: FailureReason) -> Self {
        LaunchOutcome::Failed { reason }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            LaunchOutcome::Done { url, .. } => Some(url),
            LaunchOutcome::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            LaunchOutcome::Done { .. } => None,
            LaunchOutcome::Failed { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
