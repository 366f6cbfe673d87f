// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the launcher

use crate::watch::WatchError;
use lp_adapters::{FsError, ProcessError};
use lp_core::{FailureReason, ManifestError};
use std::time::Duration;
use thiserror::Error;

/// Everything that can stop a launch
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no workspace")]
    NoWorkspace,
    #[error("no manifest")]
    NoManifest,
    #[error("no run script")]
    NoRunScript,
    #[error("install failed: {0}")]
    InstallFailed(String),
    #[error("no url within {}ms", .0.as_millis())]
    UrlTimeout(Duration),
    #[error("server exited with {0:?}")]
    ServerExited(Option<i32>),
    #[error("cancelled")]
    Cancelled,
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Watch(#[from] WatchError),
}

impl From<LaunchError> for FailureReason {
    fn from(e: LaunchError) -> Self {
        match e {
            LaunchError::NoWorkspace => FailureReason::NoWorkspace,
            LaunchError::NoManifest => FailureReason::NoManifest,
            LaunchError::NoRunScript => FailureReason::NoRunScript,
            LaunchError::InstallFailed(detail) => FailureReason::InstallFailed { detail },
            LaunchError::UrlTimeout(timeout) => FailureReason::UrlDetectionTimeout {
                timeout_ms: timeout.as_millis() as u64,
            },
            LaunchError::ServerExited(exit_code) => FailureReason::ServerExited { exit_code },
            LaunchError::Cancelled => FailureReason::Cancelled,
            other @ (LaunchError::Manifest(_)
            | LaunchError::Fs(_)
            | LaunchError::Process(_)
            | LaunchError::Watch(_)) => FailureReason::UnexpectedError {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
