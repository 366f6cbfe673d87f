// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launch configuration

use crate::watch::DEFAULT_URL_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors in launch configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("invalid install completion '{0}' (expected exit-status or closed)")]
    InvalidInstallCompletion(String),
    #[error("invalid value for {var}: '{value}' is not a number of milliseconds")]
    InvalidDuration { var: &'static str, value: String },
}

/// When the install step counts as finished successfully
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallCompletion {
    /// The install process must exit with status 0.
    #[default]
    ExitStatus,
    /// Any closure of the install process counts as done.
    Closed,
}

impl InstallCompletion {
    pub fn as_str(self) -> &'static str {
        match self {
            InstallCompletion::ExitStatus => "exit-status",
            InstallCompletion::Closed => "closed",
        }
    }
}

impl fmt::Display for InstallCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallCompletion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exit-status" | "exit_status" => Ok(InstallCompletion::ExitStatus),
            "closed" => Ok(InstallCompletion::Closed),
            _ => Err(ConfigError::InvalidInstallCompletion(s.to_string())),
        }
    }
}

/// Launch behaviour knobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// How long the server gets to print its URL
    pub url_timeout: Duration,
    /// Upper bound on the install step; `None` waits indefinitely
    pub install_timeout: Option<Duration>,
    pub install_completion: InstallCompletion,
    /// Show the URL in the viewer once found
    pub open_viewer: bool,
    /// Copy child process output to the terminal
    pub echo_output: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            url_timeout: DEFAULT_URL_TIMEOUT,
            install_timeout: None,
            install_completion: InstallCompletion::default(),
            open_viewer: true,
            echo_output: true,
        }
    }
}

impl LaunchConfig {
    /// Defaults overridden by `LP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(timeout) = crate::env::url_timeout()? {
            config.url_timeout = timeout;
        }
        if let Some(timeout) = crate::env::install_timeout()? {
            config.install_timeout = Some(timeout);
        }
        if let Some(completion) = crate::env::install_completion()? {
            config.install_completion = completion;
        }
        if crate::env::no_open() {
            config.open_viewer = false;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("url timeout"));
        }
        if self.install_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroTimeout("install timeout"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
