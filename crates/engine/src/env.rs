// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use crate::config::{ConfigError, InstallCompletion};
use std::time::Duration;

fn parse_duration_ms(var: &'static str) -> Result<Option<Duration>, ConfigError> {
    let Ok(value) = std::env::var(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<u64>()
        .map(|ms| Some(Duration::from_millis(ms)))
        .map_err(|_| ConfigError::InvalidDuration { var, value })
}

/// URL detection timeout (`LP_URL_TIMEOUT_MS`).
pub fn url_timeout() -> Result<Option<Duration>, ConfigError> {
    parse_duration_ms("LP_URL_TIMEOUT_MS")
}

/// Install step timeout (`LP_INSTALL_TIMEOUT_MS`).
pub fn install_timeout() -> Result<Option<Duration>, ConfigError> {
    parse_duration_ms("LP_INSTALL_TIMEOUT_MS")
}

/// Install completion policy (`LP_INSTALL_COMPLETION`).
pub fn install_completion() -> Result<Option<InstallCompletion>, ConfigError> {
    std::env::var("LP_INSTALL_COMPLETION")
        .ok()
        .map(|s| s.parse())
        .transpose()
}

/// Whether `LP_NO_OPEN=1` disables the viewer.
pub fn no_open() -> bool {
    std::env::var("LP_NO_OPEN").is_ok_and(|v| v == "1")
}
