// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Viewer command override (`LP_VIEWER`). `none` disables the viewer.
pub fn viewer_command() -> Option<String> {
    std::env::var("LP_VIEWER")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Viewer launch timeout (default: 10s).
pub fn viewer_timeout() -> Duration {
    parse_duration_ms("LP_VIEWER_TIMEOUT_MS").unwrap_or(crate::subprocess::VIEWER_TIMEOUT)
}
