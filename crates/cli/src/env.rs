// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

/// Log filter directive: `LP_LOG`, then `RUST_LOG`.
pub fn log_filter() -> Option<String> {
    ["LP_LOG", "RUST_LOG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}
