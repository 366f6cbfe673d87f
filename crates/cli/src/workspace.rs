// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project root resolution.

use lp_core::MANIFEST_FILE;
use std::path::{Path, PathBuf};

/// Nearest ancestor of `start` (inclusive) holding a `package.json`,
/// or `start` itself when there is none.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(MANIFEST_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}

/// Project root for `--dir`, or for the current directory.
///
/// `None` when there is no directory to start from at all.
pub fn resolve(dir: Option<&Path>) -> Option<PathBuf> {
    let start = match dir {
        Some(dir) => std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf()),
        None => std::env::current_dir().ok()?,
    };
    Some(find_project_root(&start))
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
