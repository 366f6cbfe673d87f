// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem adapters

mod local;

pub use local::LocalFs;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeFs, FsCall};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from filesystem operations
#[derive(Debug, Error)]
pub enum FsError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Adapter for the few filesystem lookups the launcher makes
#[async_trait]
pub trait FsAdapter: Clone + Send + Sync + 'static {
    /// Whether a file or directory exists at `path`.
    ///
    /// Permission errors and other lookup faults count as "does not exist".
    async fn exists(&self, path: &Path) -> bool;

    /// Read a UTF-8 text file
    async fn read_to_string(&self, path: &Path) -> Result<String, FsError>;
}
