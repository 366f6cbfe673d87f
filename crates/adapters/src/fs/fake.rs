// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake filesystem adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FsAdapter, FsError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Recorded filesystem call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    Exists { path: PathBuf },
    Read { path: PathBuf },
}

#[derive(Debug, Clone)]
enum Entry {
    File(String),
    Dir,
}

#[derive(Default)]
struct FakeFsState {
    entries: HashMap<PathBuf, Entry>,
    unreadable: HashSet<PathBuf>,
    calls: Vec<FsCall>,
}

/// In-memory filesystem for testing
#[derive(Clone, Default)]
pub struct FakeFs {
    inner: Arc<Mutex<FakeFsState>>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.inner
            .lock()
            .entries
            .insert(path.into(), Entry::File(content.into()));
    }

    /// Add an (empty) directory
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.inner.lock().entries.insert(path.into(), Entry::Dir);
    }

    /// Make reads of `path` fail with a permission error while it still exists
    pub fn set_unreadable(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unreadable.insert(path.into());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<FsCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl FsAdapter for FakeFs {
    async fn exists(&self, path: &Path) -> bool {
        let mut inner = self.inner.lock();
        inner.calls.push(FsCall::Exists {
            path: path.to_path_buf(),
        });
        inner.entries.contains_key(path)
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        let mut inner = self.inner.lock();
        inner.calls.push(FsCall::Read {
            path: path.to_path_buf(),
        });

        let error = |kind: std::io::ErrorKind| FsError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::from(kind),
        };

        if inner.unreadable.contains(path) {
            return Err(error(std::io::ErrorKind::PermissionDenied));
        }
        match inner.entries.get(path) {
            Some(Entry::File(content)) => Ok(content.clone()),
            Some(Entry::Dir) => Err(error(std::io::ErrorKind::InvalidInput)),
            None => Err(error(std::io::ErrorKind::NotFound)),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
