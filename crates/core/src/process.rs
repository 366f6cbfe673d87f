// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process handle and output event types.
//!
//! A `ProcessId` is the opaque handle an adapter hands back from `spawn`.
//! Output produced by that process is delivered as `OutputEvent`s tagged
//! with the same id.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque handle to a process spawned by a process adapter.
///
/// The format is adapter-specific (`dev-server-3`, `fake-1`, ...) and should
/// not be parsed by consumers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub String);

impl ProcessId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProcessId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProcessId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<&str> for ProcessId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for ProcessId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A chunk of text written by a spawned process.
///
/// Chunks arrive in the order the process wrote them. Consumers only read
/// events; they never mutate or re-emit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEvent {
    pub source: ProcessId,
    pub text: String,
}

impl OutputEvent {
    pub fn new(source: ProcessId, text: impl Into<String>) -> Self {
        Self {
            source,
            text: text.into(),
        }
    }

    /// Whether this event was written by `process`.
    pub fn is_from(&self, process: &ProcessId) -> bool {
        &self.source == process
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
