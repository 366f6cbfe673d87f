// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

mod env;
pub mod fs;
pub mod process;
pub mod subprocess;
pub mod traced;
pub mod viewer;

pub use fs::{FsAdapter, FsError, LocalFs};
pub use process::{
    LocalProcessAdapter, OutputChannel, OutputSubscription, ProcessAdapter, ProcessError,
};
pub use traced::{TracedFs, TracedProcess, TracedViewer};
pub use viewer::{NoOpViewer, SystemViewer, Viewer, ViewerError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fs::{FakeFs, FsCall};
#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeProcess, FakeProcessAdapter, ProcessCall};
#[cfg(any(test, feature = "test-support"))]
pub use viewer::FakeViewer;
