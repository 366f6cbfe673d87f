// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lp-core: domain types for the Launchpad (lp) dev-server launcher

pub mod manifest;
pub mod outcome;
pub mod package_manager;
pub mod process;
pub mod url;

pub use manifest::{select_run_script, Manifest, ManifestError, RunScript, MANIFEST_FILE};
pub use outcome::{ExtractionResult, FailureReason, LaunchOutcome};
pub use package_manager::{PackageManager, PackageManagerKind, DEPENDENCY_DIR};
pub use process::{OutputEvent, ProcessId};
pub use url::{extract_url, strip_ansi};
