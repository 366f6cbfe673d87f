// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Launchpad engine: the watch session and the install-then-run launcher

mod config;
pub mod env;
mod error;
mod launcher;
mod watch;

pub use config::{ConfigError, InstallCompletion, LaunchConfig};
pub use error::LaunchError;
pub use launcher::{
    confirmation_message, LaunchPlan, LaunchRequest, Launcher, LauncherDeps, Progress,
};
pub use watch::{WatchError, WatchSession, DEFAULT_URL_TIMEOUT};
