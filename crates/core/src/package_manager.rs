// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Package manager detection from lockfile evidence.

use crate::manifest::RunScript;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the directory whose presence means dependencies are installed.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Supported JavaScript package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManagerKind {
    /// Detection order. The first kind whose lockfile exists wins; npm is the
    /// fallback and needs no lockfile.
    pub const DETECTION_ORDER: [PackageManagerKind; 4] = [
        PackageManagerKind::Bun,
        PackageManagerKind::Pnpm,
        PackageManagerKind::Yarn,
        PackageManagerKind::Npm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "npm",
            PackageManagerKind::Yarn => "yarn",
            PackageManagerKind::Pnpm => "pnpm",
            PackageManagerKind::Bun => "bun",
        }
    }

    /// Lockfile names that identify this package manager.
    ///
    /// npm returns an empty slice: `package-lock.json` is never required since
    /// npm is the default.
    pub fn lockfiles(self) -> &'static [&'static str] {
        match self {
            PackageManagerKind::Bun => &["bun.lockb", "bun.lock"],
            PackageManagerKind::Pnpm => &["pnpm-lock.yaml"],
            PackageManagerKind::Yarn => &["yarn.lock"],
            PackageManagerKind::Npm => &[],
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A package manager together with the commands used to drive it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManager {
    pub kind: PackageManagerKind,
    pub install_command: String,
    pub run_command: String,
}

impl PackageManager {
    pub fn new(kind: PackageManagerKind) -> Self {
        let install_command = match kind {
            PackageManagerKind::Npm => "npm install",
            PackageManagerKind::Yarn => "yarn",
            PackageManagerKind::Pnpm => "pnpm install",
            PackageManagerKind::Bun => "bun install",
        };
        let run_command = match kind {
            PackageManagerKind::Npm => "npm run dev",
            PackageManagerKind::Yarn => "yarn dev",
            PackageManagerKind::Pnpm => "pnpm dev",
            PackageManagerKind::Bun => "bun dev",
        };
        Self {
            kind,
            install_command: install_command.to_string(),
            run_command: run_command.to_string(),
        }
    }

    /// Pick the package manager from the set of lockfiles that exist.
    ///
    /// `has_lockfile` answers whether a given lockfile name is present in the
    /// project root.
    pub fn detect(mut has_lockfile: impl FnMut(&str) -> bool) -> Self {
        let kind = PackageManagerKind::DETECTION_ORDER
            .into_iter()
            .find(|kind| kind.lockfiles().iter().any(|name| has_lockfile(name)))
            .unwrap_or(PackageManagerKind::Npm);
        Self::new(kind)
    }

    /// Command that starts the development server for `script`.
    pub fn command_for(&self, script: RunScript) -> String {
        match script {
            RunScript::Dev => self.run_command.clone(),
            RunScript::Start => match self.kind {
                PackageManagerKind::Npm => "npm run start".to_string(),
                kind => format!("{} start", kind.name()),
            },
        }
    }
}

#[cfg(test)]
#[path = "package_manager_tests.rs"]
mod tests;
