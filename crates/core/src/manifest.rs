// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project manifest (`package.json`) and run-script selection.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Errors from parsing a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("malformed {MANIFEST_FILE}: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The subset of `package.json` this tool reads.
///
/// Unknown fields are ignored. A missing, `null` or non-object `scripts`
/// table is treated as empty, and scripts whose value is not a string are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "string_scripts")]
    pub scripts: BTreeMap<String, String>,
}

fn string_scripts<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let serde_json::Value::Object(table) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(table
        .into_iter()
        .filter_map(|(name, value)| match value {
            serde_json::Value::String(cmd) => Some((name, cmd)),
            _ => None,
        })
        .collect())
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Whether `name` is declared with a non-empty command.
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts
            .get(name)
            .is_some_and(|cmd| !cmd.trim().is_empty())
    }
}

/// Which manifest script launches the development server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunScript {
    Dev,
    Start,
}

impl RunScript {
    pub fn name(self) -> &'static str {
        match self {
            RunScript::Dev => "dev",
            RunScript::Start => "start",
        }
    }
}

impl fmt::Display for RunScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Choose the script that starts the server: `dev` first, then `start`.
///
/// Returns `None` when the manifest declares neither.
pub fn select_run_script(manifest: &Manifest) -> Option<RunScript> {
    [RunScript::Dev, RunScript::Start]
        .into_iter()
        .find(|script| manifest.has_script(script.name()))
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
