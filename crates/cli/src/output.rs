// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::exit_error::{EXIT_CANCELLED, EXIT_FAILED};
use clap::ValueEnum;
use lp_core::{FailureReason, LaunchOutcome};
use lp_engine::LaunchPlan;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Process exit code for a failed launch.
pub fn exit_code(reason: &FailureReason) -> i32 {
    match reason {
        FailureReason::Cancelled => EXIT_CANCELLED,
        _ => EXIT_FAILED,
    }
}

/// Render a launch outcome for stdout.
///
/// Text output prints only the URL of a successful launch; failures are
/// reported on stderr by the caller. JSON output always describes the
/// outcome.
pub fn render_outcome(outcome: &LaunchOutcome, format: OutputFormat) -> anyhow::Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(outcome.url().map(str::to_string)),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(outcome)?)),
    }
}

/// Render a launch plan for stdout.
pub fn render_plan(plan: &LaunchPlan, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => {
            let pm = &plan.package_manager;
            let install = if plan.install_needed {
                format!("yes ({})", pm.install_command)
            } else {
                "no".to_string()
            };
            let server = plan.run_command.as_deref().unwrap_or("-");
            Ok(format!(
                "Workspace:        {}\nPackage manager:  {}\nInstall needed:   {}\nServer command:   {}\n\n{}",
                plan.workspace.display(),
                pm.kind,
                install,
                server,
                plan.message
            ))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
    }
}

/// Render a failure that has no outcome object (e.g. `lp plan`).
pub fn render_failure(reason: &FailureReason, format: OutputFormat) -> anyhow::Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(
            &serde_json::json!({ "status": "failed", "reason": reason }),
        )?)),
    }
}
