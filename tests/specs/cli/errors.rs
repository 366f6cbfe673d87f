//! CLI error handling specs
//!
//! Verify usage errors for invalid arguments and configuration.

use crate::prelude::*;

#[test]
fn unknown_subcommand_is_usage_error() {
    cli().args(&["serve"]).fails().code_is(2);
}

#[test]
fn zero_timeout_is_rejected_before_running_anything() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.tool("npm", "touch ran; exit 0");

    project
        .lp()
        .args(&["run", "--timeout-ms", "0"])
        .fails()
        .code_is(2)
        .stderr_has("must be greater than zero");

    assert!(!project.has("ran"));
}

#[test]
fn malformed_timeout_variable_is_usage_error() {
    let project = Project::with_scripts(&[("dev", "vite")]);

    project
        .lp()
        .args(&["run"])
        .env("LP_URL_TIMEOUT_MS", "soon")
        .fails()
        .code_is(2)
        .stderr_has("LP_URL_TIMEOUT_MS");
}

#[test]
fn invalid_install_completion_is_rejected() {
    cli()
        .args(&["run", "--install-completion", "whenever"])
        .fails()
        .code_is(2)
        .stderr_has("whenever");
}
