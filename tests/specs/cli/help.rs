//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn lp_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn lp_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("plan");
}

#[test]
fn lp_run_help_shows_flags() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--timeout-ms")
        .stdout_has("--install-completion")
        .stdout_has("--no-open")
        .stdout_has("--once");
}

#[test]
fn lp_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
