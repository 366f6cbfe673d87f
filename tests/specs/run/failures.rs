//! `lp run` failure specs
//!
//! Verify each failure is reported once, with the right exit code.

use crate::prelude::*;

#[test]
fn missing_manifest_fails_without_spawning() {
    let project = Project::empty();
    project.tool("npm", "touch ran");

    project
        .lp()
        .args(&["run", "--no-open"])
        .fails()
        .code_is(1)
        .stderr_has("Error: No package.json found in the workspace.");

    assert!(!project.has("ran"));
}

#[test]
fn manifest_without_run_script_fails() {
    let project = Project::with_scripts(&[("build", "vite build")]);
    project.tool("npm", "touch ran");

    project
        .lp()
        .args(&["run", "--no-open"])
        .fails()
        .code_is(1)
        .stderr_has("No \"dev\" or \"start\" script found in package.json.");

    assert!(!project.has("ran"));
}

#[test]
fn missing_directory_is_no_workspace() {
    let project = Project::empty();

    project
        .lp()
        .args(&["run", "--no-open", "--dir", "does/not/exist"])
        .fails()
        .code_is(1)
        .stderr_has("No workspace folder is open.");
}

#[test]
fn server_exiting_before_url_is_reported() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.dir("node_modules");
    project.tool("npm", r#"echo "Error: Cannot find module 'vite'" >&2; exit 1"#);

    project
        .lp()
        .args(&["run", "--no-open"])
        .fails()
        .code_is(1)
        .stderr_has("The development server exited with code 1 before printing a URL.");
}

#[test]
fn silent_server_times_out() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.dir("node_modules");
    project.tool("npm", "echo compiling; exec sleep 30");

    project
        .lp()
        .args(&["run", "--no-open", "--timeout-ms", "300"])
        .fails()
        .code_is(1)
        .stderr_has("Could not determine the server URL within 300ms.");
}

#[test]
fn json_failure_has_reason_kind() {
    let project = Project::empty();

    let run = project
        .lp()
        .args(&["--output", "json", "run", "--no-open"])
        .fails()
        .code_is(1);
    let json = run.stdout_json();

    assert_eq!(json["status"], "failed");
    assert_eq!(json["reason"]["kind"], "no_manifest");
    run.stderr_lacks("Error:");
}
