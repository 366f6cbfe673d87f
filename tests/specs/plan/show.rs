//! `lp plan` specs
//!
//! Verify the plan describes the launch without running anything.

use crate::prelude::*;

#[test]
fn plan_describes_install_and_server() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.file("bun.lockb", "");
    project.tool("bun", "touch ran");

    project
        .lp()
        .args(&["plan"])
        .passes()
        .stdout_has("Package manager:  bun")
        .stdout_has("Install needed:   yes (bun install)")
        .stdout_has("Server command:   bun dev")
        .stdout_has("This will run 'bun install' and start a development server if necessary.");

    assert!(!project.has("ran"));
}

#[test]
fn plan_without_manifest_has_no_server_command() {
    let project = Project::empty();
    project.dir("node_modules");

    project
        .lp()
        .args(&["plan"])
        .passes()
        .stdout_has("Install needed:   no")
        .stdout_has("Server command:   -");
}

#[test]
fn plan_json_is_machine_readable() {
    let project = Project::with_scripts(&[("start", "node server.js")]);
    project.dir("node_modules");

    let json = project.lp().args(&["plan", "-o", "json"]).passes().stdout_json();

    assert_eq!(json["package_manager"]["kind"], "npm");
    assert_eq!(json["install_needed"], false);
    assert_eq!(json["run_command"], "npm run start");
}

#[test]
fn plan_for_missing_directory_fails() {
    let project = Project::empty();

    project
        .lp()
        .args(&["plan", "--dir", "nowhere"])
        .fails()
        .code_is(1)
        .stderr_has("No workspace folder is open.");
}
