//! `lp run` install step specs
//!
//! Verify dependencies are installed before the server starts, and how
//! install failures are reported.

use crate::prelude::*;

#[test]
fn missing_node_modules_runs_install_first() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.tool("npm", SERVING_TOOL);

    project
        .lp()
        .args(&["run", "--once", "--no-open"])
        .passes()
        .stdout_eq("http://localhost:5173/\n")
        .stderr_has("lp: Installing dependencies: npm install");

    assert!(project.has("node_modules"));
}

#[test]
fn pnpm_lockfile_installs_with_pnpm() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.file("pnpm-lock.yaml", "");
    project.tool("pnpm", SERVING_TOOL);

    project
        .lp()
        .args(&["run", "--once", "--no-open"])
        .passes()
        .stderr_has("lp: Installing dependencies: pnpm install")
        .stderr_has("lp: Starting: pnpm dev");
}

#[test]
fn failing_install_does_not_start_server() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.tool(
        "npm",
        r#"case "$1" in install) echo "ERR! network" >&2; exit 7 ;; *) touch started; exec sleep 30 ;; esac"#,
    );

    project
        .lp()
        .args(&["run", "--once", "--no-open"])
        .fails()
        .code_is(1)
        .stderr_has("Installing dependencies failed: 'npm install' exited with code 7");

    assert!(!project.has("started"));
}

#[test]
fn closed_policy_ignores_install_exit_status() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.tool(
        "npm",
        r#"case "$1" in install) exit 3 ;; *) echo "http://localhost:8080"; exec sleep 30 ;; esac"#,
    );

    project
        .lp()
        .args(&["run", "--once", "--no-open", "--install-completion", "closed"])
        .passes()
        .stdout_eq("http://localhost:8080\n");
}

#[test]
fn slow_install_times_out() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.tool("npm", "exec sleep 30");

    project
        .lp()
        .args(&["run", "--once", "--no-open", "--install-timeout-ms", "200"])
        .fails()
        .code_is(1)
        .stderr_has("did not finish within 200ms");
}
