//! `lp run` success specs
//!
//! Verify the URL is detected from server output and reported on stdout.

use crate::prelude::*;

#[test]
fn prints_url_from_server_output() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.dir("node_modules");
    project.tool("npm", SERVING_TOOL);

    project
        .lp()
        .args(&["run", "--once", "--no-open"])
        .passes()
        .stdout_eq("http://localhost:5173/\n")
        .stderr_has("lp: Using npm")
        .stderr_has("lp: Dependencies already installed")
        .stderr_has("lp: Starting: npm run dev")
        .stderr_has("lp: Server ready at http://localhost:5173/");
}

#[test]
fn start_script_is_used_without_dev() {
    let project = Project::with_scripts(&[("start", "node server.js")]);
    project.dir("node_modules");
    project.tool("npm", SERVING_TOOL);

    project
        .lp()
        .args(&["run", "--once", "--no-open"])
        .passes()
        .stderr_has("lp: Starting: npm run start");
}

#[test]
fn yarn_lockfile_selects_yarn() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.file("yarn.lock", "");
    project.dir("node_modules");
    project.tool("yarn", SERVING_TOOL);

    project
        .lp()
        .args(&["run", "--once", "--no-open"])
        .passes()
        .stdout_eq("http://localhost:5173/\n")
        .stderr_has("lp: Starting: yarn dev");
}

#[test]
fn colored_output_is_matched() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.dir("node_modules");
    project.tool(
        "npm",
        r#"printf '  \033[32m➜\033[0m  Local: \033[36mhttp://127.0.0.1:3000/\033[0m.\n'; exec sleep 30"#,
    );

    project
        .lp()
        .args(&["run", "--once", "--no-open"])
        .passes()
        .stdout_eq("http://127.0.0.1:3000/\n");
}

#[test]
fn quiet_suppresses_progress_and_server_output() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.dir("node_modules");
    project.tool("npm", SERVING_TOOL);

    project
        .lp()
        .args(&["run", "--once", "--no-open", "--quiet"])
        .passes()
        .stdout_eq("http://localhost:5173/\n")
        .stderr_lacks("lp:")
        .stderr_lacks("VITE ready");
}

#[test]
fn json_output_describes_outcome() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.dir("node_modules");
    project.tool("npm", SERVING_TOOL);

    let run = project
        .lp()
        .args(&["-o", "json", "run", "--once", "--no-open"])
        .passes();
    let json = run.stdout_json();

    assert_eq!(json["status"], "done");
    assert_eq!(json["url"], "http://localhost:5173/");
    run.stderr_lacks("lp:");
}

#[test]
fn dir_flag_targets_another_project() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.dir("node_modules");
    project.tool("npm", SERVING_TOOL);
    let elsewhere = tempfile::tempdir().unwrap();

    project
        .lp()
        .pwd(elsewhere.path())
        .args(&["run", "--once", "--no-open", "--dir"])
        .args(&[project.path().to_str().unwrap()])
        .passes()
        .stdout_eq("http://localhost:5173/\n");
}

#[test]
fn subdirectory_resolves_to_project_root() {
    let project = Project::with_scripts(&[("dev", "vite")]);
    project.dir("node_modules");
    project.dir("src/components");
    project.tool("npm", SERVING_TOOL);

    project
        .lp()
        .pwd(project.path().join("src/components"))
        .args(&["run", "--once", "--no-open"])
        .passes()
        .stdout_eq("http://localhost:5173/\n");
}
