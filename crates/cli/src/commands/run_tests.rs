// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lp_adapters::FakeProcessAdapter;
use serial_test::serial;
use std::path::Path;

fn args() -> RunArgs {
    RunArgs {
        dir: None,
        timeout_ms: None,
        install_timeout_ms: None,
        install_completion: None,
        no_open: false,
        quiet: false,
        once: false,
    }
}

fn clear_env() {
    for var in [
        "LP_URL_TIMEOUT_MS",
        "LP_INSTALL_TIMEOUT_MS",
        "LP_INSTALL_COMPLETION",
        "LP_NO_OPEN",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn flags_override_environment() {
    clear_env();
    std::env::set_var("LP_URL_TIMEOUT_MS", "5000");
    std::env::set_var("LP_INSTALL_COMPLETION", "closed");

    let config = RunArgs {
        timeout_ms: Some(250),
        install_completion: Some(InstallCompletion::ExitStatus),
        no_open: true,
        quiet: true,
        ..args()
    }
    .config();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.url_timeout, Duration::from_millis(250));
    assert_eq!(config.install_completion, InstallCompletion::ExitStatus);
    assert!(!config.open_viewer);
    assert!(!config.echo_output);
}

#[test]
#[serial]
fn environment_applies_without_flags() {
    clear_env();
    std::env::set_var("LP_INSTALL_TIMEOUT_MS", "120000");

    let config = args().config();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.install_timeout, Some(Duration::from_secs(120)));
    assert_eq!(config.url_timeout, Duration::from_secs(60));
    assert!(config.open_viewer);
    assert!(config.echo_output);
}

#[test]
#[serial]
fn zero_timeout_flag_is_rejected() {
    clear_env();
    let result = RunArgs {
        timeout_ms: Some(0),
        ..args()
    }
    .config();
    assert!(result.is_err());
}

#[yare::parameterized(
    dashed = { "exit-status", InstallCompletion::ExitStatus },
    closed = { "closed", InstallCompletion::Closed },
)]
fn install_completion_flag_parses(input: &str, expected: InstallCompletion) {
    assert_eq!(parse_install_completion(input), Ok(expected));
}

#[test]
fn install_completion_flag_reports_choices() {
    let err = parse_install_completion("eventually").unwrap_err();
    assert!(err.contains("exit-status or closed"), "{err}");
}

#[tokio::test]
async fn stay_attached_returns_when_server_exits_cleanly() {
    let processes = FakeProcessAdapter::new();
    let server = processes
        .spawn("server", Path::new("/work"), "npm run dev")
        .await
        .unwrap();
    processes.exit(&server, Some(0));

    let result = stay_attached(&processes, &server, &CancellationToken::new()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn stay_attached_reports_server_crash() {
    let processes = FakeProcessAdapter::new();
    let server = processes
        .spawn("server", Path::new("/work"), "npm run dev")
        .await
        .unwrap();
    processes.exit(&server, Some(3));

    let err = stay_attached(&processes, &server, &CancellationToken::new())
        .await
        .unwrap_err();

    let exit = err.downcast_ref::<ExitError>().unwrap();
    assert_eq!(exit.code, EXIT_FAILED);
    assert!(exit.message.contains("code 3"), "{}", exit.message);
}

#[tokio::test]
async fn stay_attached_kills_server_on_interrupt() {
    let processes = FakeProcessAdapter::new();
    let server = processes
        .spawn("server", Path::new("/work"), "npm run dev")
        .await
        .unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    stay_attached(&processes, &server, &cancel).await.unwrap();

    assert!(processes.get_process(&server).unwrap().killed);
}
