// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Default timeout for launching the URL viewer.
pub const VIEWER_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for signalling a process group.
pub const SIGNAL_TIMEOUT: Duration = Duration::from_secs(5);

/// How long to wait for a closed process's output pipes to drain.
///
/// A server may leave grandchildren holding its stdout; closure is reported
/// once this elapses even if the pipes never reach EOF.
pub const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Run a short-lived helper command to completion, giving up after `timeout`.
///
/// A non-zero exit is returned as output, not as an error. The child is
/// killed if the timeout elapses.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(format!(
            "{} timed out after {}ms",
            description,
            timeout.as_millis()
        )),
    }
}

/// Build a command that runs `script` through the platform shell.
pub fn shell_command(script: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(script);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
