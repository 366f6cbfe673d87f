// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local process adapter backed by `tokio::process`.
//!
//! Each command runs through the platform shell with stdout and stderr piped.
//! Both streams are published on the shared output channel as they arrive,
//! one event per line, optionally echoed to this process's stderr so the user still
//! sees the server's own log.

use super::{OutputChannel, OutputSubscription, ProcessAdapter, ProcessError};
use crate::subprocess::{shell_command, OUTPUT_DRAIN_TIMEOUT};
use async_trait::async_trait;
use lp_core::{OutputEvent, ProcessId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Child;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// `None` while running, `Some(exit_code)` once closed.
type ClosedState = Option<Option<i32>>;

/// Size of each read from a child's stdout or stderr.
const READ_CHUNK_BYTES: usize = 8 * 1024;

/// Quiet period after which an unterminated line is published as-is.
const PARTIAL_LINE_FLUSH: Duration = Duration::from_millis(50);

/// Longest unterminated line buffered before it is published.
const MAX_PENDING_BYTES: usize = 64 * 1024;

struct LocalProcess {
    closed: watch::Receiver<ClosedState>,
    kill_tx: Option<oneshot::Sender<()>>,
}

#[derive(Default)]
struct LocalState {
    processes: HashMap<ProcessId, LocalProcess>,
    next_id: u64,
}

/// Process adapter that runs commands on the local machine
#[derive(Clone)]
pub struct LocalProcessAdapter {
    inner: Arc<Mutex<LocalState>>,
    output: OutputChannel,
    echo: bool,
}

impl Default for LocalProcessAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalProcessAdapter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LocalState::default())),
            output: OutputChannel::new(),
            echo: false,
        }
    }

    /// Also copy every output line to stderr.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// The channel all process output is published on.
    pub fn output(&self) -> &OutputChannel {
        &self.output
    }

    fn closed_rx(&self, id: &ProcessId) -> Result<watch::Receiver<ClosedState>, ProcessError> {
        self.inner
            .lock()
            .processes
            .get(id)
            .map(|p| p.closed.clone())
            .ok_or_else(|| ProcessError::NotFound(id.clone()))
    }
}

#[async_trait]
impl ProcessAdapter for LocalProcessAdapter {
    async fn spawn(&self, label: &str, cwd: &Path, cmd: &str) -> Result<ProcessId, ProcessError> {
        let mut command = shell_command(cmd);
        command
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own process group so the whole tree (npm -> node -> esbuild) can be
        // signalled together.
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed(format!("{}: {}", cmd, e)))?;

        let id = {
            let mut inner = self.inner.lock();
            inner.next_id += 1;
            ProcessId::new(format!("{}-{}", label, inner.next_id))
        };

        let mut readers = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            readers.push(tokio::spawn(forward_output(
                stdout,
                id.clone(),
                self.output.clone(),
                self.echo,
            )));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(tokio::spawn(forward_output(
                stderr,
                id.clone(),
                self.output.clone(),
                self.echo,
            )));
        }

        let (closed_tx, closed_rx) = watch::channel(None);
        let (kill_tx, kill_rx) = oneshot::channel();
        self.inner.lock().processes.insert(
            id.clone(),
            LocalProcess {
                closed: closed_rx,
                kill_tx: Some(kill_tx),
            },
        );

        tracing::debug!(process = %id, pid = ?child.id(), "process spawned");
        tokio::spawn(supervise(id.clone(), child, readers, kill_rx, closed_tx));

        Ok(id)
    }

    fn subscribe(&self, id: &ProcessId) -> OutputSubscription {
        self.output.subscribe(id)
    }

    async fn wait_closed(&self, id: &ProcessId) -> Result<Option<i32>, ProcessError> {
        let mut closed = self.closed_rx(id)?;
        let code = match closed.wait_for(|state| state.is_some()).await {
            Ok(state) => (*state).flatten(),
            // Supervisor gone without reporting; nothing is running anymore.
            Err(_) => None,
        };
        Ok(code)
    }

    async fn is_alive(&self, id: &ProcessId) -> Result<bool, ProcessError> {
        let closed = self.closed_rx(id)?;
        let alive = closed.borrow().is_none();
        Ok(alive)
    }

    async fn kill(&self, id: &ProcessId) -> Result<(), ProcessError> {
        let kill_tx = {
            let mut inner = self.inner.lock();
            let process = inner
                .processes
                .get_mut(id)
                .ok_or_else(|| ProcessError::NotFound(id.clone()))?;
            process.kill_tx.take()
        };
        if let Some(tx) = kill_tx {
            // Supervisor may have exited already; that is a closed process.
            let _ = tx.send(());
        }
        self.wait_closed(id).await?;
        Ok(())
    }
}

/// Publish output read from `stream` as output events.
///
/// Complete lines are published one event each. A trailing partial line
/// (a prompt, or a URL printed without a newline) is published once the
/// stream has been quiet for [`PARTIAL_LINE_FLUSH`], or once it reaches
/// [`MAX_PENDING_BYTES`].
async fn forward_output<R>(stream: R, id: ProcessId, output: OutputChannel, echo: bool)
where
    R: AsyncRead + Unpin,
{
    let mut reader = stream;
    let mut buf = vec![0u8; READ_CHUNK_BYTES];
    let mut pending: Vec<u8> = Vec::new();
    let mut stderr = tokio::io::stderr();
    loop {
        let read = if pending.is_empty() {
            reader.read(&mut buf).await
        } else {
            match tokio::time::timeout(PARTIAL_LINE_FLUSH, reader.read(&mut buf)).await {
                Ok(read) => read,
                Err(_) => {
                    publish_text(&output, &id, &std::mem::take(&mut pending));
                    continue;
                }
            }
        };
        match read {
            Ok(0) => break,
            Ok(n) => {
                let chunk = &buf[..n];
                if echo {
                    let _ = stderr.write_all(chunk).await;
                }
                pending.extend_from_slice(chunk);
                publish_lines(&output, &id, &mut pending);
                if pending.len() >= MAX_PENDING_BYTES {
                    publish_text(&output, &id, &std::mem::take(&mut pending));
                }
            }
            Err(e) => {
                tracing::debug!(process = %id, error = %e, "output stream read failed");
                break;
            }
        }
    }
    if !pending.is_empty() {
        publish_text(&output, &id, &pending);
    }
}

/// Publish every complete line in `pending`, leaving the unterminated tail.
fn publish_lines(output: &OutputChannel, id: &ProcessId, pending: &mut Vec<u8>) {
    let Some(last_newline) = pending.iter().rposition(|&b| b == b'\n') else {
        return;
    };
    let rest = pending.split_off(last_newline + 1);
    for line in pending.split_inclusive(|&b| b == b'\n') {
        publish_text(output, id, line);
    }
    *pending = rest;
}

fn publish_text(output: &OutputChannel, id: &ProcessId, bytes: &[u8]) {
    output.publish(OutputEvent::new(id.clone(), String::from_utf8_lossy(bytes)));
}

/// Wait for the child to exit (or be killed), let its output drain, then
/// report closure.
async fn supervise(
    id: ProcessId,
    mut child: Child,
    readers: Vec<JoinHandle<()>>,
    kill_rx: oneshot::Receiver<()>,
    closed_tx: watch::Sender<ClosedState>,
) {
    let status = tokio::select! {
        status = child.wait() => status,
        _ = kill_rx => {
            signal_group(&child).await;
            let _ = child.kill().await;
            child.wait().await
        }
    };
    let exit_code = match status {
        Ok(status) => status.code(),
        Err(e) => {
            tracing::warn!(process = %id, error = %e, "failed to wait for process");
            None
        }
    };

    let drained = tokio::time::timeout(OUTPUT_DRAIN_TIMEOUT, async {
        for reader in readers {
            let _ = reader.await;
        }
    })
    .await;
    if drained.is_err() {
        tracing::debug!(process = %id, "output still open after exit, reporting closure");
    }

    tracing::debug!(process = %id, exit_code = ?exit_code, "process closed");
    closed_tx.send_replace(Some(exit_code));
}

/// Ask the child's whole process group to terminate.
#[cfg(unix)]
async fn signal_group(child: &Child) {
    let Some(pid) = child.id() else {
        return;
    };
    let mut cmd = tokio::process::Command::new("kill");
    cmd.args(["-s", "TERM", "--"]).arg(format!("-{}", pid));
    if let Err(e) =
        crate::subprocess::run_with_timeout(cmd, crate::subprocess::SIGNAL_TIMEOUT, "kill").await
    {
        tracing::warn!(pid, error = %e, "failed to signal process group");
    }
}

#[cfg(not(unix))]
async fn signal_group(_child: &Child) {}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
