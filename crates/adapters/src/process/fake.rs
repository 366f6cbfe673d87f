// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{OutputChannel, OutputSubscription, ProcessAdapter, ProcessError};
use async_trait::async_trait;
use lp_core::{OutputEvent, ProcessId};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

/// `None` while running, `Some(exit_code)` once closed.
type ClosedState = Option<Option<i32>>;

/// Recorded process call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessCall {
    Spawn {
        label: String,
        cwd: PathBuf,
        cmd: String,
    },
    Kill {
        id: ProcessId,
    },
}

/// Fake process state
#[derive(Debug, Clone)]
pub struct FakeProcess {
    pub label: String,
    pub cwd: PathBuf,
    pub cmd: String,
    pub alive: bool,
    pub exit_code: Option<i32>,
    pub killed: bool,
}

/// What a command does as soon as it is spawned
#[derive(Debug, Clone, Default)]
struct Script {
    output: Vec<String>,
    exit: Option<Option<i32>>,
}

struct Entry {
    process: FakeProcess,
    closed_tx: watch::Sender<ClosedState>,
}

#[derive(Default)]
struct FakeProcessState {
    processes: HashMap<ProcessId, Entry>,
    scripts: HashMap<String, Script>,
    failing: HashSet<String>,
    calls: Vec<ProcessCall>,
    next_id: u64,
}

/// Fake process adapter for testing
///
/// Processes run until a test closes them with [`FakeProcessAdapter::exit`],
/// or until a script registered with [`FakeProcessAdapter::on_spawn`] closes
/// them at spawn time.
#[derive(Clone, Default)]
pub struct FakeProcessAdapter {
    inner: Arc<Mutex<FakeProcessState>>,
    output: OutputChannel,
}

impl FakeProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines `cmd` prints immediately after it is spawned
    pub fn on_spawn(&self, cmd: &str, output: &[&str]) {
        let mut inner = self.inner.lock();
        let script = inner.scripts.entry(cmd.to_string()).or_default();
        script.output = output.iter().map(|s| s.to_string()).collect();
    }

    /// Make `cmd` close with `exit_code` right after it is spawned
    pub fn exit_on_spawn(&self, cmd: &str, exit_code: Option<i32>) {
        let mut inner = self.inner.lock();
        inner.scripts.entry(cmd.to_string()).or_default().exit = Some(exit_code);
    }

    /// Make spawning `cmd` fail
    pub fn fail_spawn(&self, cmd: &str) {
        self.inner.lock().failing.insert(cmd.to_string());
    }

    /// Write a chunk of output as `id`
    pub fn emit(&self, id: &ProcessId, text: &str) {
        self.output.publish(OutputEvent::new(id.clone(), text));
    }

    /// Close a running process
    pub fn exit(&self, id: &ProcessId, exit_code: Option<i32>) {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.processes.get_mut(id) {
            close(entry, exit_code);
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ProcessCall> {
        self.inner.lock().calls.clone()
    }

    /// Commands spawned so far, in order
    pub fn spawned_commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ProcessCall::Spawn { cmd, .. } => Some(cmd),
                ProcessCall::Kill { .. } => None,
            })
            .collect()
    }

    /// Get a process by ID
    pub fn get_process(&self, id: &ProcessId) -> Option<FakeProcess> {
        self.inner
            .lock()
            .processes
            .get(id)
            .map(|entry| entry.process.clone())
    }

    /// Find the most recent process spawned for `cmd`
    pub fn find_by_cmd(&self, cmd: &str) -> Option<ProcessId> {
        let inner = self.inner.lock();
        inner
            .processes
            .iter()
            .filter(|(_, entry)| entry.process.cmd == cmd)
            .max_by_key(|(id, _)| id_number(id))
            .map(|(id, _)| id.clone())
    }

    /// Number of live output subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.output.subscriber_count()
    }
}

fn id_number(id: &ProcessId) -> u64 {
    id.as_str()
        .rsplit('-')
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn close(entry: &mut Entry, exit_code: Option<i32>) {
    if entry.process.alive {
        entry.process.alive = false;
        entry.process.exit_code = exit_code;
        entry.closed_tx.send_replace(Some(exit_code));
    }
}

#[async_trait]
impl ProcessAdapter for FakeProcessAdapter {
    async fn spawn(&self, label: &str, cwd: &Path, cmd: &str) -> Result<ProcessId, ProcessError> {
        let script = {
            let mut inner = self.inner.lock();

            inner.calls.push(ProcessCall::Spawn {
                label: label.to_string(),
                cwd: cwd.to_path_buf(),
                cmd: cmd.to_string(),
            });

            if inner.failing.contains(cmd) {
                return Err(ProcessError::SpawnFailed(format!("{}: not found", cmd)));
            }

            inner.next_id += 1;
            let id = ProcessId::new(format!("fake-{}", inner.next_id));
            let (closed_tx, _) = watch::channel(None);
            inner.processes.insert(
                id.clone(),
                Entry {
                    process: FakeProcess {
                        label: label.to_string(),
                        cwd: cwd.to_path_buf(),
                        cmd: cmd.to_string(),
                        alive: true,
                        exit_code: None,
                        killed: false,
                    },
                    closed_tx,
                },
            );
            (id, inner.scripts.get(cmd).cloned().unwrap_or_default())
        };

        let (id, script) = script;
        for line in &script.output {
            self.emit(&id, line);
        }
        if let Some(exit_code) = script.exit {
            self.exit(&id, exit_code);
        }

        Ok(id)
    }

    fn subscribe(&self, id: &ProcessId) -> OutputSubscription {
        self.output.subscribe(id)
    }

    async fn wait_closed(&self, id: &ProcessId) -> Result<Option<i32>, ProcessError> {
        let mut closed = {
            let inner = self.inner.lock();
            let entry = inner
                .processes
                .get(id)
                .ok_or_else(|| ProcessError::NotFound(id.clone()))?;
            entry.closed_tx.subscribe()
        };
        let code = match closed.wait_for(|state| state.is_some()).await {
            Ok(state) => (*state).flatten(),
            Err(_) => None,
        };
        Ok(code)
    }

    async fn is_alive(&self, id: &ProcessId) -> Result<bool, ProcessError> {
        let inner = self.inner.lock();
        match inner.processes.get(id) {
            Some(entry) => Ok(entry.process.alive),
            None => Err(ProcessError::NotFound(id.clone())),
        }
    }

    async fn kill(&self, id: &ProcessId) -> Result<(), ProcessError> {
        let mut inner = self.inner.lock();

        inner.calls.push(ProcessCall::Kill { id: id.clone() });

        let entry = inner
            .processes
            .get_mut(id)
            .ok_or_else(|| ProcessError::NotFound(id.clone()))?;
        if entry.process.alive {
            entry.process.killed = true;
        }
        close(entry, None);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
