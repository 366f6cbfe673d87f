// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Install-then-run orchestration.
//!
//! A launch resolves the workspace, picks the package manager from its
//! lockfiles, chooses the run script, installs dependencies when
//! `node_modules` is missing, then starts the server and watches its output
//! for a URL. Every fast-fail check happens before anything is spawned.

use crate::config::{InstallCompletion, LaunchConfig};
use crate::error::LaunchError;
use crate::watch::WatchSession;
use lp_adapters::{FsAdapter, ProcessAdapter, Viewer};
use lp_core::{
    select_run_script, ExtractionResult, FailureReason, LaunchOutcome, Manifest, PackageManager,
    PackageManagerKind, ProcessId, DEPENDENCY_DIR, MANIFEST_FILE,
};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Launcher adapter dependencies
pub struct LauncherDeps<F, P, V> {
    pub fs: F,
    pub processes: P,
    pub viewer: V,
}

/// A single launch
#[derive(Debug, Default)]
pub struct LaunchRequest {
    /// Project root; `None` when there is no workspace at all
    pub workspace: Option<PathBuf>,
    /// Receives human-readable milestones
    pub progress: Option<mpsc::Sender<Progress>>,
}

impl LaunchRequest {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: Some(workspace.into()),
            progress: None,
        }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<Progress>) -> Self {
        self.progress = Some(tx);
        self
    }
}

/// Launch milestones
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Detected(PackageManagerKind),
    InstallSkipped,
    Installing { command: String },
    Starting { command: String },
    UrlFound { url: String },
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Detected(kind) => write!(f, "Using {}", kind),
            Progress::InstallSkipped => write!(f, "Dependencies already installed"),
            Progress::Installing { command } => write!(f, "Installing dependencies: {}", command),
            Progress::Starting { command } => write!(f, "Starting: {}", command),
            Progress::UrlFound { url } => write!(f, "Server ready at {}", url),
        }
    }
}

/// What a launch would do, without doing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub workspace: PathBuf,
    pub package_manager: PackageManager,
    pub install_needed: bool,
    /// Server command, when the manifest names a usable script
    pub run_command: Option<String>,
    pub message: String,
}

/// Text asking the user to confirm running `install_command`.
pub fn confirmation_message(install_command: &str) -> String {
    format!(
        "This will run '{}' and start a development server if necessary.",
        install_command
    )
}

/// Runs launches against injected adapters
pub struct Launcher<F, P, V> {
    fs: F,
    processes: P,
    viewer: V,
    config: LaunchConfig,
}

/// Workspace facts gathered before anything runs
struct Prepared {
    workspace: PathBuf,
    package_manager: PackageManager,
    install_needed: bool,
}

impl<F, P, V> Launcher<F, P, V>
where
    F: FsAdapter,
    P: ProcessAdapter,
    V: Viewer,
{
    pub fn new(deps: LauncherDeps<F, P, V>, config: LaunchConfig) -> Self {
        Self {
            fs: deps.fs,
            processes: deps.processes,
            viewer: deps.viewer,
            config,
        }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn processes(&self) -> &P {
        &self.processes
    }

    /// Launch the development server and report exactly one outcome.
    pub async fn launch(&self, request: LaunchRequest, cancel: &CancellationToken) -> LaunchOutcome {
        let progress = request.progress;
        let result = self
            .try_launch(request.workspace.as_deref(), progress.as_ref(), cancel)
            .await;
        match result {
            Ok((url, server)) => LaunchOutcome::Done { url, server },
            Err(e) => {
                let reason = FailureReason::from(e);
                if reason.is_expected() {
                    tracing::info!(kind = reason.kind(), "launch failed: {}", reason);
                } else {
                    tracing::error!("launch failed: {}", reason);
                }
                LaunchOutcome::failed(reason)
            }
        }
    }

    /// Describe the launch for `workspace` without spawning anything.
    pub async fn plan(&self, workspace: Option<&Path>) -> Result<LaunchPlan, FailureReason> {
        let prepared = self.prepare(workspace).await?;
        let run_command = match self.run_command(&prepared).await {
            Ok(command) => Some(command),
            Err(e) => {
                tracing::debug!(error = %e, "no run command for plan");
                None
            }
        };
        Ok(LaunchPlan {
            message: confirmation_message(&prepared.package_manager.install_command),
            workspace: prepared.workspace,
            package_manager: prepared.package_manager,
            install_needed: prepared.install_needed,
            run_command,
        })
    }

    async fn try_launch(
        &self,
        workspace: Option<&Path>,
        progress: Option<&mpsc::Sender<Progress>>,
        cancel: &CancellationToken,
    ) -> Result<(String, ProcessId), LaunchError> {
        let prepared = self.prepare(workspace).await?;
        report(progress, Progress::Detected(prepared.package_manager.kind)).await;
        let command = self.run_command(&prepared).await?;

        if prepared.install_needed {
            if cancel.is_cancelled() {
                return Err(LaunchError::Cancelled);
            }
            let install_command = &prepared.package_manager.install_command;
            report(
                progress,
                Progress::Installing {
                    command: install_command.clone(),
                },
            )
            .await;
            self.install(&prepared.workspace, install_command, cancel)
                .await?;
        } else {
            report(progress, Progress::InstallSkipped).await;
        }

        if cancel.is_cancelled() {
            return Err(LaunchError::Cancelled);
        }

        report(
            progress,
            Progress::Starting {
                command: command.clone(),
            },
        )
        .await;
        let server = self
            .processes
            .spawn("server", &prepared.workspace, &command)
            .await?;
        let url = self.watch(&server, cancel).await?;

        report(progress, Progress::UrlFound { url: url.clone() }).await;
        if self.config.open_viewer {
            if let Err(e) = self.viewer.show(&url).await {
                tracing::warn!(url, error = %e, "could not open viewer");
            }
        }
        Ok((url, server))
    }

    /// Resolve the workspace, package manager and install need.
    async fn prepare(&self, workspace: Option<&Path>) -> Result<Prepared, LaunchError> {
        let workspace = match workspace {
            Some(path) if self.fs.exists(path).await => path.to_path_buf(),
            _ => return Err(LaunchError::NoWorkspace),
        };

        let mut lockfiles = HashSet::new();
        for kind in PackageManagerKind::DETECTION_ORDER {
            for name in kind.lockfiles() {
                if self.fs.exists(&workspace.join(name)).await {
                    lockfiles.insert(*name);
                }
            }
        }
        let package_manager = PackageManager::detect(|name| lockfiles.contains(name));
        tracing::debug!(workspace = %workspace.display(), package_manager = %package_manager.kind, "detected");

        let install_needed = !self.fs.exists(&workspace.join(DEPENDENCY_DIR)).await;
        Ok(Prepared {
            workspace,
            package_manager,
            install_needed,
        })
    }

    /// Read the manifest and pick the server command.
    async fn run_command(&self, prepared: &Prepared) -> Result<String, LaunchError> {
        let path = prepared.workspace.join(MANIFEST_FILE);
        if !self.fs.exists(&path).await {
            return Err(LaunchError::NoManifest);
        }
        let manifest = Manifest::parse(&self.fs.read_to_string(&path).await?)?;
        let script = select_run_script(&manifest).ok_or(LaunchError::NoRunScript)?;
        Ok(prepared.package_manager.command_for(script))
    }

    /// Run the install command to completion.
    async fn install(
        &self,
        workspace: &Path,
        command: &str,
        cancel: &CancellationToken,
    ) -> Result<(), LaunchError> {
        let id = self
            .processes
            .spawn("install", workspace, command)
            .await
            .map_err(|e| LaunchError::InstallFailed(e.to_string()))?;

        let deadline = async {
            match self.config.install_timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.stop(&id).await;
                Err(LaunchError::Cancelled)
            }
            exit = self.processes.wait_closed(&id) => {
                let exit_code = exit?;
                match (self.config.install_completion, exit_code) {
                    (InstallCompletion::Closed, _) | (InstallCompletion::ExitStatus, Some(0)) => {
                        tracing::info!(command, exit_code = ?exit_code, "install finished");
                        Ok(())
                    }
                    (InstallCompletion::ExitStatus, Some(code)) => Err(LaunchError::InstallFailed(
                        format!("'{}' exited with code {}", command, code),
                    )),
                    (InstallCompletion::ExitStatus, None) => Err(LaunchError::InstallFailed(
                        format!("'{}' was terminated before finishing", command),
                    )),
                }
            }
            _ = deadline => {
                self.stop(&id).await;
                let timeout_ms = self
                    .config
                    .install_timeout
                    .map(|t| t.as_millis())
                    .unwrap_or_default();
                Err(LaunchError::InstallFailed(format!(
                    "'{}' did not finish within {}ms",
                    command, timeout_ms
                )))
            }
        }
    }

    /// Watch the server for its URL; the server is stopped on every other
    /// result.
    async fn watch(&self, server: &ProcessId, cancel: &CancellationToken) -> Result<String, LaunchError> {
        let result =
            WatchSession::start(&self.processes, server, self.config.url_timeout, cancel).await;
        let err = match result {
            Ok(ExtractionResult::Found { url }) => return Ok(url),
            Ok(ExtractionResult::TimedOut) => LaunchError::UrlTimeout(self.config.url_timeout),
            Ok(ExtractionResult::Cancelled) => LaunchError::Cancelled,
            Ok(ExtractionResult::Exited { exit_code }) => LaunchError::ServerExited(exit_code),
            Err(e) => LaunchError::Watch(e),
        };
        self.stop(server).await;
        Err(err)
    }

    /// Kill a process, logging rather than failing.
    async fn stop(&self, id: &ProcessId) {
        if let Err(e) = self.processes.kill(id).await {
            tracing::warn!(process = %id, error = %e, "failed to stop process");
        }
    }
}

async fn report(progress: Option<&mpsc::Sender<Progress>>, event: Progress) {
    if let Some(tx) = progress {
        // A dropped receiver only means nobody is listening.
        let _ = tx.send(event).await;
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
