// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lp run` - install, start and open the development server

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use lp_adapters::{
    LocalFs, LocalProcessAdapter, ProcessAdapter, SystemViewer, TracedFs, TracedProcess,
    TracedViewer,
};
use lp_core::{LaunchOutcome, ProcessId};
use lp_engine::{InstallCompletion, LaunchConfig, LaunchRequest, Launcher, LauncherDeps, Progress};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::exit_error::{ExitError, EXIT_FAILED, EXIT_USAGE};
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Project directory (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// How long to wait for the server to print its URL
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Give up on installing dependencies after this long
    #[arg(long = "install-timeout-ms", value_name = "MS")]
    pub install_timeout_ms: Option<u64>,

    /// When the install step counts as successful: exit-status or closed
    #[arg(long, value_name = "POLICY", value_parser = parse_install_completion)]
    pub install_completion: Option<InstallCompletion>,

    /// Don't open the URL in a browser
    #[arg(long)]
    pub no_open: bool,

    /// Don't echo install and server output or progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Stop the server after reporting its URL
    #[arg(long)]
    pub once: bool,
}

fn parse_install_completion(s: &str) -> Result<InstallCompletion, String> {
    s.parse().map_err(|e: lp_engine::ConfigError| e.to_string())
}

impl RunArgs {
    /// Environment configuration with command-line flags applied on top.
    pub fn config(&self) -> Result<LaunchConfig, lp_engine::ConfigError> {
        let mut config = LaunchConfig::from_env()?;
        if let Some(ms) = self.timeout_ms {
            config.url_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.install_timeout_ms {
            config.install_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(completion) = self.install_completion {
            config.install_completion = completion;
        }
        if self.no_open {
            config.open_viewer = false;
        }
        if self.quiet {
            config.echo_output = false;
        }
        config.validate()?;
        Ok(config)
    }
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    let config = args
        .config()
        .map_err(|e| ExitError::new(EXIT_USAGE, e.to_string()))?;
    let workspace = crate::workspace::resolve(args.dir.as_deref());

    let processes = TracedProcess::new(LocalProcessAdapter::new().with_echo(config.echo_output));
    let launcher = Launcher::new(
        LauncherDeps {
            fs: TracedFs::new(LocalFs::new()),
            processes: processes.clone(),
            viewer: TracedViewer::new(SystemViewer::from_env()),
        },
        config,
    );

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupted");
                cancel.cancel();
            }
        }
    });

    let mut request = LaunchRequest {
        workspace,
        progress: None,
    };
    let printer = if args.quiet || format == OutputFormat::Json {
        None
    } else {
        let (tx, rx) = mpsc::channel(16);
        request = request.with_progress(tx);
        Some(tokio::spawn(print_progress(rx)))
    };

    let outcome = launcher.launch(request, &cancel).await;
    if let Some(printer) = printer {
        let _ = printer.await;
    }

    if let Some(rendered) = output::render_outcome(&outcome, format)? {
        println!("{}", rendered);
    }

    match outcome {
        LaunchOutcome::Done { server, .. } => {
            if args.once {
                processes.kill(&server).await?;
                return Ok(());
            }
            stay_attached(&processes, &server, &cancel).await
        }
        LaunchOutcome::Failed { reason } => {
            let message = match format {
                OutputFormat::Text => reason.to_string(),
                OutputFormat::Json => String::new(),
            };
            Err(ExitError::new(output::exit_code(&reason), message).into())
        }
    }
}

async fn print_progress(mut rx: mpsc::Receiver<Progress>) {
    while let Some(progress) = rx.recv().await {
        eprintln!("lp: {}", progress);
    }
}

/// Keep the server running until it exits or the user interrupts.
async fn stay_attached<P: ProcessAdapter>(
    processes: &P,
    server: &ProcessId,
    cancel: &CancellationToken,
) -> Result<()> {
    tokio::select! {
        exit = processes.wait_closed(server) => match exit? {
            Some(0) | None => Ok(()),
            Some(code) => Err(ExitError::new(
                EXIT_FAILED,
                format!("The development server exited with code {}.", code),
            )
            .into()),
        },
        _ = cancel.cancelled() => {
            processes.kill(server).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
