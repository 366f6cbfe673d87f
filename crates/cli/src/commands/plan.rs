// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lp plan` - show what `lp run` would do

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lp_adapters::{LocalFs, LocalProcessAdapter, NoOpViewer};
use lp_engine::{LaunchConfig, Launcher, LauncherDeps};

use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Project directory (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

pub async fn handle(args: PlanArgs, format: OutputFormat) -> Result<()> {
    let workspace = crate::workspace::resolve(args.dir.as_deref());
    let launcher = Launcher::new(
        LauncherDeps {
            fs: LocalFs::new(),
            processes: LocalProcessAdapter::new(),
            viewer: NoOpViewer::new(),
        },
        LaunchConfig::default(),
    );

    match launcher.plan(workspace.as_deref()).await {
        Ok(plan) => {
            println!("{}", output::render_plan(&plan, format)?);
            Ok(())
        }
        Err(reason) => {
            if let Some(rendered) = output::render_failure(&reason, format)? {
                println!("{}", rendered);
            }
            let message = match format {
                OutputFormat::Text => reason.to_string(),
                OutputFormat::Json => String::new(),
            };
            Err(ExitError::new(output::exit_code(&reason), message).into())
        }
    }
}
