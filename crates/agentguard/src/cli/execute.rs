//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;
use std::path::Path;

use super::args::{AnalyzeArgs, InitArgs, PlaybookArgs, ScanArgs, SimulateArgs, SourceArgs};
use crate::app::App;
use crate::config::{self, AgentGuardConfig};
use crate::domain::{AgentId, Dataset};
use crate::output::{self, OutputMode};

/// Build the application context for one command.
///
/// Command-line source flags take precedence over the config file. A `--file`
/// given on the command line is read strictly: no fallback to demo data.
async fn load_app(
    config_path: Option<&Path>,
    source: &SourceArgs,
    spof_limit: Option<usize>,
) -> Result<(App, Option<Dataset>)> {
    let working_dir = std::env::current_dir()?;
    let mut config = AgentGuardConfig::discover(config_path, &working_dir).await?;

    if let Some(file) = &source.file {
        config.data_file = Some(file.clone());
        config.fallback_to_demo = false;
    }
    if let Some(limit) = spof_limit {
        config.spof_limit = limit;
    }

    tracing::debug!(?config, "Resolved configuration");
    Ok((App::new(config), source.dataset.map(Dataset::from)))
}

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let result = config::init(&current_dir, args.force).await?;

    if !args.quiet {
        let verb = if result.overwritten {
            "Overwrote"
        } else {
            "Wrote"
        };
        println!("{verb} {}", result.config_file.display());
    }
    Ok(())
}

/// Execute the datasets command
pub fn execute_datasets(output_mode: OutputMode) -> Result<()> {
    output::print_datasets(output_mode)?;
    Ok(())
}

/// Execute the scan command
pub async fn execute_scan(
    config_path: Option<&Path>,
    args: &ScanArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let (mut app, dataset) = load_app(config_path, &args.source, None).await?;
    let session = app.scan(dataset).await?;
    output::print_scan(&session.scan, output_mode)?;
    Ok(())
}

/// Execute the analyze command
pub async fn execute_analyze(
    config_path: Option<&Path>,
    args: &AnalyzeArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let (mut app, dataset) = load_app(config_path, &args.source, args.spof_limit).await?;
    let session = app.scan(dataset).await?;
    output::print_report(&session.report, output_mode)?;
    Ok(())
}

/// Execute the simulate command
pub async fn execute_simulate(
    config_path: Option<&Path>,
    args: &SimulateArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let (mut app, dataset) = load_app(config_path, &args.source, None).await?;
    app.scan(dataset).await?;
    let simulation = app.simulate(&AgentId::from(args.agent_id.as_str())).await?;
    output::print_simulation(simulation, output_mode)?;
    Ok(())
}

/// Execute the playbook command
pub async fn execute_playbook(
    config_path: Option<&Path>,
    args: &PlaybookArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let (mut app, dataset) = load_app(config_path, &args.source, None).await?;
    app.scan(dataset).await?;
    app.simulate(&AgentId::from(args.agent_id.as_str())).await?;
    let playbook = app.playbook().await?;
    output::print_playbook(playbook, output_mode)?;
    Ok(())
}
