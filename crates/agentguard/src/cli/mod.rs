//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Write a default `agentguard.yaml`
//! - `datasets`: List the built-in datasets
//! - `scan`: Scan an ecosystem and summarize it
//! - `analyze`: Print the risk report (score, SPOFs, cycles)
//! - `simulate`: Simulate the failure of one agent
//! - `playbook`: Generate a recovery playbook for an agent failure
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config`: Path to a config file (default: `./agentguard.yaml`)
//!
//! # Example
//!
//! ```bash
//! agentguard analyze --dataset content
//! agentguard simulate checkout-agent
//! agentguard --json playbook order-agent --file ecosystem.json
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{AnalyzeArgs, InitArgs, PlaybookArgs, ScanArgs, SimulateArgs, SourceArgs};
pub use types::DatasetArg;
pub use validators::{validate_agent_id, validate_spof_limit};

/// AgentGuard - dependency risk analysis for AI agent ecosystems
///
/// Finds circular dependencies and single points of failure, scores overall
/// risk, and simulates cascading failures.
#[derive(Parser, Debug)]
#[command(name = "agentguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: ./agentguard.yaml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default configuration file
    ///
    /// Creates `agentguard.yaml` in the current directory. Refuses to
    /// overwrite an existing file unless `--force` is given.
    Init(InitArgs),

    /// List the built-in demo datasets
    Datasets,

    /// Scan an ecosystem
    ///
    /// Discovers agents and dependencies and prints summary metrics,
    /// including any shadow agents found.
    Scan(ScanArgs),

    /// Analyze dependency risk
    ///
    /// Prints the overall risk score and severity, the top single points of
    /// failure, circular dependency chains and per-agent scores.
    Analyze(AnalyzeArgs),

    /// Simulate an agent failure
    ///
    /// Follows dependencies downstream from the failed agent and reports the
    /// blast radius and business impact.
    Simulate(SimulateArgs),

    /// Generate a recovery playbook
    ///
    /// Simulates the agent failure, then prints phased recovery steps,
    /// escalation contacts and an audit trail.
    Playbook(PlaybookArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, data loading or the command fails.
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        let config = self.config.as_deref();

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Datasets) => execute::execute_datasets(output_mode),
            Some(Commands::Scan(args)) => execute::execute_scan(config, args, output_mode).await,
            Some(Commands::Analyze(args)) => {
                execute::execute_analyze(config, args, output_mode).await
            }
            Some(Commands::Simulate(args)) => {
                execute::execute_simulate(config, args, output_mode).await
            }
            Some(Commands::Playbook(args)) => {
                execute::execute_playbook(config, args, output_mode).await
            }
            None => {
                println!("AgentGuard dependency risk analyzer");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
