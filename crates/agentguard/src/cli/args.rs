//! Command argument structs.

use clap::{Args, Parser};
use std::path::PathBuf;

use super::types::DatasetArg;
use super::validators::{validate_agent_id, validate_spof_limit};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite an existing agentguard.yaml
    #[arg(short, long)]
    pub force: bool,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Where to read the ecosystem from; overrides the config file
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Built-in dataset to scan
    #[arg(short, long, value_enum)]
    pub dataset: Option<DatasetArg>,

    /// Ecosystem JSON document to load instead of demo data
    ///
    /// Accepts a scan document (`agents` + `dependencies`) or a graph
    /// document (`nodes` + `edges`).
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Arguments for the `scan` command
#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    /// Ecosystem source
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Ecosystem source
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of single points of failure to report (1-100)
    #[arg(long, value_parser = validate_spof_limit)]
    pub spof_limit: Option<usize>,
}

/// Arguments for the `simulate` command
#[derive(Parser, Debug, Clone)]
pub struct SimulateArgs {
    /// ID of the agent to fail
    #[arg(value_parser = validate_agent_id)]
    pub agent_id: String,

    /// Ecosystem source
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `playbook` command
#[derive(Parser, Debug, Clone)]
pub struct PlaybookArgs {
    /// ID of the agent whose failure the playbook recovers from
    #[arg(value_parser = validate_agent_id)]
    pub agent_id: String,

    /// Ecosystem source
    #[command(flatten)]
    pub source: SourceArgs,
}
