//! AgentGuard CLI binary.

use agentguard::cli::Cli;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Main entry point for the agentguard CLI.
///
/// Commands run one scan and at most one simulation, so tokio's
/// current_thread runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=agentguard=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("agentguard=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting agentguard CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Agentguard CLI completed successfully");
    Ok(())
}
