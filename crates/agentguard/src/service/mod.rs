//! Ecosystem data providers.
//!
//! An [`EcosystemService`] is where scans, failure simulations and playbooks
//! come from. The trait is async and object safe so that a remote provider can
//! sit behind `Box<dyn EcosystemService>` next to the local ones:
//!
//! - [`LocalService`]: built-in demo datasets, or a JSON document on disk
//! - [`FallbackService`]: wraps a primary provider and serves a fallback when
//!   the primary reports its data as unavailable
//!
//! # Example
//!
//! ```no_run
//! use agentguard::domain::Dataset;
//! use agentguard::service::{EcosystemService, LocalService};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let service = LocalService::demo();
//!     let scan = service.scan(Dataset::Ecommerce).await?;
//!     let sim = service.simulate(&scan, &"checkout-agent".into()).await?;
//!     println!("{} agents impacted", sim.impacted_count);
//!     Ok(())
//! }
//! ```

mod fallback;
mod local;

pub use fallback::FallbackService;
pub use local::{DataSource, LocalService};

use crate::domain::{AgentId, Dataset, Playbook, ScanResult, SimulationResult};
use crate::error::Result;
use async_trait::async_trait;

/// Source of ecosystem scans and the analyses derived from them.
///
/// Implementations must be `Send + Sync` so the application context can hold
/// them as trait objects.
#[async_trait]
pub trait EcosystemService: Send + Sync {
    /// Discover the agents and dependencies of an ecosystem.
    ///
    /// # Errors
    ///
    /// Returns `Error::DataUnavailable` when the underlying source cannot be
    /// read, or `Error::Json` when it is malformed.
    async fn scan(&self, dataset: Dataset) -> Result<ScanResult>;

    /// Simulate the failure of `agent_id` within a previous scan.
    ///
    /// # Errors
    ///
    /// Returns `Error::AgentNotFound` if the agent is not part of the scan.
    async fn simulate(&self, scan: &ScanResult, agent_id: &AgentId) -> Result<SimulationResult>;

    /// Generate a recovery playbook for a simulated failure.
    async fn playbook(&self, scan: &ScanResult, simulation: &SimulationResult) -> Result<Playbook>;

    /// Short description for logs and `Debug` output.
    fn describe(&self) -> String;
}
