//! Application context for CLI command execution.
//!
//! `App` wires the configuration to an [`EcosystemService`], a
//! [`GraphRiskAnalyzer`] and the [`SessionStore`], and runs the
//! scan → simulate → playbook flow against them.
//!
//! # Example
//!
//! ```no_run
//! use agentguard::app::App;
//! use agentguard::config::AgentGuardConfig;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut app = App::new(AgentGuardConfig::default());
//!     let session = app.scan(None).await?;
//!     println!("overall risk {}", session.report.overall_score);
//!     Ok(())
//! }
//! ```

use crate::analysis::GraphRiskAnalyzer;
use crate::config::AgentGuardConfig;
use crate::domain::{AgentId, Dataset, Playbook, SimulationResult};
use crate::error::Result;
use crate::service::{EcosystemService, FallbackService, LocalService};
use crate::store::{Session, SessionStore};

/// Application context for CLI operations.
pub struct App {
    config: AgentGuardConfig,

    /// The ecosystem provider (trait object so remote providers can be swapped in)
    service: Box<dyn EcosystemService>,

    analyzer: GraphRiskAnalyzer,

    store: SessionStore,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("service", &self.service.describe())
            .field("analyzer", &self.analyzer)
            .field("status", &self.store.status())
            .finish()
    }
}

impl App {
    /// Create an App from configuration.
    ///
    /// A configured `data-file` is read through [`LocalService::from_file`],
    /// wrapped in a [`FallbackService`] over the demo data when
    /// `fallback-to-demo` is set. Otherwise the demo datasets are served.
    pub fn new(config: AgentGuardConfig) -> Self {
        let service: Box<dyn EcosystemService> = match &config.data_file {
            Some(path) if config.fallback_to_demo => Box::new(FallbackService::new(
                Box::new(LocalService::from_file(path)),
                Box::new(LocalService::demo()),
            )),
            Some(path) => Box::new(LocalService::from_file(path)),
            None => Box::new(LocalService::demo()),
        };
        Self::with_service(config, service)
    }

    /// Create an App around an explicit provider.
    pub fn with_service(config: AgentGuardConfig, service: Box<dyn EcosystemService>) -> Self {
        let analyzer = GraphRiskAnalyzer::new(config.spof_limit);
        tracing::debug!(service = %service.describe(), spof_limit = config.spof_limit, "Created app");
        Self {
            config,
            service,
            analyzer,
            store: SessionStore::new(),
        }
    }

    /// Scan a dataset (the configured one when `None`) and make it the
    /// current session.
    ///
    /// # Errors
    ///
    /// Propagates provider errors; the previous session is kept on error.
    pub async fn scan(&mut self, dataset: Option<Dataset>) -> Result<&Session> {
        let dataset = dataset.unwrap_or(self.config.dataset);
        let scan = self.service.scan(dataset).await?;
        Ok(self.store.load_scan(scan, &self.analyzer))
    }

    /// Simulate the failure of an agent of the current scan.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoScan` before any scan, or `Error::AgentNotFound` for
    /// an id outside the current scan.
    pub async fn simulate(&mut self, agent_id: &AgentId) -> Result<&SimulationResult> {
        let simulation = {
            let scan = self.store.scan()?;
            self.service.simulate(scan, agent_id).await?
        };
        self.store.set_simulation(simulation)
    }

    /// Generate the playbook for the current simulation.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoScan` or `Error::NoSimulation` when the flow has not
    /// reached that point yet.
    pub async fn playbook(&mut self) -> Result<&Playbook> {
        let playbook = {
            let scan = self.store.scan()?;
            let simulation = self.store.simulation()?;
            self.service.playbook(scan, simulation).await?
        };
        self.store.set_playbook(playbook)
    }

    /// The loaded configuration.
    pub fn config(&self) -> &AgentGuardConfig {
        &self.config
    }

    /// The session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The analyzer used for every scan.
    pub fn analyzer(&self) -> &GraphRiskAnalyzer {
        &self.analyzer
    }
}
