//! In-process ecosystem provider.

use super::EcosystemService;
use crate::cascade::simulate_failure;
use crate::domain::{
    AgentId, Dataset, Ecosystem, EcosystemDocument, Playbook, ScanResult, SimulationResult,
};
use crate::error::{Error, Result};
use crate::playbook::build_playbook;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

const ECOMMERCE_JSON: &str = include_str!("../../fixtures/ecommerce.json");
const CONTENT_JSON: &str = include_str!("../../fixtures/content.json");

/// Where a [`LocalService`] reads its ecosystem from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Built-in datasets compiled into the binary
    Demo,
    /// A single ecosystem document on disk, served for every dataset
    File(PathBuf),
}

/// Serves scans from embedded demo data or a local file, and runs
/// simulations and playbook generation in-process.
#[derive(Debug, Clone)]
pub struct LocalService {
    source: DataSource,
}

impl LocalService {
    /// Provider for the built-in demo datasets.
    pub fn demo() -> Self {
        Self {
            source: DataSource::Demo,
        }
    }

    /// Provider reading an ecosystem document from `path` on every scan.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: DataSource::File(path.into()),
        }
    }

    /// The configured data source.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Parse the embedded document for a built-in dataset.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the embedded document is malformed.
    pub fn demo_ecosystem(dataset: Dataset) -> Result<Ecosystem> {
        let json = match dataset {
            Dataset::Ecommerce => ECOMMERCE_JSON,
            Dataset::Content => CONTENT_JSON,
        };
        Ok(EcosystemDocument::parse(json)?.into_ecosystem())
    }

    async fn load_file(path: &Path) -> Result<Ecosystem> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::DataUnavailable(format!("{}: {e}", path.display())))?;
        Ok(EcosystemDocument::parse(&content)?.into_ecosystem())
    }
}

impl Default for LocalService {
    fn default() -> Self {
        Self::demo()
    }
}

#[async_trait]
impl EcosystemService for LocalService {
    async fn scan(&self, dataset: Dataset) -> Result<ScanResult> {
        let ecosystem = match &self.source {
            DataSource::Demo => Self::demo_ecosystem(dataset)?,
            DataSource::File(path) => Self::load_file(path).await?,
        };

        tracing::info!(
            dataset = %dataset,
            agents = ecosystem.agents.len(),
            dependencies = ecosystem.dependencies.len(),
            "Scanned ecosystem"
        );

        Ok(ScanResult::from_ecosystem(ecosystem, dataset, Utc::now()))
    }

    async fn simulate(&self, scan: &ScanResult, agent_id: &AgentId) -> Result<SimulationResult> {
        simulate_failure(&scan.ecosystem(), agent_id.as_str(), Utc::now())
    }

    async fn playbook(&self, scan: &ScanResult, simulation: &SimulationResult) -> Result<Playbook> {
        Ok(build_playbook(&scan.ecosystem(), simulation, Utc::now()))
    }

    fn describe(&self) -> String {
        match &self.source {
            DataSource::Demo => "demo datasets".to_string(),
            DataSource::File(path) => format!("file {}", path.display()),
        }
    }
}
