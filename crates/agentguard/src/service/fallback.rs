//! Provider that degrades to a fallback when data is unavailable.

use super::EcosystemService;
use crate::domain::{AgentId, Dataset, Playbook, ScanResult, SimulationResult};
use crate::error::{Error, Result};
use async_trait::async_trait;

/// Delegates to a primary provider and retries on a fallback provider when the
/// primary fails with `Error::DataUnavailable`. All other errors pass through.
pub struct FallbackService {
    primary: Box<dyn EcosystemService>,
    fallback: Box<dyn EcosystemService>,
}

impl std::fmt::Debug for FallbackService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackService")
            .field("primary", &self.primary.describe())
            .field("fallback", &self.fallback.describe())
            .finish()
    }
}

impl FallbackService {
    /// Wrap `primary`, serving `fallback` when its data is unavailable.
    pub fn new(primary: Box<dyn EcosystemService>, fallback: Box<dyn EcosystemService>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl EcosystemService for FallbackService {
    async fn scan(&self, dataset: Dataset) -> Result<ScanResult> {
        match self.primary.scan(dataset).await {
            Err(Error::DataUnavailable(reason)) => {
                tracing::warn!(
                    primary = %self.primary.describe(),
                    fallback = %self.fallback.describe(),
                    %reason,
                    "Ecosystem data unavailable, using fallback"
                );
                self.fallback.scan(dataset).await
            }
            other => other,
        }
    }

    async fn simulate(&self, scan: &ScanResult, agent_id: &AgentId) -> Result<SimulationResult> {
        match self.primary.simulate(scan, agent_id).await {
            Err(Error::DataUnavailable(reason)) => {
                tracing::warn!(%reason, "Simulation unavailable, using fallback");
                self.fallback.simulate(scan, agent_id).await
            }
            other => other,
        }
    }

    async fn playbook(&self, scan: &ScanResult, simulation: &SimulationResult) -> Result<Playbook> {
        match self.primary.playbook(scan, simulation).await {
            Err(Error::DataUnavailable(reason)) => {
                tracing::warn!(%reason, "Playbook unavailable, using fallback");
                self.fallback.playbook(scan, simulation).await
            }
            other => other,
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} (fallback: {})",
            self.primary.describe(),
            self.fallback.describe()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::LocalService;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_falls_back_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let service = FallbackService::new(
            Box::new(LocalService::from_file(temp_dir.path().join("none.json"))),
            Box::new(LocalService::demo()),
        );

        let scan = service.scan(Dataset::Ecommerce).await.unwrap();
        assert_eq!(scan.total_agents, 25);
    }

    #[tokio::test]
    async fn test_other_errors_pass_through() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "[]").unwrap();

        let service = FallbackService::new(
            Box::new(LocalService::from_file(&path)),
            Box::new(LocalService::demo()),
        );
        assert!(matches!(
            service.scan(Dataset::Ecommerce).await,
            Err(Error::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_agent_not_found_is_not_masked() {
        let service = FallbackService::new(
            Box::new(LocalService::demo()),
            Box::new(LocalService::demo()),
        );
        let scan = service.scan(Dataset::Content).await.unwrap();
        let result = service.simulate(&scan, &AgentId::from("nope")).await;
        assert!(matches!(result, Err(Error::AgentNotFound(_))));
    }

    #[test]
    fn test_debug_names_both_providers() {
        let service = FallbackService::new(
            Box::new(LocalService::from_file("eco.json")),
            Box::new(LocalService::demo()),
        );
        let debug = format!("{service:?}");
        assert!(debug.contains("eco.json"));
        assert!(debug.contains("demo datasets"));
    }
}
