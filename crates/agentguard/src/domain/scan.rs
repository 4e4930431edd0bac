//! Scan results: the discovered ecosystem plus summary metrics.

use super::{Agent, AgentId, Dataset, Dependency, Ecosystem, RiskLevel};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Output of an ecosystem scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Whether the scan completed
    pub success: bool,

    /// Number of agents discovered
    pub total_agents: usize,

    /// Number of shadow agents among them
    pub total_shadow_agents: usize,

    /// All discovered agents
    pub agents: Vec<Agent>,

    /// The shadow agents, repeated for convenience
    pub shadow_agents: Vec<Agent>,

    /// Discovered dependency edges
    pub dependencies: Vec<Dependency>,

    /// Named workflows and their member agents
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub workflows: IndexMap<String, Vec<AgentId>>,

    /// When the scan ran
    pub scan_time: DateTime<Utc>,

    /// Dataset the scan was served from
    pub demo_type: Dataset,

    /// Summary metrics
    pub metrics: ScanMetrics,
}

/// Aggregate operational metrics over all scanned agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanMetrics {
    /// Sum of request rates
    pub total_requests_per_min: u64,

    /// Mean uptime formatted as `"NN.N%"`, or `"N/A"` when no agent reports one
    pub avg_uptime: String,

    /// Number of critical agents
    pub critical_agents: usize,

    /// Number of high-risk agents
    pub high_risk_agents: usize,
}

impl ScanMetrics {
    /// Compute metrics for a set of agents.
    pub fn from_agents(agents: &[Agent]) -> Self {
        let uptimes: Vec<f64> = agents.iter().filter_map(Agent::uptime_percent).collect();
        let avg_uptime = if uptimes.is_empty() {
            "N/A".to_string()
        } else {
            #[allow(clippy::cast_precision_loss)]
            let mean = uptimes.iter().sum::<f64>() / uptimes.len() as f64;
            format!("{mean:.1}%")
        };

        Self {
            total_requests_per_min: agents.iter().filter_map(|a| a.requests_per_min).sum(),
            avg_uptime,
            critical_agents: count_level(agents, RiskLevel::Critical),
            high_risk_agents: count_level(agents, RiskLevel::High),
        }
    }
}

fn count_level(agents: &[Agent], level: RiskLevel) -> usize {
    agents.iter().filter(|a| a.risk_level == level).count()
}

impl ScanResult {
    /// Build a scan result for an ecosystem discovered at `scan_time`.
    pub fn from_ecosystem(ecosystem: Ecosystem, dataset: Dataset, scan_time: DateTime<Utc>) -> Self {
        let shadow_agents: Vec<Agent> = ecosystem.shadow_agents().cloned().collect();
        let metrics = ScanMetrics::from_agents(&ecosystem.agents);

        Self {
            success: true,
            total_agents: ecosystem.agents.len(),
            total_shadow_agents: shadow_agents.len(),
            shadow_agents,
            metrics,
            agents: ecosystem.agents,
            dependencies: ecosystem.dependencies,
            workflows: ecosystem.workflows,
            scan_time,
            demo_type: dataset,
        }
    }

    /// The ecosystem this scan describes.
    pub fn ecosystem(&self) -> Ecosystem {
        Ecosystem {
            agents: self.agents.clone(),
            dependencies: self.dependencies.clone(),
            workflows: self.workflows.clone(),
        }
    }

    /// Look up a scanned agent by id.
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id.as_str() == id)
    }
}
