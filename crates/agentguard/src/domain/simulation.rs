//! Failure simulation results.

use super::{Agent, AgentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of simulating one agent's failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// The agent that was failed
    pub failed_agent: FailedAgent,

    /// Known agents reached from the failed one, in discovery order
    pub impacted_agents: Vec<Agent>,

    /// Number of impacted ids, including ones missing from the ecosystem
    pub impacted_count: usize,

    /// Share of the ecosystem impacted, scaled to 0-10
    pub blast_radius_score: f64,

    /// Business workflows the failed agent takes part in
    pub impacted_workflows: Vec<String>,

    /// Business impact estimate
    pub impact_estimate: ImpactEstimate,

    /// When the simulation ran
    pub simulation_time: DateTime<Utc>,
}

/// Identity of the failed agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedAgent {
    /// Agent id
    pub id: AgentId,
    /// Display name
    pub name: String,
    /// Agent type tag
    #[serde(rename = "type")]
    pub agent_type: String,
}

impl From<&Agent> for FailedAgent {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            name: agent.display_name().to_string(),
            agent_type: agent.agent_type.clone(),
        }
    }
}

/// Severity bucket for a simulated failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImpactSeverity {
    /// Five or fewer agents impacted
    Medium,
    /// Six to ten agents impacted
    High,
    /// More than ten agents impacted
    Critical,
}

impl fmt::Display for ImpactSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactSeverity::Medium => write!(f, "MEDIUM"),
            ImpactSeverity::High => write!(f, "HIGH"),
            ImpactSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Estimated business impact of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    /// Severity bucket
    pub severity: ImpactSeverity,
    /// Revenue at risk per hour, as a display range
    pub revenue_risk: String,
    /// Expected time to recover, as a display range
    pub estimated_recovery_time: String,
}
