//! Failure cascade (blast radius) simulation.
//!
//! A failure propagates along dependency edges from source to target, the
//! same direction the SPOF ranking counts. Every id reached from the failed
//! agent is impacted, including ids that are not part of the node set.

use crate::analysis::round_to_tenth;
use crate::domain::{
    AgentId, Ecosystem, FailedAgent, ImpactEstimate, ImpactSeverity, SimulationResult,
};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;

/// Multiplier applied to the impacted share of the ecosystem.
const BLAST_RADIUS_SCALE: f64 = 15.0;

/// Upper bound of the blast radius score.
const MAX_BLAST_RADIUS: f64 = 10.0;

/// Recovery estimate quoted for every simulated failure.
const ESTIMATED_RECOVERY_TIME: &str = "15-60 minutes";

/// Ids reachable from `failed_id`, in breadth-first discovery order.
///
/// # Errors
///
/// Returns `Error::AgentNotFound` if `failed_id` is not an agent of the
/// ecosystem.
pub fn impacted_ids(ecosystem: &Ecosystem, failed_id: &str) -> Result<Vec<AgentId>> {
    let failed = ecosystem
        .agent(failed_id)
        .ok_or_else(|| Error::AgentNotFound(AgentId::from(failed_id)))?;

    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    graph.add_node(failed.id.as_str());
    for dep in &ecosystem.dependencies {
        graph.add_edge(dep.from.as_str(), dep.to.as_str(), ());
    }

    let mut bfs = Bfs::new(&graph, failed.id.as_str());
    let mut impacted = Vec::new();
    while let Some(node) = bfs.next(&graph) {
        if node != failed.id.as_str() {
            impacted.push(AgentId::from(node));
        }
    }
    Ok(impacted)
}

/// `min(impacted / total * 15, 10)`, one decimal; zero for an empty ecosystem.
#[allow(clippy::cast_precision_loss)]
pub fn blast_radius_score(impacted: usize, total_agents: usize) -> f64 {
    if total_agents == 0 {
        return 0.0;
    }
    let ratio = impacted as f64 / total_agents as f64;
    round_to_tenth((ratio * BLAST_RADIUS_SCALE).min(MAX_BLAST_RADIUS))
}

/// Business impact bucket for a number of impacted agents.
pub fn estimate_impact(impacted: usize) -> ImpactEstimate {
    let (severity, revenue_risk) = if impacted > 10 {
        (ImpactSeverity::Critical, "$500K-2M/hour")
    } else if impacted > 5 {
        (ImpactSeverity::High, "$100K-500K/hour")
    } else {
        (ImpactSeverity::Medium, "$10K-100K/hour")
    };

    ImpactEstimate {
        severity,
        revenue_risk: revenue_risk.to_string(),
        estimated_recovery_time: ESTIMATED_RECOVERY_TIME.to_string(),
    }
}

/// Simulate the failure of one agent.
///
/// # Errors
///
/// Returns `Error::AgentNotFound` if `failed_id` is not an agent of the
/// ecosystem.
pub fn simulate_failure(
    ecosystem: &Ecosystem,
    failed_id: &str,
    simulation_time: DateTime<Utc>,
) -> Result<SimulationResult> {
    let impacted = impacted_ids(ecosystem, failed_id)?;
    let failed = ecosystem
        .agent(failed_id)
        .ok_or_else(|| Error::AgentNotFound(AgentId::from(failed_id)))?;

    let impacted_agents = impacted
        .iter()
        .filter_map(|id| ecosystem.agent(id.as_str()).cloned())
        .collect();

    tracing::info!(
        agent = %failed.id,
        impacted = impacted.len(),
        "Simulated agent failure"
    );

    Ok(SimulationResult {
        failed_agent: FailedAgent::from(failed),
        impacted_agents,
        impacted_count: impacted.len(),
        blast_radius_score: blast_radius_score(impacted.len(), ecosystem.agents.len()),
        impacted_workflows: ecosystem.workflows_containing(failed_id),
        impact_estimate: estimate_impact(impacted.len()),
        simulation_time,
    })
}
