//! Dependent counting and single-point-of-failure ranking.
//!
//! # Counting direction
//!
//! The dependent count of an agent is the number of edges where it is the
//! **source**, i.e. how many edges point away from it. A reading of "how many
//! agents depend on me" would count incoming edges instead. Existing
//! consumers rank by the outgoing count, so that is what is computed here.

use crate::domain::{Agent, AgentId, Dependency};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

/// A ranked single point of failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpofEntry {
    /// Agent id
    pub agent_id: AgentId,
    /// Agent name, or the raw id when the agent is not in the node set
    pub display_name: String,
    /// Number of edges with this agent as source
    pub dependent_count: usize,
}

/// Count edges per source id.
///
/// Keys appear in order of first appearance as a source; ids with no
/// outgoing edges are absent (a count of zero).
pub fn compute_dependent_counts(dependencies: &[Dependency]) -> IndexMap<AgentId, usize> {
    let mut counts: IndexMap<AgentId, usize> = IndexMap::new();
    for dep in dependencies {
        *counts.entry(dep.from.clone()).or_insert(0) += 1;
    }
    counts
}

/// Rank the top `limit` agents by dependent count.
///
/// The sort is stable, so ties keep first-appearance order. Entries with a
/// zero count are never returned.
pub fn rank_spof(
    counts: &IndexMap<AgentId, usize>,
    agents: &[Agent],
    limit: usize,
) -> Vec<SpofEntry> {
    let mut by_id: HashMap<&str, &Agent> = HashMap::with_capacity(agents.len());
    for agent in agents {
        by_id.entry(agent.id.as_str()).or_insert(agent);
    }

    let mut ranked: Vec<(&AgentId, usize)> = counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(id, count)| (id, *count))
        .collect();
    ranked.sort_by_key(|&(_, count)| Reverse(count));

    ranked
        .into_iter()
        .take(limit)
        .map(|(id, count)| SpofEntry {
            agent_id: id.clone(),
            display_name: by_id
                .get(id.as_str())
                .map_or_else(|| id.to_string(), |a| a.display_name().to_string()),
            dependent_count: count,
        })
        .collect()
}
