//! Risk scoring heuristics.
//!
//! The overall score is a bounded composite: criticality dominates and
//! ecosystem size adds a small long-tail term. The coefficients and the cap
//! are fixed so that scores stay comparable across releases.

use crate::domain::{Agent, AgentId, RiskLevel};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of every score.
pub const MAX_SCORE: f64 = 10.0;

/// Weight of each critical agent in the overall score.
pub const CRITICAL_WEIGHT: f64 = 2.5;

/// Weight of each high-risk agent in the overall score.
pub const HIGH_WEIGHT: f64 = 1.5;

/// Weight of each agent, regardless of level, in the overall score.
pub const SIZE_WEIGHT: f64 = 0.1;

/// Per-agent score added for each outgoing dependency.
pub const DEPENDENT_WEIGHT: f64 = 0.5;

/// Severity band of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Score below 4
    #[serde(rename = "low severity")]
    Low,
    /// Score in `[4, 7)`
    #[serde(rename = "medium severity")]
    Medium,
    /// Score of 7 or more
    #[serde(rename = "high severity")]
    High,
}

impl Severity {
    /// Band for a score; lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            Severity::High
        } else if score >= 4.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "low severity",
            Severity::Medium => "medium severity",
            Severity::High => "high severity",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Round to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Overall ecosystem risk:
/// `min(10, critical * 2.5 + high * 1.5 + total * 0.1)`, one decimal.
#[allow(clippy::cast_precision_loss)]
pub fn compute_overall_risk(agents: &[Agent]) -> f64 {
    let critical = agents
        .iter()
        .filter(|a| a.risk_level == RiskLevel::Critical)
        .count();
    let high = agents
        .iter()
        .filter(|a| a.risk_level == RiskLevel::High)
        .count();

    let raw = critical as f64 * CRITICAL_WEIGHT
        + high as f64 * HIGH_WEIGHT
        + agents.len() as f64 * SIZE_WEIGHT;
    round_to_tenth(raw.min(MAX_SCORE))
}

/// Starting point of an agent's score before dependents are added.
pub fn base_score(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::Critical => 9.0,
        RiskLevel::High => 7.5,
        RiskLevel::Medium => 4.5,
        RiskLevel::Low => 1.0,
    }
}

/// Score every agent in node order: base by level plus 0.5 per outgoing
/// dependency, capped at 10, one decimal.
#[allow(clippy::cast_precision_loss)]
pub fn per_agent_scores(
    agents: &[Agent],
    counts: &IndexMap<AgentId, usize>,
) -> IndexMap<AgentId, f64> {
    let mut scores = IndexMap::with_capacity(agents.len());
    for agent in agents {
        let dependents = counts.get(agent.id.as_str()).copied().unwrap_or(0);
        let raw = base_score(agent.risk_level) + dependents as f64 * DEPENDENT_WEIGHT;
        scores
            .entry(agent.id.clone())
            .or_insert_with(|| round_to_tenth(raw.min(MAX_SCORE)));
    }
    scores
}
