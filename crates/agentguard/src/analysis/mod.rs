//! Graph risk analysis.
//!
//! [`GraphRiskAnalyzer`] turns a node set (agents) and an edge set
//! (dependencies) into a [`RiskReport`]:
//!
//! - a score per agent,
//! - an overall ecosystem score with its [`Severity`] band,
//! - the top single points of failure ([`SpofEntry`]),
//! - up to three circular dependency chains ([`DependencyCycle`]).
//!
//! Analysis is a pure function of its inputs. It never fails: dangling edge
//! endpoints resolve to their raw id, a missing risk level counts as medium,
//! and empty input yields a zero score with empty lists.
//!
//! # Example
//!
//! ```
//! use agentguard::analysis::GraphRiskAnalyzer;
//! use agentguard::domain::{Agent, Dependency, RiskLevel};
//!
//! let agents = vec![
//!     Agent::new("cart", "CartAgent", "user_facing", RiskLevel::High),
//!     Agent::new("pricing", "PricingAgent", "core_service", RiskLevel::Critical),
//! ];
//! let deps = vec![
//!     Dependency::new("cart", "pricing"),
//!     Dependency::new("pricing", "cart"),
//! ];
//!
//! let report = GraphRiskAnalyzer::default().analyze(&agents, &deps);
//! assert_eq!(report.overall_score, 4.2);
//! assert_eq!(report.cycles[0].to_string(), "cart → pricing → cart");
//! ```

mod cycles;
mod score;
mod spof;

pub use cycles::{DependencyCycle, MAX_REPORTED_CYCLES, detect_cycles};
pub use score::{
    CRITICAL_WEIGHT, DEPENDENT_WEIGHT, HIGH_WEIGHT, MAX_SCORE, SIZE_WEIGHT, Severity, base_score,
    compute_overall_risk, per_agent_scores, round_to_tenth,
};
pub use spof::{SpofEntry, compute_dependent_counts, rank_spof};

use crate::domain::{Agent, AgentId, Dependency, Ecosystem};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default number of single points of failure reported.
pub const DEFAULT_SPOF_LIMIT: usize = 3;

/// Risk analysis of one ecosystem snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Score per agent, in node order
    pub per_agent_score: IndexMap<AgentId, f64>,

    /// Overall ecosystem score, 0.0 to 10.0 with one decimal
    pub overall_score: f64,

    /// Severity band of the overall score
    pub severity: Severity,

    /// Top single points of failure, highest count first
    pub spof: Vec<SpofEntry>,

    /// Detected dependency cycles, in discovery order
    pub cycles: Vec<DependencyCycle>,
}

impl RiskReport {
    /// Whether any circular dependency was detected.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Computes [`RiskReport`]s. Holds configuration only, never results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphRiskAnalyzer {
    spof_limit: usize,
}

impl Default for GraphRiskAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_SPOF_LIMIT)
    }
}

impl GraphRiskAnalyzer {
    /// Create an analyzer reporting at most `spof_limit` single points of
    /// failure.
    #[must_use]
    pub fn new(spof_limit: usize) -> Self {
        Self { spof_limit }
    }

    /// Configured SPOF limit.
    #[must_use]
    pub fn spof_limit(&self) -> usize {
        self.spof_limit
    }

    /// Analyze a node set and edge set.
    #[must_use]
    pub fn analyze(&self, agents: &[Agent], dependencies: &[Dependency]) -> RiskReport {
        let counts = compute_dependent_counts(dependencies);
        let overall_score = compute_overall_risk(agents);

        let report = RiskReport {
            per_agent_score: per_agent_scores(agents, &counts),
            overall_score,
            severity: Severity::from_score(overall_score),
            spof: rank_spof(&counts, agents, self.spof_limit),
            cycles: detect_cycles(dependencies),
        };

        tracing::debug!(
            agents = agents.len(),
            dependencies = dependencies.len(),
            overall_score = report.overall_score,
            spof = report.spof.len(),
            cycles = report.cycles.len(),
            "Analyzed ecosystem"
        );

        report
    }

    /// Analyze an [`Ecosystem`].
    #[must_use]
    pub fn analyze_ecosystem(&self, ecosystem: &Ecosystem) -> RiskReport {
        self.analyze(&ecosystem.agents, &ecosystem.dependencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;

    #[test]
    fn test_empty_input() {
        let report = GraphRiskAnalyzer::default().analyze(&[], &[]);
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.severity, Severity::Low);
        assert!(report.spof.is_empty());
        assert!(report.cycles.is_empty());
        assert!(report.per_agent_score.is_empty());
    }

    #[test]
    fn test_spof_limit_is_respected() {
        let deps: Vec<Dependency> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| Dependency::new(*id, "hub"))
            .collect();
        let report = GraphRiskAnalyzer::new(2).analyze(&[], &deps);
        assert_eq!(report.spof.len(), 2);
    }

    #[test]
    fn test_report_serializes_with_snake_case_keys() {
        let agents = vec![Agent::new("a", "Alpha", "agent", RiskLevel::High)];
        let deps = vec![Dependency::new("a", "b")];
        let report = GraphRiskAnalyzer::default().analyze(&agents, &deps);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["overall_score"], 1.6);
        assert_eq!(json["severity"], "low severity");
        assert_eq!(json["spof"][0]["display_name"], "Alpha");
        assert_eq!(json["spof"][0]["dependent_count"], 1);
        assert_eq!(json["per_agent_score"]["a"], 8.0);
        assert!(json["cycles"].as_array().unwrap().is_empty());
    }
}
