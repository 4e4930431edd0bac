//! Recovery playbook types.

use super::ImpactSeverity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A phased recovery plan for a simulated failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playbook {
    /// Incident title
    pub incident: String,
    /// Total expected recovery time
    pub estimated_recovery_time: String,
    /// Severity carried over from the simulation
    pub severity: ImpactSeverity,
    /// Ordered recovery phases
    pub steps: Vec<PlaybookStep>,
    /// What to do if recovery fails
    pub rollback_plan: String,
    /// Who to page, most relevant first
    pub escalation_contacts: Vec<String>,
    /// Evidence backing the assessment
    pub audit_trail: Vec<AuditEntry>,
    /// When the playbook was produced
    pub generated_at: DateTime<Utc>,
}

/// One phase of a playbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookStep {
    /// Phase title
    pub phase: String,
    /// Time window relative to incident start
    pub time_range: String,
    /// Actions to carry out in this phase
    pub actions: Vec<PlaybookAction>,
}

/// A single action with its check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookAction {
    /// What to do
    pub action: String,
    /// How to confirm it worked
    pub verification: String,
    /// What success looks like
    pub expected_outcome: String,
}

/// Kind of audit evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditKind {
    /// Evidence for an observed dependency
    Dependency,
    /// Evidence for a risk assessment
    Risk,
}

/// An audit-trail entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Evidence kind
    #[serde(rename = "type")]
    pub kind: AuditKind,
    /// Short title
    pub title: String,
    /// Supporting facts
    pub evidence: Vec<String>,
}
