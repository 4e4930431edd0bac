//! Recovery playbook templating.
//!
//! Playbooks are built from a [`SimulationResult`] and the ecosystem it ran
//! against. The phases are a fixed template naming the failed agent; the
//! escalation contacts and audit trail come from the ecosystem data.

use crate::domain::{
    AuditEntry, AuditKind, Ecosystem, Playbook, PlaybookAction, PlaybookStep, SimulationResult,
};
use chrono::{DateTime, Utc};

/// Owner value used by scans for agents nobody claims.
const UNKNOWN_OWNER: &str = "unknown";

fn action(action: String, verification: &str, expected_outcome: &str) -> PlaybookAction {
    PlaybookAction {
        action,
        verification: verification.to_string(),
        expected_outcome: expected_outcome.to_string(),
    }
}

fn recovery_steps(name: &str) -> Vec<PlaybookStep> {
    vec![
        PlaybookStep {
            phase: "Immediate Containment".to_string(),
            time_range: "0-5 minutes".to_string(),
            actions: vec![
                action(
                    format!("Switch {name} to cached/fallback mode"),
                    "Error rate drops below 1%",
                    &format!("{name} serves fallback responses"),
                ),
                action(
                    "Pause downstream triggers to prevent cascade".to_string(),
                    "Downstream agents stable",
                    "No new failures propagate",
                ),
                action(
                    "Enable circuit breaker for affected services".to_string(),
                    "Circuit breaker open on failing calls",
                    "Callers fail fast instead of timing out",
                ),
            ],
        },
        PlaybookStep {
            phase: "Activate Backup System".to_string(),
            time_range: "5-15 minutes".to_string(),
            actions: vec![
                action(
                    format!("Deploy backup {name} instance"),
                    "Backup instance healthy",
                    "Backup passes health checks",
                ),
                action(
                    "Route 10% traffic for testing".to_string(),
                    "Error rate < 0.1%, response time < 200ms",
                    "Backup handles canary traffic",
                ),
                action(
                    "Validate data consistency".to_string(),
                    "Data sync complete",
                    "No divergence between primary and backup",
                ),
            ],
        },
        PlaybookStep {
            phase: "Full Recovery".to_string(),
            time_range: "15-30 minutes".to_string(),
            actions: vec![
                action(
                    "Route 100% traffic to backup system".to_string(),
                    "All agents healthy",
                    "Full traffic served without errors",
                ),
                action(
                    "Re-enable downstream triggers and clear circuit breakers".to_string(),
                    "Workflows operational",
                    "Dependent agents resume normal operation",
                ),
                action(
                    "Monitor for 10 minutes".to_string(),
                    "Cascade risk score < 2.0, no error spikes",
                    "Incident can be closed",
                ),
            ],
        },
    ]
}

fn escalation_contacts(ecosystem: &Ecosystem, simulation: &SimulationResult) -> Vec<String> {
    let failed_owner = ecosystem
        .agent(simulation.failed_agent.id.as_str())
        .and_then(|a| a.owner.as_deref());
    let impacted_owners = simulation
        .impacted_agents
        .iter()
        .filter_map(|a| a.owner.as_deref());

    let mut contacts: Vec<String> = Vec::new();
    for owner in failed_owner.into_iter().chain(impacted_owners) {
        if owner != UNKNOWN_OWNER && !contacts.iter().any(|c| c == owner) {
            contacts.push(owner.to_string());
        }
    }
    contacts
}

fn audit_trail(ecosystem: &Ecosystem, simulation: &SimulationResult) -> Vec<AuditEntry> {
    let failed = &simulation.failed_agent;
    let display = |id: &str| {
        ecosystem
            .agent(id)
            .map_or_else(|| id.to_string(), |a| a.display_name().to_string())
    };

    let mut entries: Vec<AuditEntry> = ecosystem
        .dependencies
        .iter()
        .filter(|d| d.from == failed.id)
        .map(|dep| {
            let mut evidence = vec![format!(
                "Interaction: {}",
                dep.kind.as_deref().unwrap_or("unspecified")
            )];
            if let Some(confidence) = dep.confidence {
                evidence.push(format!("Confidence: {:.0}%", confidence * 100.0));
            }
            AuditEntry {
                kind: AuditKind::Dependency,
                title: format!("Dependency: {} → {}", failed.name, display(dep.to.as_str())),
                evidence,
            }
        })
        .collect();

    entries.push(AuditEntry {
        kind: AuditKind::Risk,
        title: format!("Risk Assessment: {}", failed.name),
        evidence: vec![
            format!("Downstream agents: {}", simulation.impacted_count),
            format!("Blast radius: {:.1}/10", simulation.blast_radius_score),
            format!("Impact severity: {}", simulation.impact_estimate.severity),
        ],
    });
    entries
}

/// Build the recovery playbook for a simulated failure.
pub fn build_playbook(
    ecosystem: &Ecosystem,
    simulation: &SimulationResult,
    generated_at: DateTime<Utc>,
) -> Playbook {
    let name = simulation.failed_agent.name.as_str();

    Playbook {
        incident: format!("{name} Failure"),
        estimated_recovery_time: "15-30 minutes".to_string(),
        severity: simulation.impact_estimate.severity,
        steps: recovery_steps(name),
        rollback_plan: format!(
            "Revert traffic to the last known-good {name} deployment and restore paused \
             downstream triggers one at a time."
        ),
        escalation_contacts: escalation_contacts(ecosystem, simulation),
        audit_trail: audit_trail(ecosystem, simulation),
        generated_at,
    }
}
