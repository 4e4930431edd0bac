//! Lenient wire records for agents and dependencies.
//!
//! Upstream documents are hand-written or produced by different tools, so
//! only the ids are required. Everything else is read as a raw JSON value and
//! kept when it has a usable type; anything else is dropped instead of
//! rejecting the document.

use super::{Agent, AgentId, Dependency, RiskLevel};
use serde::Deserialize;
use serde_json::Value;

/// Agent as it appears on the wire.
#[derive(Debug, Deserialize)]
pub(super) struct AgentRecord {
    id: AgentId,
    #[serde(default)]
    name: Option<Value>,
    #[serde(rename = "type", default)]
    agent_type: Option<Value>,
    #[serde(default)]
    risk_level: Option<Value>,
    #[serde(default)]
    risk: Option<Value>,
    #[serde(rename = "riskLevel", default)]
    risk_level_camel: Option<Value>,
    #[serde(default)]
    version: Option<Value>,
    #[serde(default)]
    uptime: Option<Value>,
    #[serde(default)]
    requests_per_min: Option<Value>,
    #[serde(default)]
    avg_latency_ms: Option<Value>,
    #[serde(default)]
    last_deployed: Option<Value>,
    #[serde(default)]
    owner: Option<Value>,
}

impl From<AgentRecord> for Agent {
    fn from(record: AgentRecord) -> Self {
        Self {
            id: record.id,
            name: text(record.name),
            agent_type: text(record.agent_type).unwrap_or_else(|| "agent".to_string()),
            risk_level: first_risk_level([
                record.risk_level,
                record.risk,
                record.risk_level_camel,
            ]),
            version: text(record.version),
            uptime: uptime(record.uptime),
            requests_per_min: count(record.requests_per_min),
            avg_latency_ms: count(record.avg_latency_ms),
            last_deployed: text(record.last_deployed),
            owner: text(record.owner),
        }
    }
}

/// Dependency as it appears on the wire.
#[derive(Debug, Deserialize)]
pub(super) struct DependencyRecord {
    #[serde(alias = "from")]
    source: AgentId,
    #[serde(alias = "to")]
    target: AgentId,
    #[serde(default)]
    confidence: Option<Value>,
    #[serde(rename = "type", alias = "kind", default)]
    kind: Option<Value>,
}

impl From<DependencyRecord> for Dependency {
    fn from(record: DependencyRecord) -> Self {
        Self {
            from: record.source,
            to: record.target,
            confidence: fraction(record.confidence),
            kind: text(record.kind),
        }
    }
}

/// Resolve a risk level from candidate keys in precedence order.
///
/// The first candidate that is present, non-null and not an empty string
/// wins; its value is then parsed leniently.
pub(super) fn first_risk_level<const N: usize>(candidates: [Option<Value>; N]) -> RiskLevel {
    candidates
        .into_iter()
        .flatten()
        .find(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
        .map_or_else(RiskLevel::default, |v| RiskLevel::from(Some(v)))
}

/// Display text from a scalar value.
pub(super) fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Uptime as a percentage string; bare numbers get a `%` suffix.
fn uptime(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(format!("{n}%")),
        other => text(Some(other)),
    }
}

/// A non-negative count from a number or numeric string, rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(value: Option<Value>) -> Option<u64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then(|| n.round() as u64)
}

/// A finite number from a number or numeric string.
pub(super) fn fraction(value: Option<Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
