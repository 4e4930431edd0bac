//! Domain types for agent ecosystems.
//!
//! An ecosystem is a set of agents (nodes) and the directed dependencies
//! between them (edges). Everything else in the crate either derives data
//! from an [`Ecosystem`] or moves one around.

mod document;
mod playbook;
mod record;
mod scan;
mod simulation;

pub use document::EcosystemDocument;
pub use playbook::{AuditEntry, AuditKind, Playbook, PlaybookAction, PlaybookStep};
pub use scan::{ScanMetrics, ScanResult};
pub use simulation::{FailedAgent, ImpactEstimate, ImpactSeverity, SimulationResult};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Agent type tag that marks an undocumented agent discovered by a scan.
pub const SHADOW_AGENT_TYPE: &str = "shadow_agent";

/// Unique identifier for an agent
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    /// Create a new agent ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Categorical severity tag attached to an agent by upstream data.
///
/// Variants are ordered from least to most severe. Values that are missing,
/// `null`, non-string or unrecognized deserialize as [`RiskLevel::Medium`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "Option<serde_json::Value>")]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Medium risk (the default when upstream data omits a level)
    #[default]
    Medium,
    /// High risk
    High,
    /// Critical risk
    Critical,
}

impl RiskLevel {
    /// All levels, least severe first.
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    /// Parse a level, falling back to medium for anything unrecognized.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            other => Err(format!("unknown risk level '{other}'")),
        }
    }
}

impl From<Option<serde_json::Value>> for RiskLevel {
    fn from(value: Option<serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::String(s)) => RiskLevel::parse_lossy(&s),
            _ => RiskLevel::default(),
        }
    }
}

/// An agent in the ecosystem (a graph node).
///
/// On input the risk level is read from `risk_level`, then `risk`, then
/// `riskLevel`, and the first non-empty key wins; it is written back out as
/// `risk`. Only `id` is required: optional metadata of an unusable type is
/// dropped rather than rejecting the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "record::AgentRecord")]
pub struct Agent {
    /// Unique identifier
    pub id: AgentId,

    /// Human-readable name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form category tag (e.g. `core_service`, `shadow_agent`)
    #[serde(rename = "type")]
    pub agent_type: String,

    /// Risk level supplied by upstream data
    #[serde(rename = "risk")]
    pub risk_level: RiskLevel,

    /// Deployed version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Uptime as a percentage string (e.g. `"99.2%"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,

    /// Observed request rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_per_min: Option<u64>,

    /// Observed average latency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_latency_ms: Option<u64>,

    /// Last deployment timestamp (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_deployed: Option<String>,

    /// Owning team contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Agent {
    /// Create an agent with only the fields the analyzer reads.
    pub fn new(
        id: impl Into<AgentId>,
        name: impl Into<String>,
        agent_type: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            agent_type: agent_type.into(),
            risk_level,
            version: None,
            uptime: None,
            requests_per_min: None,
            avg_latency_ms: None,
            last_deployed: None,
            owner: None,
        }
    }

    /// Name for display, falling back to the raw id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }

    /// Whether the scan flagged this agent as undocumented.
    pub fn is_shadow(&self) -> bool {
        self.agent_type == SHADOW_AGENT_TYPE
    }

    /// Uptime parsed as a percentage, if present and well-formed.
    pub fn uptime_percent(&self) -> Option<f64> {
        self.uptime
            .as_deref()
            .and_then(|u| u.trim().trim_end_matches('%').parse().ok())
    }
}

/// A directed dependency between two agents (a graph edge).
///
/// Endpoints are accepted as `source`/`target` or `from`/`to`. Either end may
/// name an agent that is not part of the ecosystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "record::DependencyRecord")]
pub struct Dependency {
    /// Agent the edge starts at
    #[serde(rename = "source")]
    pub from: AgentId,

    /// Agent the edge points to
    #[serde(rename = "target")]
    pub to: AgentId,

    /// Discovery confidence in `[0, 1]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Interaction kind (e.g. `api_call`, `event`); informational only
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Dependency {
    /// Create a bare edge with no confidence or kind.
    pub fn new(from: impl Into<AgentId>, to: impl Into<AgentId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            confidence: None,
            kind: None,
        }
    }
}

/// Agents and dependencies in input order, plus named business workflows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ecosystem {
    /// All agents
    pub agents: Vec<Agent>,

    /// All dependency edges
    pub dependencies: Vec<Dependency>,

    /// Workflow name to member agent ids
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub workflows: IndexMap<String, Vec<AgentId>>,
}

impl Ecosystem {
    /// Create an ecosystem without workflows.
    pub fn new(agents: Vec<Agent>, dependencies: Vec<Dependency>) -> Self {
        Self {
            agents,
            dependencies,
            workflows: IndexMap::new(),
        }
    }

    /// Look up an agent by id.
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id.as_str() == id)
    }

    /// Agents flagged as shadow agents, in input order.
    pub fn shadow_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.is_shadow())
    }

    /// Workflows that list the given agent as a member.
    pub fn workflows_containing(&self, id: &str) -> Vec<String> {
        self.workflows
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m.as_str() == id))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Built-in demo datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// E-commerce platform
    #[default]
    Ecommerce,
    /// AI content pipeline
    Content,
}

impl Dataset {
    /// All built-in datasets.
    pub const ALL: [Dataset; 2] = [Dataset::Ecommerce, Dataset::Content];

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Dataset::Ecommerce => "E-commerce Platform",
            Dataset::Content => "AI Content Pipeline",
        }
    }

    /// Resolve a dataset name, using ecommerce for unknown names.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(dataset = %name, "Unknown dataset, using ecommerce");
            Dataset::Ecommerce
        })
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Ecommerce => write!(f, "ecommerce"),
            Dataset::Content => write!(f, "content"),
        }
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ecommerce" => Ok(Dataset::Ecommerce),
            "content" => Ok(Dataset::Content),
            other => Err(format!("unknown dataset '{other}'")),
        }
    }
}
