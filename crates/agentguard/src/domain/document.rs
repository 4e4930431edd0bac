//! Ecosystem documents as they arrive from upstream sources.
//!
//! Two shapes are accepted:
//!
//! - **scan shape**: `{"agents": [...], "dependencies": [...]}`, which is also
//!   what a serialized [`super::ScanResult`] looks like;
//! - **graph shape**: `{"nodes": [{"id", "data": {"label", "type", "risk"}}],
//!   "edges": [{"source", "target", "data": {"type", "confidence"}}]}`, the
//!   payload a graph endpoint returns for rendering.
//!
//! The shape is chosen by the top-level key (`agents` or `nodes`) and then
//! decoded directly, so decoding errors name the offending field. Both shapes
//! normalize to an [`Ecosystem`].

use super::record::{first_risk_level, fraction, text};
use super::{Agent, AgentId, Dependency, Ecosystem};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;

/// A parsed ecosystem document in either supported shape.
#[derive(Debug, Clone)]
pub enum EcosystemDocument {
    /// Agents and dependencies listed directly
    Scan(ScanDocument),
    /// Rendering-oriented nodes and edges
    Graph(GraphDocument),
}

/// Scan-shaped document.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanDocument {
    agents: Vec<Agent>,
    #[serde(default)]
    dependencies: Vec<Dependency>,
    #[serde(default)]
    workflows: IndexMap<String, Vec<AgentId>>,
}

/// Graph-shaped document.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphDocument {
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphNode {
    id: AgentId,
    #[serde(default)]
    data: GraphNodeData,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GraphNodeData {
    #[serde(default)]
    label: Option<Value>,
    #[serde(rename = "type", default)]
    node_type: Option<Value>,
    #[serde(default)]
    risk_level: Option<Value>,
    #[serde(default)]
    risk: Option<Value>,
    #[serde(rename = "riskLevel", default)]
    risk_level_camel: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphEdge {
    source: AgentId,
    target: AgentId,
    #[serde(default)]
    data: GraphEdgeData,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GraphEdgeData {
    #[serde(rename = "type", alias = "kind", default)]
    kind: Option<Value>,
    #[serde(default)]
    confidence: Option<Value>,
}

impl EcosystemDocument {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the text is not valid JSON, has neither an
    /// `agents` nor a `nodes` key, or fails to decode as the selected shape.
    pub fn parse(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Decode an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`EcosystemDocument::parse`], minus the syntax errors.
    pub fn from_value(value: Value) -> Result<Self> {
        if value.get("agents").is_some() {
            Ok(EcosystemDocument::Scan(serde_json::from_value(value)?))
        } else if value.get("nodes").is_some() {
            Ok(EcosystemDocument::Graph(serde_json::from_value(value)?))
        } else {
            Err(Error::Json(serde_json::Error::custom(
                "expected an ecosystem document with an `agents` or `nodes` key",
            )))
        }
    }

    /// Normalize into an [`Ecosystem`], preserving node and edge order.
    pub fn into_ecosystem(self) -> Ecosystem {
        match self {
            EcosystemDocument::Scan(doc) => Ecosystem {
                agents: doc.agents,
                dependencies: doc.dependencies,
                workflows: doc.workflows,
            },
            EcosystemDocument::Graph(doc) => {
                let agents = doc
                    .nodes
                    .into_iter()
                    .map(|node| {
                        let data = node.data;
                        let mut agent = Agent::new(
                            node.id,
                            String::new(),
                            text(data.node_type).unwrap_or_else(|| "agent".to_string()),
                            first_risk_level([data.risk_level, data.risk, data.risk_level_camel]),
                        );
                        agent.name = text(data.label);
                        agent
                    })
                    .collect();
                let dependencies = doc
                    .edges
                    .into_iter()
                    .map(|edge| Dependency {
                        from: edge.source,
                        to: edge.target,
                        confidence: fraction(edge.data.confidence),
                        kind: text(edge.data.kind),
                    })
                    .collect();
                Ecosystem::new(agents, dependencies)
            }
        }
    }
}
