//! Error types for agentguard operations.
//!
//! The risk analyzer itself is total and never returns an error. Everything
//! here belongs to the layers around it: loading ecosystem data, the session
//! store's ordering rules, and configuration.

use crate::domain::AgentId;
use std::io;
use thiserror::Error;

/// The error type for agentguard operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An ecosystem document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The ecosystem data source could not be reached or read.
    ///
    /// Callers surface this as a "data unavailable" state before any
    /// analysis runs; [`crate::service::FallbackService`] reacts to it by
    /// serving demo data instead.
    #[error("Ecosystem data unavailable: {0}")]
    DataUnavailable(String),

    /// Agent not found in the current ecosystem.
    #[error("Agent not found: {0}")]
    AgentNotFound(AgentId),

    /// An operation needed a scan but none has been loaded.
    #[error("No agents scanned yet")]
    NoScan,

    /// A playbook was requested before any failure was simulated.
    #[error("No simulation result available")]
    NoSimulation,
}

/// A specialized Result type for agentguard operations.
pub type Result<T> = std::result::Result<T, Error>;
