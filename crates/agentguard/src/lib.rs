//! AgentGuard - dependency risk analysis for AI agent ecosystems.
//!
//! An ecosystem is a directed graph: agents are nodes, dependencies are edges.
//! This crate scores the risk of such a graph ([`analysis`]), simulates
//! cascading failures ([`cascade`]) and templates recovery playbooks
//! ([`playbook`]). Ecosystem data comes from an [`service::EcosystemService`];
//! the [`app::App`] context ties provider, analyzer and session state together
//! for the `agentguard` CLI.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod analysis;
pub mod cascade;
pub mod domain;
pub mod error;
pub mod playbook;
pub mod service;
pub mod store;

// Application wiring used by the binary
pub mod app;
pub mod cli;
pub mod config;
pub mod output;
