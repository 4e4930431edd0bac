//! Session state: the current scan and everything derived from it.
//!
//! The store holds at most one session. Loading a scan replaces the whole
//! session in one step, so a report, simulation or playbook can never refer
//! to a different scan than the one it sits next to.

use crate::analysis::{GraphRiskAnalyzer, RiskReport};
use crate::domain::{AgentId, Ecosystem, Playbook, ScanResult, SimulationResult};
use crate::error::{Error, Result};
use serde::Serialize;

/// Everything known about the currently loaded scan.
#[derive(Debug, Clone)]
pub struct Session {
    /// The scan as received
    pub scan: ScanResult,
    /// Ecosystem view of the scan
    pub ecosystem: Ecosystem,
    /// Risk report computed when the scan was loaded
    pub report: RiskReport,
    /// Last simulated failure, if any
    pub simulation: Option<SimulationResult>,
    /// Playbook for the last simulation, if generated
    pub playbook: Option<Playbook>,
}

/// Which parts of the session are populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    /// A scan is loaded
    pub scanned: bool,
    /// A failure has been simulated against it
    pub simulated: bool,
    /// A playbook has been generated for that failure
    pub playbook: bool,
}

/// Owner of the single current [`Session`].
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Option<Session>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session with a freshly analyzed scan.
    ///
    /// Any previous simulation and playbook are discarded.
    pub fn load_scan(&mut self, scan: ScanResult, analyzer: &GraphRiskAnalyzer) -> &Session {
        let ecosystem = scan.ecosystem();
        let report = analyzer.analyze_ecosystem(&ecosystem);

        tracing::debug!(
            dataset = %scan.demo_type,
            agents = scan.total_agents,
            overall_score = report.overall_score,
            "Loaded scan into session"
        );

        self.session.insert(Session {
            scan,
            ecosystem,
            report,
            simulation: None,
            playbook: None,
        })
    }

    /// Record a simulation result against the current scan.
    ///
    /// Clears any playbook generated for an earlier simulation.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoScan` if no scan is loaded, or
    /// `Error::AgentNotFound` if the failed agent is not part of the scan.
    /// The store is unchanged on error.
    pub fn set_simulation(&mut self, simulation: SimulationResult) -> Result<&SimulationResult> {
        let session = self.session.as_mut().ok_or(Error::NoScan)?;
        let failed_id = &simulation.failed_agent.id;
        if session.ecosystem.agent(failed_id.as_str()).is_none() {
            return Err(Error::AgentNotFound(failed_id.clone()));
        }

        session.playbook = None;
        Ok(session.simulation.insert(simulation))
    }

    /// Record the playbook for the current simulation.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoScan` if no scan is loaded, or `Error::NoSimulation`
    /// if no failure has been simulated yet.
    pub fn set_playbook(&mut self, playbook: Playbook) -> Result<&Playbook> {
        let session = self.session.as_mut().ok_or(Error::NoScan)?;
        if session.simulation.is_none() {
            return Err(Error::NoSimulation);
        }
        Ok(session.playbook.insert(playbook))
    }

    /// Drop the current session.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Which parts of the session are populated.
    pub fn status(&self) -> SessionStatus {
        self.session
            .as_ref()
            .map_or_else(SessionStatus::default, |s| SessionStatus {
                scanned: true,
                simulated: s.simulation.is_some(),
                playbook: s.playbook.is_some(),
            })
    }

    /// The current session, if a scan is loaded.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The current scan.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoScan` if no scan is loaded.
    pub fn scan(&self) -> Result<&ScanResult> {
        self.session.as_ref().map(|s| &s.scan).ok_or(Error::NoScan)
    }

    /// The risk report of the current scan.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoScan` if no scan is loaded.
    pub fn report(&self) -> Result<&RiskReport> {
        self.session.as_ref().map(|s| &s.report).ok_or(Error::NoScan)
    }

    /// The current simulation.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoScan` if no scan is loaded, or `Error::NoSimulation`
    /// if none has been recorded.
    pub fn simulation(&self) -> Result<&SimulationResult> {
        let session = self.session.as_ref().ok_or(Error::NoScan)?;
        session.simulation.as_ref().ok_or(Error::NoSimulation)
    }

    /// The current playbook, if generated.
    pub fn playbook(&self) -> Option<&Playbook> {
        self.session.as_ref().and_then(|s| s.playbook.as_ref())
    }

    /// Whether `id` names an agent of the current scan.
    pub fn contains_agent(&self, id: &AgentId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.ecosystem.agent(id.as_str()).is_some())
    }
}
