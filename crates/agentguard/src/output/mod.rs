//! Output formatting for CLI commands.
//!
//! Every printer writes either human-readable text or pretty JSON for
//! programmatic use. Text output honors [`OutputConfig`] (width, ASCII icons,
//! color); JSON output is the serde form of the value.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)

pub mod color;

use crate::analysis::RiskReport;
use crate::domain::{Agent, AgentId, Dataset, Playbook, ScanResult, SimulationResult};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};

use color::{
    arrow, bold, bullet, colorize_impact, colorize_risk, colorize_score, colorize_severity,
    dimmed, warning_icon,
};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `AGENTGUARD_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `AGENTGUARD_ASCII`: Set to "1" or "true" for ASCII-only icons
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `AGENTGUARD_COLOR`: Set to "0" or "false" to disable colors
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_width = match lookup("AGENTGUARD_MAX_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(width) if width > 0 => width,
                _ => {
                    tracing::warn!(
                        env_var = "AGENTGUARD_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match lookup("AGENTGUARD_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "AGENTGUARD_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // https://no-color.org/
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("AGENTGUARD_COLOR")
                .is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Effective wrap width: the terminal width capped at `max_width`.
    fn width(&self) -> usize {
        get_terminal_width().min(self.max_width)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0)
        .into()
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    textwrap::wrap(text, max_width.max(20))
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(w, "{json}")
}

fn dispatch<T: Serialize>(
    value: &T,
    mode: OutputMode,
    text: impl FnOnce(&mut io::StdoutLock<'static>, &OutputConfig) -> io::Result<()>,
) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Text => text(&mut handle, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, value),
    }
}

#[derive(Serialize)]
struct DatasetInfo {
    name: Dataset,
    title: &'static str,
}

/// Print the built-in datasets.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_datasets(mode: OutputMode) -> io::Result<()> {
    let datasets: Vec<DatasetInfo> = Dataset::ALL
        .iter()
        .map(|d| DatasetInfo {
            name: *d,
            title: d.title(),
        })
        .collect();
    dispatch(&datasets, mode, |w, config| {
        print_datasets_text(w, &datasets, config)
    })
}

/// Print a scan summary.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_scan(scan: &ScanResult, mode: OutputMode) -> io::Result<()> {
    dispatch(scan, mode, |w, config| print_scan_text(w, scan, config))
}

/// Print a risk report.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_report(report: &RiskReport, mode: OutputMode) -> io::Result<()> {
    dispatch(report, mode, |w, config| print_report_text(w, report, config))
}

/// Print a failure simulation.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_simulation(simulation: &SimulationResult, mode: OutputMode) -> io::Result<()> {
    dispatch(simulation, mode, |w, config| {
        print_simulation_text(w, simulation, config)
    })
}

/// Print a recovery playbook.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_playbook(playbook: &Playbook, mode: OutputMode) -> io::Result<()> {
    dispatch(playbook, mode, |w, config| {
        print_playbook_text(w, playbook, config)
    })
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_datasets_text<W: Write>(
    w: &mut W,
    datasets: &[DatasetInfo],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold("Available datasets:", config))?;
    for dataset in datasets {
        writeln!(
            w,
            "  {:<12} {}",
            info(&dataset.name.to_string(), config),
            dataset.title
        )?;
    }
    Ok(())
}

fn print_scan_text<W: Write>(w: &mut W, scan: &ScanResult, config: &OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "{} {}",
        success("Scanned", config),
        bold(scan.demo_type.title(), config)
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Scan time:   ", config),
        scan.scan_time.to_rfc3339()
    )?;
    writeln!(w, "  {} {}", dimmed("Agents:      ", config), scan.total_agents)?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Dependencies:", config),
        scan.dependencies.len()
    )?;
    writeln!(
        w,
        "  {} {} critical, {} high",
        dimmed("Risk levels: ", config),
        scan.metrics.critical_agents,
        scan.metrics.high_risk_agents
    )?;
    writeln!(
        w,
        "  {} {} req/min, {} avg uptime",
        dimmed("Traffic:     ", config),
        scan.metrics.total_requests_per_min,
        scan.metrics.avg_uptime
    )?;

    if !scan.shadow_agents.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} {} shadow agent(s) found:",
            warning_icon(config),
            scan.total_shadow_agents
        )?;
        for agent in &scan.shadow_agents {
            writeln!(
                w,
                "  {} {} ({}) risk {}",
                bullet(config),
                agent.display_name(),
                info(agent.id.as_str(), config),
                colorize_risk(agent.risk_level, config)
            )?;
        }
    }
    Ok(())
}

fn print_report_text<W: Write>(
    w: &mut W,
    report: &RiskReport,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}/10 ({})",
        bold("Overall risk:", config),
        colorize_score(report.overall_score, config),
        colorize_severity(report.severity, config)
    )?;

    writeln!(w)?;
    writeln!(w, "{}", bold("Single points of failure:", config))?;
    if report.spof.is_empty() {
        writeln!(w, "  None")?;
    }
    for (rank, entry) in report.spof.iter().enumerate() {
        writeln!(
            w,
            "  {}. {} ({}) {} dependent(s)",
            rank + 1,
            entry.display_name,
            info(entry.agent_id.as_str(), config),
            entry.dependent_count
        )?;
    }

    writeln!(w)?;
    if report.has_cycles() {
        writeln!(
            w,
            "{} {}",
            warning_icon(config),
            error("Circular dependencies detected:", config)
        )?;
        let sep = format!(" {} ", arrow(config));
        for cycle in &report.cycles {
            let chain: Vec<&str> = cycle.ids().iter().map(AgentId::as_str).collect();
            writeln!(w, "  {} {}", bullet(config), chain.join(&sep))?;
        }
    } else {
        writeln!(w, "{}", success("No circular dependencies detected", config))?;
    }

    if !report.per_agent_score.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Agent scores:", config))?;
        let id_width = report
            .per_agent_score
            .keys()
            .map(|id| id.as_str().chars().count())
            .max()
            .unwrap_or(0);
        for (id, score) in &report.per_agent_score {
            writeln!(
                w,
                "  {:<id_width$}  {}",
                id.as_str(),
                colorize_score(*score, config)
            )?;
        }
    }
    Ok(())
}

fn print_simulation_text<W: Write>(
    w: &mut W,
    simulation: &SimulationResult,
    config: &OutputConfig,
) -> io::Result<()> {
    let failed = &simulation.failed_agent;
    let estimate = &simulation.impact_estimate;

    writeln!(
        w,
        "{} {} ({})",
        bold("Simulated failure:", config),
        failed.name,
        info(failed.id.as_str(), config)
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Impacted agents: ", config),
        simulation.impacted_count
    )?;
    writeln!(
        w,
        "  {} {}/10",
        dimmed("Blast radius:    ", config),
        colorize_score(simulation.blast_radius_score, config)
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Severity:        ", config),
        colorize_impact(estimate.severity, config)
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Revenue at risk: ", config),
        estimate.revenue_risk
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Recovery time:   ", config),
        estimate.estimated_recovery_time
    )?;

    if !simulation.impacted_workflows.is_empty() {
        writeln!(
            w,
            "  {} {}",
            dimmed("Workflows:       ", config),
            simulation.impacted_workflows.join(", ")
        )?;
    }

    if !simulation.impacted_agents.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Impacted:", config))?;
        let names: Vec<&str> = simulation
            .impacted_agents
            .iter()
            .map(Agent::display_name)
            .collect();
        for line in wrap_text(&names.join(", "), config.width().saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }
    Ok(())
}

fn print_playbook_text<W: Write>(
    w: &mut W,
    playbook: &Playbook,
    config: &OutputConfig,
) -> io::Result<()> {
    let width = config.width();

    writeln!(w, "{}", bold(&format!("Playbook: {}", playbook.incident), config))?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Severity:", config),
        colorize_impact(playbook.severity, config)
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Recovery:", config),
        playbook.estimated_recovery_time
    )?;

    for (n, step) in playbook.steps.iter().enumerate() {
        writeln!(w)?;
        writeln!(
            w,
            "{} {} ({})",
            bold(&format!("{}.", n + 1), config),
            bold(&step.phase, config),
            step.time_range
        )?;
        for action in &step.actions {
            writeln!(w, "  {} {}", bullet(config), action.action)?;
            writeln!(
                w,
                "    {} {}",
                dimmed("verify:", config),
                action.verification
            )?;
        }
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("Rollback:", config))?;
    for line in wrap_text(&playbook.rollback_plan, width.saturating_sub(2)) {
        writeln!(w, "  {line}")?;
    }

    if !playbook.escalation_contacts.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Escalate to:", config))?;
        for contact in &playbook.escalation_contacts {
            writeln!(w, "  {} {}", bullet(config), info(contact, config))?;
        }
    }

    if !playbook.audit_trail.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Audit trail:", config))?;
        for entry in &playbook.audit_trail {
            writeln!(w, "  {} {}", bullet(config), entry.title)?;
            for evidence in &entry.evidence {
                writeln!(w, "      {}", dimmed(evidence, config))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::GraphRiskAnalyzer;
    use crate::cascade::simulate_failure;
    use crate::domain::{Agent, Dependency, Ecosystem, RiskLevel};
    use crate::playbook::build_playbook;
    use chrono::Utc;
    use std::collections::HashMap;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, true, false)
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn cyclic() -> Ecosystem {
        Ecosystem::new(
            vec![
                Agent::new("cart", "CartAgent", "user_facing", RiskLevel::High),
                Agent::new("pricing", "PricingAgent", "core_service", RiskLevel::Critical),
                Agent::new("legacy", "Legacy", "shadow_agent", RiskLevel::Medium),
            ],
            vec![
                Dependency::new("cart", "pricing"),
                Dependency::new("pricing", "cart"),
            ],
        )
    }

    fn env(pairs: &[(&str, &str)]) -> OutputConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        OutputConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_output_config_defaults() {
        assert_eq!(env(&[]), OutputConfig::default());
    }

    #[test]
    fn test_output_config_from_env_values() {
        let config = env(&[("AGENTGUARD_MAX_WIDTH", "120"), ("AGENTGUARD_ASCII", "true")]);
        assert_eq!(config.max_width, 120);
        assert!(config.use_ascii);
        assert!(config.use_colors);
    }

    #[test]
    fn test_output_config_invalid_values_fall_back() {
        let config = env(&[("AGENTGUARD_MAX_WIDTH", "wide"), ("AGENTGUARD_ASCII", "maybe")]);
        assert_eq!(config.max_width, DEFAULT_MAX_CONTENT_WIDTH);
        assert!(!config.use_ascii);
    }

    #[test]
    fn test_output_config_color_switches() {
        assert!(!env(&[("NO_COLOR", "")]).use_colors);
        assert!(!env(&[("AGENTGUARD_COLOR", "false")]).use_colors);
        assert!(env(&[("AGENTGUARD_COLOR", "1")]).use_colors);
    }

    #[test]
    fn test_report_text_shows_cycle_and_spof() {
        let report = GraphRiskAnalyzer::default().analyze_ecosystem(&cyclic());
        let text = render(|w| print_report_text(w, &report, &plain()));

        assert!(text.contains("Overall risk: 4.3/10 (medium severity)"));
        assert!(text.contains("1. CartAgent (cart) 1 dependent(s)"));
        assert!(text.contains("cart -> pricing -> cart"));
    }

    #[test]
    fn test_report_text_without_cycles() {
        let report = GraphRiskAnalyzer::default().analyze(&[], &[]);
        let text = render(|w| print_report_text(w, &report, &plain()));
        assert!(text.contains("No circular dependencies detected"));
        assert!(text.contains("None"));
    }

    #[test]
    fn test_scan_text_lists_shadow_agents() {
        let scan = ScanResult::from_ecosystem(cyclic(), Dataset::Ecommerce, Utc::now());
        let text = render(|w| print_scan_text(w, &scan, &plain()));

        assert!(text.starts_with("Scanned E-commerce Platform"));
        assert!(text.contains("! 1 shadow agent(s) found:"));
        assert!(text.contains("* Legacy (legacy) risk medium"));
    }

    #[test]
    fn test_simulation_and_playbook_text() {
        let eco = cyclic();
        let sim = simulate_failure(&eco, "cart", Utc::now()).unwrap();
        let text = render(|w| print_simulation_text(w, &sim, &plain()));
        assert!(text.contains("Simulated failure: CartAgent (cart)"));
        assert!(text.contains("PricingAgent"));

        let playbook = build_playbook(&eco, &sim, Utc::now());
        let text = render(|w| print_playbook_text(w, &playbook, &plain()));
        assert!(text.contains("Playbook: CartAgent Failure"));
        assert!(text.contains("1. Immediate Containment (0-5 minutes)"));
        assert!(text.contains("Audit trail:"));
    }

    #[test]
    fn test_json_output_is_pretty_serde() {
        let report = GraphRiskAnalyzer::default().analyze_ecosystem(&cyclic());
        let text = render(|w| write_json(w, &report));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["cycles"][0], serde_json::json!(["cart", "pricing", "cart"]));
    }
}
