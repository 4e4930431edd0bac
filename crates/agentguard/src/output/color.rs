//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (low risk, completed steps)
//!   - Warning:   yellow  (medium/high risk, shadow agents)
//!   - Error:     red     (critical risk, high severity, cycles)
//!   - Info:      cyan    (agent ids, dataset names)
//!   - Muted:     dimmed  (field labels, evidence)
//!   - Emphasis:  bold    (section headers, scores)

use super::OutputConfig;
use crate::analysis::Severity;
use crate::domain::{ImpactSeverity, RiskLevel};
use colored::Colorize;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Color a risk level tag by severity.
pub(crate) fn colorize_risk(level: RiskLevel, config: &OutputConfig) -> String {
    let text = level.to_string();
    match level {
        RiskLevel::Critical => {
            if config.use_colors {
                text.red().bold().to_string()
            } else {
                text
            }
        }
        RiskLevel::High | RiskLevel::Medium => warning(&text, config),
        RiskLevel::Low => success(&text, config),
    }
}

/// Color a 0-10 score using the same bands as [`Severity`].
pub(crate) fn colorize_score(score: f64, config: &OutputConfig) -> String {
    let text = format!("{score:.1}");
    match Severity::from_score(score) {
        Severity::High => error(&text, config),
        Severity::Medium => warning(&text, config),
        Severity::Low => success(&text, config),
    }
}

pub(crate) fn colorize_severity(severity: Severity, config: &OutputConfig) -> String {
    match severity {
        Severity::High => error(severity.label(), config),
        Severity::Medium => warning(severity.label(), config),
        Severity::Low => success(severity.label(), config),
    }
}

pub(crate) fn colorize_impact(severity: ImpactSeverity, config: &OutputConfig) -> String {
    let text = severity.to_string();
    match severity {
        ImpactSeverity::Critical => {
            if config.use_colors {
                text.red().bold().to_string()
            } else {
                text
            }
        }
        ImpactSeverity::High => error(&text, config),
        ImpactSeverity::Medium => warning(&text, config),
    }
}

/// Arrow between agents in a chain, with ASCII fallback.
pub(crate) fn arrow(config: &OutputConfig) -> &'static str {
    if config.use_ascii { "->" } else { "→" }
}

/// List bullet, with ASCII fallback.
pub(crate) fn bullet(config: &OutputConfig) -> &'static str {
    if config.use_ascii { "*" } else { "•" }
}

/// Warning marker, with ASCII fallback.
pub(crate) fn warning_icon(config: &OutputConfig) -> String {
    let icon = if config.use_ascii { "!" } else { "⚠" };
    warning(icon, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, true, false)
    }

    #[rstest]
    #[case(RiskLevel::Critical, "critical")]
    #[case(RiskLevel::Low, "low")]
    fn test_colorize_risk_plain(#[case] level: RiskLevel, #[case] expected: &str) {
        assert_eq!(colorize_risk(level, &plain()), expected);
    }

    #[test]
    fn test_colorize_score_formats_one_decimal() {
        assert_eq!(colorize_score(7.0, &plain()), "7.0");
        assert_eq!(colorize_score(4.24, &plain()), "4.2");
    }

    #[test]
    fn test_ascii_fallbacks() {
        let config = plain();
        assert_eq!(arrow(&config), "->");
        assert_eq!(bullet(&config), "*");
        assert_eq!(warning_icon(&config), "!");

        let unicode = OutputConfig::new(80, false, false);
        assert_eq!(arrow(&unicode), "→");
    }

    #[test]
    fn test_colors_disabled_returns_plain_text() {
        let config = plain();
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(error("bad", &config), "bad");
        assert_eq!(info("id", &config), "id");
        assert_eq!(bold("title", &config), "title");
    }
}
