//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::config::MAX_SPOF_LIMIT;

/// Maximum agent ID length
pub const MAX_AGENT_ID_LENGTH: usize = 128;

/// Validate an agent ID argument.
///
/// IDs are trimmed and must be non-empty, single-token and at most
/// `MAX_AGENT_ID_LENGTH` characters. Whether the agent exists is only known
/// after a scan.
///
/// # Errors
///
/// Returns a message describing the first rule the ID breaks.
pub fn validate_agent_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Agent ID cannot be empty".to_string());
    }

    if s.chars().count() > MAX_AGENT_ID_LENGTH {
        return Err(format!(
            "Agent ID cannot exceed {MAX_AGENT_ID_LENGTH} characters"
        ));
    }

    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(format!(
            "Invalid agent ID '{s}': whitespace and control characters are not allowed"
        ));
    }

    Ok(s.to_string())
}

/// Validate the number of single points of failure to report.
///
/// # Errors
///
/// Returns a message if the value is not a number in `1..=MAX_SPOF_LIMIT`.
pub fn validate_spof_limit(s: &str) -> Result<usize, String> {
    let limit: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if limit == 0 || limit > MAX_SPOF_LIMIT {
        return Err(format!(
            "SPOF limit must be between 1 and {MAX_SPOF_LIMIT}"
        ));
    }

    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("checkout-agent", "checkout-agent")]
    #[case::trimmed("  order-agent ", "order-agent")]
    #[case::dotted("legacy.pricing_v1", "legacy.pricing_v1")]
    fn test_validate_agent_id_valid(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_agent_id(input).unwrap(), expected);
    }

    #[rstest]
    #[case::empty("", "cannot be empty")]
    #[case::blank("   ", "cannot be empty")]
    #[case::space("order agent", "whitespace")]
    #[case::too_long(&"a".repeat(129), "cannot exceed 128")]
    fn test_validate_agent_id_invalid(#[case] input: &str, #[case] expected: &str) {
        let err = validate_agent_id(input).unwrap_err();
        assert!(err.contains(expected), "got: {err}");
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 5 ", 5)]
    #[case("100", 100)]
    fn test_validate_spof_limit_valid(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(validate_spof_limit(input).unwrap(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("101")]
    #[case("-1")]
    #[case("three")]
    fn test_validate_spof_limit_invalid(#[case] input: &str) {
        assert!(validate_spof_limit(input).is_err());
    }
}
