//! Integration tests for the agentguard CLI.
//!
//! These tests drive the built binary end to end.

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{json_stdout, run_agentguard_in_dir};

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Help and Version
// ============================================================================

#[rstest]
fn test_cli_help_shows_all_commands(temp_dir: TempDir) {
    let output = run_agentguard_in_dir(temp_dir.path(), &["--help"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Usage:"));
    for command in ["init", "datasets", "scan", "analyze", "simulate", "playbook"] {
        assert!(text.contains(command), "Help should show '{command}' command");
    }
}

#[rstest]
fn test_cli_version(temp_dir: TempDir) {
    let output = run_agentguard_in_dir(temp_dir.path(), &["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[rstest]
fn test_cli_no_args(temp_dir: TempDir) {
    let output = run_agentguard_in_dir(temp_dir.path(), &[]);
    assert!(output.status.success());
}

// ============================================================================
// init
// ============================================================================

#[rstest]
fn test_init_writes_config_once(temp_dir: TempDir) {
    let output = run_agentguard_in_dir(temp_dir.path(), &["init"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let config = std::fs::read_to_string(temp_dir.path().join("agentguard.yaml")).unwrap();
    assert!(config.contains("spof-limit: 3"));
    assert!(config.contains("dataset: ecommerce"));

    let again = run_agentguard_in_dir(temp_dir.path(), &["init"]);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("already exists"));

    let forced = run_agentguard_in_dir(temp_dir.path(), &["init", "--force", "--quiet"]);
    assert!(forced.status.success());
    assert!(stdout(&forced).is_empty());
}

// ============================================================================
// datasets / scan / analyze
// ============================================================================

#[rstest]
fn test_datasets_json(temp_dir: TempDir) {
    let value = json_stdout(&run_agentguard_in_dir(
        temp_dir.path(),
        &["--json", "datasets"],
    ));
    assert_eq!(value[0]["name"], "ecommerce");
    assert_eq!(value[1]["title"], "AI Content Pipeline");
}

#[rstest]
fn test_scan_text_reports_shadow_agents(temp_dir: TempDir) {
    let output = run_agentguard_in_dir(temp_dir.path(), &["scan"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Scanned E-commerce Platform"));
    assert!(text.contains("4 shadow agent(s) found"));
}

#[rstest]
#[case::ecommerce("ecommerce", "inventory-agent")]
#[case::content("content", "quality-checker")]
fn test_analyze_json(temp_dir: TempDir, #[case] dataset: &str, #[case] top_spof: &str) {
    let value = json_stdout(&run_agentguard_in_dir(
        temp_dir.path(),
        &["analyze", "--json", "--dataset", dataset],
    ));
    assert_eq!(value["overall_score"], 10.0);
    assert_eq!(value["severity"], "high severity");
    assert_eq!(value["spof"][0]["agent_id"], top_spof);
    assert_eq!(value["spof"].as_array().unwrap().len(), 3);
    assert!(value["cycles"].as_array().unwrap().is_empty());
}

#[rstest]
fn test_analyze_spof_limit_flag(temp_dir: TempDir) {
    let value = json_stdout(&run_agentguard_in_dir(
        temp_dir.path(),
        &["--json", "analyze", "--spof-limit", "5"],
    ));
    assert_eq!(value["spof"].as_array().unwrap().len(), 5);
}

#[rstest]
fn test_config_file_selects_dataset(temp_dir: TempDir) {
    std::fs::write(
        temp_dir.path().join("agentguard.yaml"),
        "dataset: content\nspof-limit: 1\n",
    )
    .unwrap();

    let value = json_stdout(&run_agentguard_in_dir(temp_dir.path(), &["--json", "analyze"]));
    assert_eq!(value["spof"].as_array().unwrap().len(), 1);
    assert_eq!(value["spof"][0]["agent_id"], "quality-checker");
}

#[rstest]
fn test_analyze_file_with_cycle(temp_dir: TempDir) {
    std::fs::write(
        temp_dir.path().join("eco.json"),
        r#"{"agents": [{"id": "a", "risk": "high"}, {"id": "b"}],
            "dependencies": [{"source": "a", "target": "b"}, {"source": "b", "target": "a"}]}"#,
    )
    .unwrap();

    let output = run_agentguard_in_dir(temp_dir.path(), &["analyze", "--file", "eco.json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("a -> b -> a"));
}

#[rstest]
fn test_analyze_file_with_loose_agent_metadata(temp_dir: TempDir) {
    std::fs::write(
        temp_dir.path().join("eco.json"),
        r#"{"agents": [{"id": "a", "risk_level": "critical", "risk": "high", "requests_per_min": 12.5}],
            "dependencies": []}"#,
    )
    .unwrap();

    let value = json_stdout(&run_agentguard_in_dir(
        temp_dir.path(),
        &["--json", "analyze", "--file", "eco.json"],
    ));
    assert_eq!(value["overall_score"], 2.6);
}

#[rstest]
fn test_malformed_file_error_names_field(temp_dir: TempDir) {
    std::fs::write(
        temp_dir.path().join("eco.json"),
        r#"{"agents": [{"name": "nameless"}], "dependencies": []}"#,
    )
    .unwrap();

    let output = run_agentguard_in_dir(temp_dir.path(), &["scan", "--file", "eco.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("missing field `id`"));
}

#[rstest]
fn test_missing_file_flag_fails_without_fallback(temp_dir: TempDir) {
    let output = run_agentguard_in_dir(temp_dir.path(), &["scan", "--file", "nope.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Ecosystem data unavailable"));
}

#[rstest]
fn test_configured_missing_file_falls_back_to_demo(temp_dir: TempDir) {
    std::fs::write(
        temp_dir.path().join("agentguard.yaml"),
        "data-file: nope.json\nfallback-to-demo: true\n",
    )
    .unwrap();

    let value = json_stdout(&run_agentguard_in_dir(temp_dir.path(), &["--json", "scan"]));
    assert_eq!(value["total_agents"], 25);
}

// ============================================================================
// simulate / playbook
// ============================================================================

#[rstest]
fn test_simulate_json(temp_dir: TempDir) {
    let value = json_stdout(&run_agentguard_in_dir(
        temp_dir.path(),
        &["--json", "simulate", "checkout-agent"],
    ));
    assert_eq!(value["failed_agent"]["name"], "CheckoutAgent");
    assert_eq!(value["impacted_count"], 11);
    assert_eq!(value["blast_radius_score"], 6.6);
    assert_eq!(value["impact_estimate"]["severity"], "CRITICAL");
}

#[rstest]
fn test_simulate_unknown_agent_fails(temp_dir: TempDir) {
    let output = run_agentguard_in_dir(temp_dir.path(), &["simulate", "no-such-agent"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Agent not found: no-such-agent"));
}

#[rstest]
fn test_playbook_text(temp_dir: TempDir) {
    let output = run_agentguard_in_dir(
        temp_dir.path(),
        &["playbook", "content-planner", "--dataset", "content"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Playbook: ContentPlannerAgent Failure"));
    assert!(text.contains("Activate Backup System"));
    assert!(text.contains("content-team@media.com"));
}
