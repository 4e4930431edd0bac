//! Integration tests for ecosystem providers and the scan → simulate →
//! playbook flow over the built-in datasets.

use agentguard::analysis::{GraphRiskAnalyzer, Severity};
use agentguard::domain::{AgentId, AuditKind, Dataset, ImpactSeverity};
use agentguard::error::Error;
use agentguard::service::{EcosystemService, FallbackService, LocalService};
use agentguard::store::SessionStore;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const GRAPH_DOCUMENT: &str = r#"{
    "nodes": [
        {"id": "gateway", "data": {"label": "Gateway", "type": "user_facing", "risk": "critical"}},
        {"id": "auth", "data": {"label": "Auth", "type": "core_service", "risk": "high"}},
        {"id": "billing", "data": {"label": "Billing", "type": "core_service"}}
    ],
    "edges": [
        {"id": "e1", "source": "gateway", "target": "auth", "data": {"type": "api_call", "confidence": 0.9}},
        {"id": "e2", "source": "auth", "target": "billing"},
        {"id": "e3", "source": "billing", "target": "gateway"}
    ]
}"#;

const SCAN_DOCUMENT: &str = r#"{
    "agents": [
        {"id": "gateway", "name": "Gateway", "type": "user_facing", "riskLevel": "critical"},
        {"id": "auth", "name": "Auth", "type": "core_service", "risk_level": "high"},
        {"id": "billing", "name": "Billing", "type": "core_service"}
    ],
    "dependencies": [
        {"from": "gateway", "to": "auth", "kind": "api_call", "confidence": 0.9},
        {"from": "auth", "to": "billing"},
        {"from": "billing", "to": "gateway"}
    ]
}"#;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write document");
    path
}

// ============================================================================
// Demo datasets
// ============================================================================

#[rstest]
#[case::ecommerce(Dataset::Ecommerce, &[("inventory-agent", 3), ("checkout-agent", 3), ("order-agent", 3)])]
#[case::content(Dataset::Content, &[("quality-checker", 3), ("publish-agent", 3), ("content-planner", 2)])]
#[tokio::test]
async fn test_demo_report(#[case] dataset: Dataset, #[case] expected_spof: &[(&str, usize)]) {
    let scan = LocalService::demo().scan(dataset).await.unwrap();
    let report = GraphRiskAnalyzer::default().analyze_ecosystem(&scan.ecosystem());

    assert_eq!(report.overall_score, 10.0);
    assert_eq!(report.severity, Severity::High);
    assert!(report.cycles.is_empty());

    let spof: Vec<(&str, usize)> = report
        .spof
        .iter()
        .map(|e| (e.agent_id.as_str(), e.dependent_count))
        .collect();
    assert_eq!(spof, expected_spof);
}

#[tokio::test]
async fn test_ecommerce_scan_metrics() {
    let scan = LocalService::demo().scan(Dataset::Ecommerce).await.unwrap();
    assert_eq!(scan.total_agents, 25);
    assert_eq!(scan.total_shadow_agents, 4);
    assert_eq!(scan.dependencies.len(), 28);
    assert_eq!(scan.metrics.critical_agents, 5);
    assert_eq!(scan.metrics.high_risk_agents, 7);
    assert!(scan.metrics.avg_uptime.ends_with('%'));
}

#[rstest]
#[case::checkout(Dataset::Ecommerce, "checkout-agent", 11, 6.6, ImpactSeverity::Critical)]
#[case::order(Dataset::Ecommerce, "order-agent", 13, 7.8, ImpactSeverity::Critical)]
#[case::leaf(Dataset::Ecommerce, "fraud-detection-agent", 0, 0.0, ImpactSeverity::Medium)]
#[case::planner(Dataset::Content, "content-planner", 8, 6.7, ImpactSeverity::High)]
#[tokio::test]
async fn test_demo_blast_radius(
    #[case] dataset: Dataset,
    #[case] agent: &str,
    #[case] impacted: usize,
    #[case] score: f64,
    #[case] severity: ImpactSeverity,
) {
    let service = LocalService::demo();
    let scan = service.scan(dataset).await.unwrap();
    let sim = service.simulate(&scan, &AgentId::from(agent)).await.unwrap();

    assert_eq!(sim.impacted_count, impacted);
    assert_eq!(sim.impacted_agents.len(), impacted);
    assert!((sim.blast_radius_score - score).abs() < 1e-9);
    assert_eq!(sim.impact_estimate.severity, severity);
    assert!(
        sim.impacted_agents
            .iter()
            .all(|a| a.id.as_str() != agent)
    );
}

#[tokio::test]
async fn test_demo_playbook_for_checkout() {
    let service = LocalService::demo();
    let scan = service.scan(Dataset::Ecommerce).await.unwrap();
    let sim = service
        .simulate(&scan, &AgentId::from("checkout-agent"))
        .await
        .unwrap();
    let playbook = service.playbook(&scan, &sim).await.unwrap();

    assert_eq!(playbook.incident, "CheckoutAgent Failure");
    assert_eq!(playbook.severity, ImpactSeverity::Critical);
    assert_eq!(playbook.escalation_contacts[0], "checkout-team@company.com");
    assert!(
        !playbook
            .escalation_contacts
            .iter()
            .any(|c| c == "unknown")
    );

    let dependency_entries = playbook
        .audit_trail
        .iter()
        .filter(|e| e.kind == AuditKind::Dependency)
        .count();
    assert_eq!(dependency_entries, 3);
    assert_eq!(
        playbook.audit_trail.last().map(|e| e.kind),
        Some(AuditKind::Risk)
    );
}

// ============================================================================
// File-backed provider
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_both_document_shapes_load_the_same_ecosystem(temp_dir: TempDir) {
    let graph_path = write(&temp_dir, "graph.json", GRAPH_DOCUMENT);
    let scan_path = write(&temp_dir, "scan.json", SCAN_DOCUMENT);

    let from_graph = LocalService::from_file(graph_path)
        .scan(Dataset::Ecommerce)
        .await
        .unwrap();
    let from_scan = LocalService::from_file(scan_path)
        .scan(Dataset::Ecommerce)
        .await
        .unwrap();

    let a = GraphRiskAnalyzer::default().analyze_ecosystem(&from_graph.ecosystem());
    let b = GraphRiskAnalyzer::default().analyze_ecosystem(&from_scan.ecosystem());
    assert_eq!(a, b);
    assert_eq!(a.overall_score, 4.3);
    assert_eq!(a.cycles.len(), 1);
    assert_eq!(a.cycles[0].to_string(), "gateway → auth → billing → gateway");
}

#[rstest]
#[tokio::test]
async fn test_fallback_serves_demo_when_file_missing(temp_dir: TempDir) {
    let service = FallbackService::new(
        Box::new(LocalService::from_file(temp_dir.path().join("absent.json"))),
        Box::new(LocalService::demo()),
    );

    let scan = service.scan(Dataset::Content).await.unwrap();
    assert_eq!(scan.total_agents, 18);
    assert_eq!(scan.demo_type, Dataset::Content);
}

#[rstest]
#[tokio::test]
async fn test_fallback_prefers_readable_file(temp_dir: TempDir) {
    let path = write(&temp_dir, "scan.json", SCAN_DOCUMENT);
    let service = FallbackService::new(
        Box::new(LocalService::from_file(path)),
        Box::new(LocalService::demo()),
    );

    let scan = service.scan(Dataset::Ecommerce).await.unwrap();
    assert_eq!(scan.total_agents, 3);
}

#[rstest]
#[tokio::test]
async fn test_strict_file_provider_reports_data_unavailable(temp_dir: TempDir) {
    let service = LocalService::from_file(temp_dir.path().join("absent.json"));
    let err = service.scan(Dataset::Ecommerce).await.unwrap_err();
    assert!(matches!(err, Error::DataUnavailable(_)));
    assert!(err.to_string().contains("absent.json"));
}

// ============================================================================
// Session store over real scans
// ============================================================================

#[tokio::test]
async fn test_switching_datasets_replaces_session() {
    let service = LocalService::demo();
    let analyzer = GraphRiskAnalyzer::default();
    let mut store = SessionStore::new();

    let scan = service.scan(Dataset::Ecommerce).await.unwrap();
    let sim = service
        .simulate(&scan, &AgentId::from("order-agent"))
        .await
        .unwrap();
    store.load_scan(scan, &analyzer);
    store.set_simulation(sim).unwrap();
    assert!(store.status().simulated);

    let content = service.scan(Dataset::Content).await.unwrap();
    store.load_scan(content, &analyzer);

    assert!(!store.status().simulated);
    assert_eq!(store.scan().unwrap().demo_type, Dataset::Content);
    assert!(!store.contains_agent(&AgentId::from("order-agent")));
    assert!(store.contains_agent(&AgentId::from("publish-agent")));
}
