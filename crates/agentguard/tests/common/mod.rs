//! Common test utilities shared across integration tests.

use std::path::Path;
use std::process::{Command, Output};

/// Run the agentguard binary in the specified directory.
///
/// Colors are disabled so assertions can match plain text.
pub fn run_agentguard_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_agentguard"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("AGENTGUARD_ASCII", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute agentguard binary")
}

/// Stdout of a successful run, parsed as JSON.
pub fn json_stdout(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}
