//! Configuration file handling.
//!
//! Configuration lives in `agentguard.yaml`:
//!
//! ```yaml
//! dataset: ecommerce
//! data-file: ecosystem.json
//! fallback-to-demo: true
//! spof-limit: 3
//! ```
//!
//! Every key is optional. Without a config file the CLI behaves as if
//! `AgentGuardConfig::default()` had been written.

use crate::analysis::DEFAULT_SPOF_LIMIT;
use crate::domain::Dataset;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "agentguard.yaml";

/// Largest accepted `spof-limit`
pub const MAX_SPOF_LIMIT: usize = 100;

fn default_fallback() -> bool {
    true
}

fn default_spof_limit() -> usize {
    DEFAULT_SPOF_LIMIT
}

fn lossy_dataset<'de, D>(deserializer: D) -> std::result::Result<Dataset, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(Dataset::from_name_lossy(&name))
}

/// Configuration file structure for agentguard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct AgentGuardConfig {
    /// Dataset scanned when no `--dataset` flag is given; unknown names
    /// fall back to ecommerce
    #[serde(default, deserialize_with = "lossy_dataset")]
    pub dataset: Dataset,

    /// Ecosystem document to load instead of the demo datasets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Serve demo data when `data-file` cannot be read
    #[serde(default = "default_fallback")]
    pub fallback_to_demo: bool,

    /// Number of single points of failure to report
    #[serde(default = "default_spof_limit")]
    pub spof_limit: usize,
}

impl Default for AgentGuardConfig {
    fn default() -> Self {
        Self {
            dataset: Dataset::default(),
            data_file: None,
            fallback_to_demo: default_fallback(),
            spof_limit: default_spof_limit(),
        }
    }
}

impl AgentGuardConfig {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, or `Error::Config` if
    /// it is not valid YAML or fails validation.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config.resolve_paths(path))
    }

    /// Load configuration, using defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`AgentGuardConfig::load`], except that a missing file is not
    /// an error.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path).await {
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Load the configuration a command should run with.
    ///
    /// An explicit `config_path` must exist. Without one, `agentguard.yaml`
    /// in `working_dir` is used if present, and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or is invalid.
    pub async fn discover(config_path: Option<&Path>, working_dir: &Path) -> Result<Self> {
        match config_path {
            Some(path) => Self::load(path).await,
            None => Self::load_or_default(&working_dir.join(CONFIG_FILE_NAME)).await,
        }
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails or `Error::Io` if the
    /// file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `spof-limit` is outside `1..=100`.
    pub fn validate(&self) -> Result<()> {
        if self.spof_limit == 0 || self.spof_limit > MAX_SPOF_LIMIT {
            return Err(Error::Config(format!(
                "spof-limit must be between 1 and {MAX_SPOF_LIMIT}, got {}",
                self.spof_limit
            )));
        }
        Ok(())
    }

    /// Resolve a relative `data-file` against the directory holding the
    /// config file.
    fn resolve_paths(mut self, config_path: &Path) -> Self {
        if let (Some(file), Some(dir)) = (&self.data_file, config_path.parent())
            && file.is_relative()
        {
            self.data_file = Some(dir.join(file));
        }
        self
    }
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the written config file
    pub config_file: PathBuf,
    /// Whether an existing file was replaced
    pub overwritten: bool,
}

/// Write a default `agentguard.yaml` into `base_dir`.
///
/// # Errors
///
/// Returns `Error::Config` if the file exists and `force` is false, or
/// `Error::Io` if it cannot be written.
pub async fn init(base_dir: &Path, force: bool) -> Result<InitResult> {
    let config_file = base_dir.join(CONFIG_FILE_NAME);
    let exists = fs::try_exists(&config_file).await?;

    if exists && !force {
        return Err(Error::Config(format!(
            "'{CONFIG_FILE_NAME}' already exists in {}. Use --force to overwrite",
            base_dir.display()
        )));
    }

    AgentGuardConfig::default().save(&config_file).await?;
    tracing::info!(path = %config_file.display(), "Wrote default configuration");

    Ok(InitResult {
        config_file,
        overwritten: exists,
    })
}
