//! Configuration settings for Granske.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub agents: AgentSettings,
    pub search: SearchSettings,
    pub orchestrator: OrchestratorSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Root directory for persisted transcripts, summaries, and reports.
    pub workspace_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            workspace_dir: "~/.granske/workspace".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Per-role language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Model for the research supervisor.
    pub supervisor_model: String,
    /// Model for the video analyst.
    pub analyst_model: String,
    /// Model for the report writer.
    pub writer_model: String,
    /// Sampling temperature for all roles.
    pub temperature: f32,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            supervisor_model: "gpt-4o-mini".to_string(),
            analyst_model: "gpt-4o-mini".to_string(),
            writer_model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
        }
    }
}

/// Web search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Default number of search results per query.
    pub max_results: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { max_results: 3 }
    }
}

/// Run-loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSettings {
    /// Maximum number of hops (agent or tool steps) per run.
    pub max_hops: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self { max_hops: 20 }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("granske")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded workspace root path.
    pub fn workspace_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.workspace_dir)
    }
}
