//! Session configuration persistence
//!
//! Stores user preferences in `~/.config/chunkpad/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::pipeline::RunKind;

/// How to launch the worker backend process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Worker executable
    #[serde(default = "default_backend_program")]
    pub program: String,
    /// Extra arguments passed to the worker
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_backend_program() -> String {
    "chunkpad-worker".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: default_backend_program(),
            args: Vec::new(),
        }
    }
}

/// Session configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeConfig {
    /// Run the pipeline automatically after edits settle
    #[serde(default = "default_true")]
    pub auto_run: bool,
    /// Pass the type-check flag to the worker on compile
    #[serde(default = "default_true")]
    pub type_check: bool,
    /// How the worker executes the program
    #[serde(default = "default_run_kind")]
    pub run_kind: RunKind,
    #[serde(default)]
    pub backend: BackendConfig,
}

fn default_true() -> bool {
    true
}

fn default_run_kind() -> RunKind {
    RunKind::Async
}

impl Default for IdeConfig {
    fn default() -> Self {
        Self {
            auto_run: true,
            type_check: true,
            run_kind: default_run_kind(),
            backend: BackendConfig::default(),
        }
    }
}

impl IdeConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific path, or return defaults if not found
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
