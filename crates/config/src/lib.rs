//! Configuration loading and validation for Flagline.
//!
//! Loads configuration from `~/.flagline/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use flagline_core::command::Command;
use flagline_core::model::{ModelCatalog, ModelInfo};
use flagline_core::request::GenerationDefaults;
use flagline_core::tool::{StaticToolCatalog, ToolDescriptor};

/// The root configuration structure.
///
/// Maps directly to `~/.flagline/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Persona text used unless a directive replaces the system message.
    /// `{today}` is replaced by the current UTC timestamp.
    #[serde(default = "default_preamble")]
    pub preamble: String,

    /// Values every request starts from
    #[serde(default)]
    pub defaults: GenerationDefaults,

    /// User command storage
    #[serde(default)]
    pub command_store: CommandStoreConfig,

    /// Known models; the first entry is the fallback
    #[serde(default = "default_models")]
    pub models: Vec<ModelInfo>,

    /// Commands available to every user
    #[serde(default)]
    pub commands: Vec<Command>,

    /// Tools requests may attach
    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,
}

fn default_preamble() -> String {
    "You are a helpful assistant. Today is {today}".into()
}

fn default_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new("gpt-4o", &[]),
        ModelInfo::new("gpt-4o-mini", &[]),
        ModelInfo::new("gpt-4", &["gpt4"]),
        ModelInfo::new("gpt-4-turbo", &[]),
        ModelInfo::new("gpt-3.5-turbo", &["chatgpt", "gpt-3", "gpt3", "turbo"]),
        ModelInfo::new("o1-preview", &[]),
        ModelInfo::new("o1-mini", &[]),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandStoreConfig {
    /// JSON-lines file holding user commands; defaults to
    /// `~/.flagline/commands.jsonl`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.flagline/config.toml).
    ///
    /// Environment overrides:
    /// - `FLAGLINE_MODEL`
    /// - `FLAGLINE_MAX_TOKENS`
    /// - `FLAGLINE_TEMPERATURE`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (the process environment in
    /// [`load`](Self::load)).
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(model) = lookup("FLAGLINE_MODEL") {
            self.defaults.model = model;
        }

        if let Some(raw) = lookup("FLAGLINE_MAX_TOKENS") {
            self.defaults.max_tokens = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("FLAGLINE_MAX_TOKENS must be a positive integer, got '{raw}'"))
            })?;
        }

        if let Some(raw) = lookup("FLAGLINE_TEMPERATURE") {
            self.defaults.temperature = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("FLAGLINE_TEMPERATURE must be a number, got '{raw}'"))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".flagline")
    }

    /// Where user commands are stored.
    pub fn command_store_path(&self) -> PathBuf {
        self.command_store
            .path
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("commands.jsonl"))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.defaults;

        if !(0.0..=2.0).contains(&d.temperature) {
            return Err(ConfigError::ValidationError(
                "defaults.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if !(0.0..=1.0).contains(&d.top_p) {
            return Err(ConfigError::ValidationError(
                "defaults.top_p must be between 0.0 and 1.0".into(),
            ));
        }

        for (field, value) in [
            ("presence_penalty", d.presence_penalty),
            ("frequency_penalty", d.frequency_penalty),
        ] {
            if !(-2.0..=2.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "defaults.{field} must be between -2.0 and 2.0"
                )));
            }
        }

        if d.max_tokens == 0 {
            return Err(ConfigError::ValidationError("defaults.max_tokens must be > 0".into()));
        }

        if self.models.is_empty() {
            return Err(ConfigError::ValidationError("at least one model must be configured".into()));
        }

        let mut seen = HashSet::new();
        for model in &self.models {
            if !seen.insert(model.name.to_lowercase()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate model '{}'",
                    model.name
                )));
            }
        }

        for command in &self.commands {
            command
                .validate()
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        Ok(())
    }

    pub fn model_catalog(&self) -> Result<ModelCatalog, ConfigError> {
        ModelCatalog::new(self.models.clone()).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Configured commands as global predefined commands.
    pub fn predefined_commands(&self) -> Vec<Command> {
        self.commands
            .iter()
            .cloned()
            .map(|mut c| {
                c.user_id = None;
                c
            })
            .collect()
    }

    pub fn tool_catalog(&self) -> StaticToolCatalog {
        StaticToolCatalog::new(self.tools.clone())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preamble: default_preamble(),
            defaults: GenerationDefaults::default(),
            command_store: CommandStoreConfig::default(),
            models: default_models(),
            commands: vec![],
            tools: vec![],
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
