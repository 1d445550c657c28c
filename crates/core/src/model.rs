//! Model catalog: canonical model names and their shorthand aliases.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A canonical model name plus the aliases users may type instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,

    #[serde(default)]
    pub aliases: Vec<String>,
}

impl ModelInfo {
    pub fn new(name: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Case-insensitive match against the name or any alias.
    pub fn matches(&self, word: &str) -> bool {
        self.name.eq_ignore_ascii_case(word) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(word))
    }
}

/// An ordered, non-empty list of models. The first entry is the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<ModelInfo>,
}

impl ModelCatalog {
    pub fn new(models: Vec<ModelInfo>) -> Result<Self> {
        if models.is_empty() {
            return Err(Error::Config {
                message: "model catalog must contain at least one model".into(),
            });
        }
        Ok(Self { models })
    }

    /// First model whose name or alias matches `word`.
    pub fn find(&self, word: &str) -> Option<&ModelInfo> {
        self.models.iter().find(|m| m.matches(word))
    }

    /// Whether `name` is exactly one of the canonical names.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.models.iter().any(|m| m.name == name)
    }

    pub fn default_model(&self) -> &ModelInfo {
        &self.models[0]
    }

    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }
}
