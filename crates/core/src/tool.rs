//! Tool catalog seam: the externally discovered tools a request may attach.
//!
//! Discovery of callable tools happens outside this workspace; the engine
//! only reads descriptors through [`ToolCatalog`].

use serde::{Deserialize, Serialize};

use crate::error::ToolCatalogError;

/// A tool the completion backend can be offered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// The tool name
    pub name: String,

    /// Alternative spellings users may request it by
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Description of what the tool does
    #[serde(default)]
    pub description: String,

    /// Attach this tool even when not requested
    #[serde(default)]
    pub enabled_by_default: bool,

    /// JSON Schema describing the tool's parameters
    #[serde(default = "empty_schema")]
    pub parameters: serde_json::Value,
}

fn empty_schema() -> serde_json::Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            description: String::new(),
            enabled_by_default: false,
            parameters: empty_schema(),
        }
    }

    pub fn enabled_by_default(mut self) -> Self {
        self.enabled_by_default = true;
        self
    }
}

/// Read-only source of tool descriptors.
pub trait ToolCatalog: Send + Sync {
    fn list(&self) -> Result<Vec<ToolDescriptor>, ToolCatalogError>;
}

/// A catalog backed by a fixed list (typically from configuration).
#[derive(Debug, Clone, Default)]
pub struct StaticToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl StaticToolCatalog {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl ToolCatalog for StaticToolCatalog {
    fn list(&self) -> Result<Vec<ToolDescriptor>, ToolCatalogError> {
        Ok(self.tools.clone())
    }
}
