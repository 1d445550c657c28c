//! The mutable generation request a resolution pass works on.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::system::SystemMessageBuilder;

/// Configured defaults used to initialise every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationDefaults {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default)]
    pub presence_penalty: f32,

    #[serde(default)]
    pub frequency_penalty: f32,

    #[serde(default = "default_model")]
    pub model: String,

    /// Replaces the persona preamble when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

fn default_max_tokens() -> u32 {
    4000
}
fn default_temperature() -> f32 {
    0.7
}
fn default_top_p() -> f32 {
    1.0
}
fn default_model() -> String {
    "gpt-4o".into()
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            model: default_model(),
            system: None,
        }
    }
}

/// Sampling parameters forwarded to the completion backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

/// One request being resolved. Created per pass and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub user_id: Option<String>,

    /// Remaining prompt text; shrinks as directives are consumed
    pub prompt: String,

    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    pub model: String,

    #[serde(skip)]
    pub system: SystemMessageBuilder,

    /// Tool names requested via directives, not yet matched to a catalog
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub requested_tools: BTreeSet<String>,

    #[serde(default)]
    pub no_tools: bool,
}

impl GenerationRequest {
    /// A request initialised from configured defaults.
    pub fn from_defaults(defaults: &GenerationDefaults, prompt: impl Into<String>) -> Self {
        let system = match &defaults.system {
            Some(base) => SystemMessageBuilder::with_base(base.clone()),
            None => SystemMessageBuilder::new(),
        };
        Self {
            user_id: None,
            prompt: prompt.into(),
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            top_p: defaults.top_p,
            presence_penalty: defaults.presence_penalty,
            frequency_penalty: defaults.frequency_penalty,
            model: defaults.model.clone(),
            system,
            requested_tools: BTreeSet::new(),
            no_tools: false,
        }
    }

    pub fn with_user(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            presence_penalty: self.presence_penalty,
            frequency_penalty: self.frequency_penalty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_copies_defaults() {
        let defaults = GenerationDefaults {
            max_tokens: 123,
            temperature: 0.2,
            ..GenerationDefaults::default()
        };
        let req = GenerationRequest::from_defaults(&defaults, "hello");
        assert_eq!(req.prompt, "hello");
        assert_eq!(req.max_tokens, 123);
        assert!((req.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(req.model, "gpt-4o");
        assert!(!req.system.should_replace());
        assert!(req.requested_tools.is_empty());
    }

    #[test]
    fn configured_system_seeds_builder() {
        let defaults = GenerationDefaults {
            system: Some("House style.".into()),
            ..GenerationDefaults::default()
        };
        let req = GenerationRequest::from_defaults(&defaults, "");
        assert_eq!(req.system.build("ignored preamble"), "House style.");
        assert!(!req.system.is_modified());
    }

    #[test]
    fn defaults_parse_from_partial_toml_like_json() {
        let d: GenerationDefaults = serde_json::from_str(r#"{"model":"gpt-4"}"#).unwrap();
        assert_eq!(d.model, "gpt-4");
        assert_eq!(d.max_tokens, 4000);
        assert!((d.top_p - 1.0).abs() < f32::EPSILON);
    }
}
