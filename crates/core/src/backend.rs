//! Completion backend seam.
//!
//! The engine produces a [`CompletionRequest`]; something outside this
//! workspace sends it to a language model. Retries, backoff and timeouts
//! belong to the implementation, not to the engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::message::ChatMessage;
use crate::request::SamplingParams;
use crate::tool::ToolDescriptor;

/// A fully resolved request ready for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,

    /// System message first, then the conversation turns
    pub messages: Vec<ChatMessage>,

    pub sampling: SamplingParams,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDescriptor>,

    /// End-user identifier forwarded for abuse monitoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Anything that can turn a [`CompletionRequest`] into generated text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn submit(&self, request: &CompletionRequest) -> Result<String, BackendError>;
}
