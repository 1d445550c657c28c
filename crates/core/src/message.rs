//! Turn and message domain types.
//!
//! A [`Turn`] is what the chat platform hands us: one visible message in a
//! thread. A [`ChatMessage`] is what goes out to the completion backend after
//! directive text has been stripped and the system message prepended.

use serde::{Deserialize, Serialize};

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// System instructions (persona, context)
    System,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        };
        f.write_str(s)
    }
}

/// One visible message of a conversation thread, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who sent this turn
    pub role: Role,

    /// Platform identifier of the author
    #[serde(default)]
    pub author_id: String,

    /// Raw text, directives included
    pub text: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(author_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            author_id: author_id.into(),
            text: text.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            author_id: String::new(),
            text: text.into(),
        }
    }
}

/// A message ready to be submitted to the completion backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}
