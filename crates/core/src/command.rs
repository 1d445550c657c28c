//! Command types: named prompt snippets users invoke as `-name`.
//!
//! Predefined commands come from configuration; user commands live in an
//! external store reached through [`CommandStore`].

use serde::{Deserialize, Serialize};

use crate::error::CommandStoreError;

/// A named prompt expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Invocation name including the leading dash (e.g. `-translate`)
    pub name: String,

    /// Text injected into the prompt or the system message
    pub prompt: String,

    #[serde(default)]
    pub description: String,

    /// Inject as a system fragment instead of prefixing the prompt
    #[serde(default)]
    pub as_system: bool,

    /// Owning user; `None` for a global command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            description: String::new(),
            as_system: false,
            user_id: None,
        }
    }

    pub fn as_system(mut self) -> Self {
        self.as_system = true;
        self
    }

    pub fn owned_by(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Case-insensitive comparison against an invocation name.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn validate(&self) -> Result<(), CommandStoreError> {
        if !self.name.starts_with('-') || self.name.len() < 2 {
            return Err(CommandStoreError::InvalidCommand {
                name: self.name.clone(),
                reason: "name must start with '-' followed by at least one character".into(),
            });
        }
        if self.name.chars().skip(1).any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_')) {
            return Err(CommandStoreError::InvalidCommand {
                name: self.name.clone(),
                reason: "name may only contain letters, digits, '-' and '_'".into(),
            });
        }
        Ok(())
    }
}

/// Read-only lookup of user-defined commands.
///
/// Implementations return the command owned by `user_id` when one exists,
/// otherwise the global command of that name.
pub trait CommandStore: Send + Sync {
    fn name(&self) -> &str;

    fn lookup(&self, name: &str, user_id: Option<&str>) -> Result<Option<Command>, CommandStoreError>;
}

/// A store that never has any commands.
pub struct NoCommands;

impl CommandStore for NoCommands {
    fn name(&self) -> &str {
        "none"
    }

    fn lookup(&self, _name: &str, _user_id: Option<&str>) -> Result<Option<Command>, CommandStoreError> {
        Ok(None)
    }
}

/// Pick the best command for `user_id` out of same-named candidates.
pub fn select_scoped<'a>(
    candidates: impl IntoIterator<Item = &'a Command>,
    user_id: Option<&str>,
) -> Option<&'a Command> {
    let mut global = None;
    for command in candidates {
        match (&command.user_id, user_id) {
            (Some(owner), Some(uid)) if owner == uid => return Some(command),
            (None, _) if global.is_none() => global = Some(command),
            _ => {}
        }
    }
    global
}
