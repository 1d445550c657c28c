//! User command stores.
//!
//! Users save their own `-name` shortcuts; the engine looks them up through
//! [`CommandStore`](flagline_core::CommandStore) while resolving. Both stores
//! here keep commands in memory. [`FileCommandStore`] also persists every
//! change to a JSON-lines file.

pub mod file_store;
pub mod in_memory;

pub use file_store::FileCommandStore;
pub use in_memory::InMemoryCommandStore;

use flagline_core::command::{Command, select_scoped};
use flagline_core::error::CommandStoreError;

/// Insert `command`, replacing a same-named command with the same owner.
/// Returns true when an existing command was replaced.
pub(crate) fn upsert(commands: &mut Vec<Command>, command: Command) -> Result<bool, CommandStoreError> {
    command.validate()?;
    match commands
        .iter_mut()
        .find(|c| c.is_named(&command.name) && c.user_id == command.user_id)
    {
        Some(existing) => {
            *existing = command;
            Ok(true)
        }
        None => {
            commands.push(command);
            Ok(false)
        }
    }
}

/// Remove the command `name` owned by `user_id` (`None` for global).
pub(crate) fn remove_scoped(commands: &mut Vec<Command>, name: &str, user_id: Option<&str>) -> bool {
    let before = commands.len();
    commands.retain(|c| !(c.is_named(name) && c.user_id.as_deref() == user_id));
    commands.len() < before
}

pub(crate) fn lookup_scoped(commands: &[Command], name: &str, user_id: Option<&str>) -> Option<Command> {
    select_scoped(commands.iter().filter(|c| c.is_named(name)), user_id).cloned()
}

/// Commands visible to `user_id`: globals plus their own, sorted by name.
pub(crate) fn visible_to(commands: &[Command], user_id: Option<&str>) -> Vec<Command> {
    let mut visible: Vec<Command> = commands
        .iter()
        .filter(|c| c.user_id.is_none() || c.user_id.as_deref() == user_id)
        .cloned()
        .collect();
    visible.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    visible
}

pub(crate) fn poisoned() -> CommandStoreError {
    CommandStoreError::Storage("command store lock poisoned".into())
}
