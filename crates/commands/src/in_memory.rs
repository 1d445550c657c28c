//! In-memory command store, for tests and ephemeral sessions.

use std::sync::{Arc, RwLock};

use flagline_core::command::{Command, CommandStore};
use flagline_core::error::CommandStoreError;

use crate::{lookup_scoped, poisoned, remove_scoped, upsert, visible_to};

#[derive(Clone, Default)]
pub struct InMemoryCommandStore {
    commands: Arc<RwLock<Vec<Command>>>,
}

impl InMemoryCommandStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with `commands`. Invalid names are rejected.
    pub fn with_commands(commands: Vec<Command>) -> Result<Self, CommandStoreError> {
        let store = Self::new();
        for command in commands {
            store.add(command)?;
        }
        Ok(store)
    }

    pub fn add(&self, command: Command) -> Result<bool, CommandStoreError> {
        let mut commands = self.commands.write().map_err(|_| poisoned())?;
        upsert(&mut commands, command)
    }

    pub fn remove(&self, name: &str, user_id: Option<&str>) -> Result<bool, CommandStoreError> {
        let mut commands = self.commands.write().map_err(|_| poisoned())?;
        Ok(remove_scoped(&mut commands, name, user_id))
    }

    pub fn list(&self, user_id: Option<&str>) -> Result<Vec<Command>, CommandStoreError> {
        let commands = self.commands.read().map_err(|_| poisoned())?;
        Ok(visible_to(&commands, user_id))
    }

    pub fn len(&self) -> Result<usize, CommandStoreError> {
        let commands = self.commands.read().map_err(|_| poisoned())?;
        Ok(commands.len())
    }

    pub fn is_empty(&self) -> Result<bool, CommandStoreError> {
        Ok(self.len()? == 0)
    }
}

impl CommandStore for InMemoryCommandStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn lookup(&self, name: &str, user_id: Option<&str>) -> Result<Option<Command>, CommandStoreError> {
        let commands = self.commands.read().map_err(|_| poisoned())?;
        Ok(lookup_scoped(&commands, name, user_id))
    }
}
