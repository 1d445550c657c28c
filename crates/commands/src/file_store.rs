//! File-backed command store: persistent JSON-lines storage.
//!
//! Each line is one JSON-encoded [`Command`]. Commands are loaded on
//! creation and the whole file is rewritten on every mutation.
//!
//! Default location: `~/.flagline/commands.jsonl`

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use flagline_core::command::{Command, CommandStore};
use flagline_core::error::CommandStoreError;
use tracing::{debug, warn};

use crate::{lookup_scoped, poisoned, remove_scoped, upsert, visible_to};

pub struct FileCommandStore {
    path: PathBuf,
    commands: RwLock<Vec<Command>>,
}

impl FileCommandStore {
    /// Open the store at `path`. A missing file starts empty and is created
    /// on the first write.
    pub fn new(path: PathBuf) -> Self {
        let commands = Self::load_from_disk(&path);
        debug!(path = %path.display(), count = commands.len(), "Command store loaded");
        Self {
            path,
            commands: RwLock::new(commands),
        }
    }

    /// `~/.flagline/commands.jsonl`
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".flagline").join("commands.jsonl")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> Vec<Command> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<Command>(line) {
                Ok(command) => Some(command),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted command entry");
                    None
                }
            })
            .collect()
    }

    fn flush(&self, commands: &[Command]) -> Result<(), CommandStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CommandStoreError::Storage(format!("Failed to create command directory: {e}")))?;
        }

        let mut content = String::new();
        for command in commands {
            let line = serde_json::to_string(command)
                .map_err(|e| CommandStoreError::Storage(format!("Failed to serialize command: {e}")))?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(&self.path, &content)
            .map_err(|e| CommandStoreError::Storage(format!("Failed to write command file: {e}")))
    }

    /// The in-memory set only changes once the file has been written.
    pub fn add(&self, command: Command) -> Result<bool, CommandStoreError> {
        let mut commands = self.commands.write().map_err(|_| poisoned())?;
        let mut next = commands.clone();
        let replaced = upsert(&mut next, command)?;
        self.flush(&next)?;
        *commands = next;
        Ok(replaced)
    }

    pub fn remove(&self, name: &str, user_id: Option<&str>) -> Result<bool, CommandStoreError> {
        let mut commands = self.commands.write().map_err(|_| poisoned())?;
        let mut next = commands.clone();
        if !remove_scoped(&mut next, name, user_id) {
            return Ok(false);
        }
        self.flush(&next)?;
        *commands = next;
        Ok(true)
    }

    pub fn list(&self, user_id: Option<&str>) -> Result<Vec<Command>, CommandStoreError> {
        let commands = self.commands.read().map_err(|_| poisoned())?;
        Ok(visible_to(&commands, user_id))
    }
}

impl CommandStore for FileCommandStore {
    fn name(&self) -> &str {
        "file"
    }

    fn lookup(&self, name: &str, user_id: Option<&str>) -> Result<Option<Command>, CommandStoreError> {
        let commands = self.commands.read().map_err(|_| poisoned())?;
        Ok(lookup_scoped(&commands, name, user_id))
    }
}
