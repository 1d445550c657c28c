pub mod config_cmd;
pub mod models;
pub mod resolve;
pub mod user_commands;

use std::path::Path;
use std::sync::Arc;

use flagline_commands::FileCommandStore;
use flagline_config::AppConfig;
use flagline_directives::{DirectiveEngine, EngineSettings};

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_env_overrides(|key| std::env::var(key).ok())?;
            config.validate()?;
            config
        }
        None => AppConfig::load()?,
    };
    Ok(config)
}

pub fn open_store(config: &AppConfig) -> FileCommandStore {
    FileCommandStore::new(config.command_store_path())
}

pub fn build_engine(config: &AppConfig) -> Result<DirectiveEngine, Box<dyn std::error::Error>> {
    let settings = EngineSettings {
        defaults: config.defaults.clone(),
        preamble: config.preamble.clone(),
        catalog: Arc::new(config.model_catalog()?),
        predefined: config.predefined_commands(),
    };
    Ok(DirectiveEngine::new(
        settings,
        Arc::new(open_store(config)),
        Arc::new(config.tool_catalog()),
    ))
}
