//! `flagline config`: configuration management commands.

use std::path::Path;

use flagline_config::AppConfig;

pub fn validate(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    let config = super::load_config(config_path)?;
    println!("  Config parsed successfully");

    let mut warnings = Vec::new();
    if !config.models.iter().any(|m| m.matches(&config.defaults.model)) {
        warnings.push(format!(
            "Default model '{}' is not in the catalog; '{}' will be used",
            config.defaults.model, config.models[0].name
        ));
    }
    if config.defaults.system.is_some() && !config.preamble.is_empty() {
        warnings.push("defaults.system is set, so the preamble is never used".to_string());
    }

    for w in &warnings {
        println!("  warning: {w}");
    }

    println!();
    println!("  Model:     {}", config.defaults.model);
    println!("  Models:    {}", config.models.len());
    println!("  Commands:  {}", config.commands.len());
    println!("  Tools:     {}", config.tools.len());
    println!("  Store:     {}", config.command_store_path().display());
    Ok(())
}

pub fn print_default() {
    print!("{}", AppConfig::default_toml());
}
