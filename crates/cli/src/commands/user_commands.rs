//! `flagline commands`: user command management.

use std::path::Path;

use flagline_core::command::Command;

pub fn list(config_path: Option<&Path>, user: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config);

    let predefined = config.predefined_commands();
    let saved = store.list(user)?;

    if predefined.is_empty() && saved.is_empty() {
        println!("No commands defined.");
        return Ok(());
    }

    if !predefined.is_empty() {
        println!("Predefined");
        for command in &predefined {
            print_command(command);
        }
    }
    if !saved.is_empty() {
        println!("Saved ({})", store.path().display());
        for command in &saved {
            print_command(command);
        }
    }
    Ok(())
}

pub fn add(
    config_path: Option<&Path>,
    name: String,
    prompt: String,
    user: Option<String>,
    system: bool,
    description: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config);

    let command = Command {
        name,
        prompt,
        description,
        as_system: system,
        user_id: user,
    };
    let name = command.name.clone();
    if store.add(command)? {
        println!("Updated {name}");
    } else {
        println!("Added {name}");
    }
    Ok(())
}

pub fn remove(config_path: Option<&Path>, name: &str, user: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config);

    if store.remove(name, user)? {
        println!("Removed {name}");
    } else {
        println!("No command {name} for that scope");
    }
    Ok(())
}

fn print_command(command: &Command) {
    let target = if command.as_system { "system" } else { "prompt" };
    let owner = command.user_id.as_deref().unwrap_or("global");
    println!("  {:<16} [{target}, {owner}] {}", command.name, command.description);
}
