//! `flagline resolve`: resolve a conversation offline.

use std::path::Path;

use flagline_core::message::Turn;

pub fn run(
    config_path: Option<&Path>,
    file: Option<&Path>,
    prompt: Option<String>,
    user: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;

    let mut turns: Vec<Turn> = match file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
            serde_json::from_str(&content).map_err(|e| format!("Invalid conversation file {}: {e}", path.display()))?
        }
        None => Vec::new(),
    };
    if let Some(text) = prompt {
        turns.push(Turn::user(user.unwrap_or_default(), text));
    }
    if turns.is_empty() {
        return Err("nothing to resolve: pass --file or --prompt".into());
    }

    let resolved = engine.resolve(&turns, user);
    for diagnostic in &resolved.diagnostics {
        tracing::warn!(turn = ?diagnostic.turn, kind = ?diagnostic.kind, "{}", diagnostic.message);
    }
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
