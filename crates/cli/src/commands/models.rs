//! `flagline models`: list the model catalog.

use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let catalog = config.model_catalog()?;
    let default = &catalog.default_model().name;

    println!("Models");
    println!("======");
    for model in catalog.models() {
        let marker = if &model.name == default { " (fallback)" } else { "" };
        if model.aliases.is_empty() {
            println!("  {}{marker}", model.name);
        } else {
            println!("  {}{marker}  aliases: {}", model.name, model.aliases.join(", "));
        }
    }
    println!();
    println!("  Configured default: {}", config.defaults.model);
    Ok(())
}
