//! Flagline CLI: the main entry point.
//!
//! Commands:
//! - `resolve`   Resolve a conversation file and print the request
//! - `models`    List the model catalog
//! - `commands`  List, add or remove user commands
//! - `config`    Validate or print the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "flagline",
    about = "Flagline: inline -flag directives for chat prompts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of ~/.flagline/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a conversation and print the resulting request as JSON
    Resolve {
        /// JSON file holding the turns, oldest first
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Append a user turn with this text
        #[arg(short, long)]
        prompt: Option<String>,

        /// The user the request is resolved for
        #[arg(short, long)]
        user: Option<String>,
    },

    /// List known models and their aliases
    Models,

    /// Manage user commands
    Commands {
        #[command(subcommand)]
        action: Option<CommandAction>,

        /// Show commands visible to this user
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum CommandAction {
    /// Save a command
    Add {
        /// Invocation name, e.g. -eli5
        #[arg(allow_hyphen_values = true)]
        name: String,

        /// Text the command expands to
        prompt: String,

        /// Owner; omit for a global command
        #[arg(short, long)]
        user: Option<String>,

        /// Inject into the system message instead of the prompt
        #[arg(long)]
        system: bool,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Delete a command
    Remove {
        #[arg(allow_hyphen_values = true)]
        name: String,

        #[arg(short, long)]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate the configuration
    Validate,

    /// Print the default configuration as TOML
    Default,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Resolve { file, prompt, user } => {
            commands::resolve::run(config_path, file.as_deref(), prompt, user.as_deref())?
        }
        Commands::Models => commands::models::run(config_path)?,
        Commands::Commands { action, user } => match action {
            None => commands::user_commands::list(config_path, user.as_deref())?,
            Some(CommandAction::Add {
                name,
                prompt,
                user,
                system,
                description,
            }) => commands::user_commands::add(config_path, name, prompt, user, system, description)?,
            Some(CommandAction::Remove { name, user }) => {
                commands::user_commands::remove(config_path, &name, user.as_deref())?
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Validate => commands::config_cmd::validate(config_path)?,
            ConfigAction::Default => commands::config_cmd::print_default(),
        },
    }

    Ok(())
}
