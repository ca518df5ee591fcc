//! Configuration view and validation commands: `feedbackhub config`.

use anyhow::Result;
use feedbackhub::config::{CONFIG_DIR, HubConfig, HubToml, config_path};

use super::super::ConfigCommands;

pub fn cmd_config(config: &HubConfig, command: Option<ConfigCommands>) -> Result<()> {
    let path = config_path(&config.project_dir);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("FeedbackHub Configuration");
            println!("=========================");
            println!();
            if path.exists() {
                println!("Config file: {}", path.display());
            } else {
                println!("No hub.toml found at {} (using defaults)", path.display());
            }
            println!();
            println!("Effective values (with env/CLI overrides):");
            let toml = &config.toml;
            println!("[server]");
            println!("  host = \"{}\"", toml.server.host);
            println!("  port = {}", toml.server.port);
            println!("  db_path = \"{}\"", config.db_path().display());
            println!("  dev_mode = {}", toml.server.dev_mode);
            println!();
            println!("[logging]");
            println!("  level = \"{}\"", toml.logging.level);
            println!("  json = {}", toml.logging.json);
            println!();
        }
        Some(ConfigCommands::Validate) => {
            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
        }
        Some(ConfigCommands::Init) => {
            if path.exists() {
                println!("hub.toml already exists at {}", path.display());
                return Ok(());
            }
            std::fs::create_dir_all(config.project_dir.join(CONFIG_DIR))?;
            HubToml::default().save(&path)?;
            println!("Created {}", path.display());
        }
    }
    Ok(())
}
