//! Database initialization command: `feedbackhub init`.

use anyhow::Result;
use feedbackhub::config::HubConfig;
use feedbackhub::roadmap::server::open_database;

pub fn cmd_init(config: &HubConfig) -> Result<()> {
    let db_path = config.db_path();
    open_database(&db_path)?;
    println!("Roadmap database initialized at {}", db_path.display());
    Ok(())
}
