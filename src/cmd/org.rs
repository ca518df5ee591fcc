//! Organization commands: `feedbackhub org`.

use anyhow::Result;
use feedbackhub::config::HubConfig;
use feedbackhub::roadmap::server::open_database;

use super::super::OrgCommands;

pub fn cmd_org(config: &HubConfig, command: &OrgCommands) -> Result<()> {
    let db = open_database(&config.db_path())?;

    match command {
        OrgCommands::Create { name } => {
            let org = db.create_organization(name)?;
            println!("Created organization {} ({})", org.id, org.name);
            for status in db.list_statuses(org.id)? {
                println!("  {:<12} {}", status.key, status.name);
            }
        }
        OrgCommands::List => {
            let orgs = db.list_organizations()?;
            if orgs.is_empty() {
                println!("No organizations.");
            }
            for org in orgs {
                println!("{:>4}  {}", org.id, org.name);
            }
        }
    }
    Ok(())
}
