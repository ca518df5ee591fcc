//! Status commands: `feedbackhub statuses`.

use anyhow::Result;
use feedbackhub::config::HubConfig;
use feedbackhub::roadmap::models::DeleteOutcome;
use feedbackhub::roadmap::server::open_database;

use super::super::StatusCommands;

pub fn cmd_statuses(config: &HubConfig, command: &StatusCommands) -> Result<()> {
    let db = open_database(&config.db_path())?;

    match command {
        StatusCommands::List { org } => {
            println!(
                "{:>4}  {:<5} {:<16} {:<20} {:<8} {}",
                "ID", "ORDER", "KEY", "NAME", "COLOR", "ROADMAP"
            );
            for s in db.list_statuses(*org)? {
                println!(
                    "{:>4}  {:<5} {:<16} {:<20} {:<8} {}{}",
                    s.id,
                    s.order,
                    s.key,
                    s.name,
                    s.color,
                    if s.show_on_roadmap { "yes" } else { "no" },
                    if s.is_system { "  (system)" } else { "" }
                );
            }
        }
        StatusCommands::Delete {
            org,
            id,
            reassign_to,
        } => match db.delete_status(*org, *id, reassign_to.as_deref())? {
            DeleteOutcome::RequiresReassignment { post_count, .. } => {
                let targets: Vec<String> = db
                    .reassignment_targets(*org, *id)?
                    .into_iter()
                    .map(|s| s.key)
                    .collect();
                println!(
                    "Status {} still holds {} post(s). Re-run with --reassign-to <KEY> (one of: {}).",
                    id,
                    post_count,
                    targets.join(", ")
                );
            }
            DeleteOutcome::Deleted {
                reassigned_count, ..
            } => match reassigned_count {
                Some(n) => println!("Deleted status {}; moved {} post(s).", id, n),
                None => println!("Deleted status {}.", id),
            },
        },
    }
    Ok(())
}
