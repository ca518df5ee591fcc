use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use feedbackhub::config::{CliOverrides, HubConfig};

mod cmd;

#[derive(Parser)]
#[command(name = "feedbackhub")]
#[command(version, about = "Feedback board status lifecycle service")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding .feedbackhub/ (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to serve on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Database path
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// Enable dev mode (CORS permissive for a local front-end dev server)
        #[arg(long)]
        dev: bool,
    },
    /// Create the database and run migrations
    Init {
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
    /// Manage organizations
    Org {
        #[command(subcommand)]
        command: OrgCommands,
    },
    /// Inspect or delete statuses
    Statuses {
        #[command(subcommand)]
        command: StatusCommands,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum OrgCommands {
    /// Create an organization with the default statuses
    Create { name: String },
    /// List organizations
    List,
}

#[derive(Subcommand, Clone)]
pub enum StatusCommands {
    /// List an organization's statuses in order
    List {
        #[arg(long)]
        org: i64,
    },
    /// Delete a status, moving its posts with --reassign-to
    Delete {
        #[arg(long)]
        org: i64,
        /// Status id
        id: i64,
        /// Key of the status that receives the posts
        #[arg(long)]
        reassign_to: Option<String>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default hub.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let mut overrides = CliOverrides {
        verbose: cli.verbose,
        ..Default::default()
    };
    match &cli.command {
        Commands::Serve {
            port,
            host,
            db_path,
            dev,
        } => {
            overrides.port = *port;
            overrides.host = host.clone();
            overrides.db_path = db_path.clone();
            overrides.dev_mode = *dev;
        }
        Commands::Init { db_path } => overrides.db_path = db_path.clone(),
        _ => {}
    }

    let config = HubConfig::load(&project_dir, &overrides)?;
    feedbackhub::logging::init_tracing(&config.toml.logging.level, config.toml.logging.json)?;

    match &cli.command {
        Commands::Serve { .. } => cmd::cmd_serve(&config).await?,
        Commands::Init { .. } => cmd::cmd_init(&config)?,
        Commands::Org { command } => cmd::cmd_org(&config, command)?,
        Commands::Statuses { command } => cmd::cmd_statuses(&config, command)?,
        Commands::Config { command } => cmd::cmd_config(&config, command.clone())?,
    }

    Ok(())
}
