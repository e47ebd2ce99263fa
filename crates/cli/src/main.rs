//! Chartbook CLI - chart of accounts from the command line
//!
//! Usage:
//! ```bash
//! chartbook init
//! chartbook account create 1 "Assets" --type Asset
//! chartbook suggest 1
//! chartbook account create 1.1 "Cash" --type Asset --posting
//! chartbook account list --tree
//! chartbook --json suggest 1.2
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod db;

use commands::{account, suggest};
use config::AppConfig;

/// Chartbook - hierarchical chart of accounts
#[derive(Parser)]
#[command(name = "chartbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Database file path (overrides config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level (overrides config; RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and schema
    Init {
        /// Delete an existing database first
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,

    /// Account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Suggest the next free code under a parent
    Suggest {
        /// Parent code (e.g., 1.2)
        #[arg(required_unless_present = "root")]
        parent: Option<String>,

        /// Suggest the next root code instead
        #[arg(long, conflicts_with = "parent")]
        root: bool,
    },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Create a new account
    Create {
        /// Dotted code (e.g., 1.2.3)
        code: String,
        /// Display name
        name: String,
        /// Account type; must match the parent's
        #[arg(long, short = 't')]
        r#type: String,
        /// Account accepts postings (and can have no children)
        #[arg(long)]
        posting: bool,
    },
    /// List all accounts
    List {
        /// Indent by depth
        #[arg(long)]
        tree: bool,
    },
    /// Show account details
    Show {
        /// Account ID
        id: i64,
    },
    /// Edit an account; omitted fields keep their value
    Update {
        /// Account ID
        id: i64,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, short = 't')]
        r#type: Option<String>,
        /// true / false
        #[arg(long)]
        posting: Option<bool>,
    },
    /// Delete an account
    Delete {
        /// Account ID
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    let config = config.with_overrides(cli.db.clone(), cli.log_level.clone())?;

    init_logging(&config.logging.level);
    tracing::debug!(db = %config.database.path.display(), "Configuration loaded");

    match cli.command {
        Commands::Init { force } => {
            db::init_database(&config.database.path, force).await?;
            println!("✅ Database initialized at {:?}", config.database.path);
        }

        Commands::Status => {
            db::show_status(&config).await?;
        }

        Commands::Account { action } => {
            let service = db::connect(&config).await?;
            account::handle(&service, action, cli.json).await?;
            service.database().close().await;
        }

        Commands::Suggest { parent, root } => {
            let service = db::connect(&config).await?;
            suggest::handle(&service, parent.as_deref(), root, cli.json).await?;
            service.database().close().await;
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
