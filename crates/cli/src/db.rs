//! Database initialization and status

use anyhow::{Context, Result};
use chartbook_business::ChartService;
use chartbook_persistence::{database_url, Database};
use std::path::Path;

use crate::config::AppConfig;

/// Initialize the database with schema
pub async fn init_database(db_path: &Path, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    let db = Database::open(db_path)
        .await
        .context("Failed to create database")?;
    db.close().await;
    Ok(())
}

/// Show database status
pub async fn show_status(config: &AppConfig) -> Result<()> {
    let db_path = &config.database.path;
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'chartbook init' to create the database");
        return Ok(());
    }

    let service = connect(config).await?;
    let accounts = service.list_accounts().await?;
    let roots = accounts.iter().filter(|a| a.is_root()).count();
    let postings = accounts.iter().filter(|a| a.accepts_entries).count();
    let max_depth = accounts.iter().map(|a| a.depth()).max().unwrap_or(0);
    let options = service.options();

    println!("📊 Database Status");
    println!("   Path:          {:?}", db_path);
    println!();
    println!("   Accounts:      {}", accounts.len());
    println!("   Roots:         {}", roots);
    println!("   Posting:       {}", postings);
    println!("   Max depth:     {}", max_depth);
    println!("   Strict codes:  {}", options.strict_codes);
    println!("   Delete policy: {}", options.delete_policy);

    service.database().close().await;
    Ok(())
}

/// Open the configured database as a chart service
pub async fn connect(config: &AppConfig) -> Result<ChartService> {
    let db_path = &config.database.path;
    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {:?}. Run 'chartbook init' first.",
            db_path
        );
    }

    let db = Database::connect(&database_url(db_path))
        .await
        .context("Failed to connect to database")?;
    Ok(ChartService::with_options(db, config.chart_options()))
}
