//! Repository implementations for SQLite
//!
//! Every method takes any SQLite executor, so the same calls work on the pool
//! and inside a transaction (`&mut *tx`).

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::{AccountRow, SCHEMA};
use chartbook_core::{AccountId, NewAccount};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Executor, Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// Account Repository
// ============================================================================

/// Repository for the chart_accounts table
pub struct AccountRepo;

impl AccountRepo {
    /// All accounts, ordered by id
    pub async fn get_all<'e, E>(executor: E) -> PersistenceResult<Vec<AccountRow>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, AccountRow>("SELECT * FROM chart_accounts ORDER BY id")
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// Get account by id
    pub async fn get_by_id<'e, E>(executor: E, id: AccountId) -> PersistenceResult<AccountRow>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM chart_accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Account", id))
    }

    /// Insert a new account and return its id
    pub async fn insert<'e, E>(executor: E, account: &NewAccount) -> PersistenceResult<AccountId>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO chart_accounts (code, name, account_type, accepts_entries, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.code)
        .bind(&account.name)
        .bind(&account.account_type)
        .bind(account.accepts_entries)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Replace every editable field of account `id`
    pub async fn update<'e, E>(
        executor: E,
        id: AccountId,
        account: &NewAccount,
    ) -> PersistenceResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE chart_accounts
            SET code = ?, name = ?, account_type = ?, accepts_entries = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&account.code)
        .bind(&account.name)
        .bind(&account.account_type)
        .bind(account.accepts_entries)
        .bind(Utc::now())
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Account", id));
        }
        Ok(())
    }

    /// Delete account `id`
    pub async fn delete<'e, E>(executor: E, id: AccountId) -> PersistenceResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM chart_accounts WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Account", id));
        }
        Ok(())
    }

    /// Count accounts
    pub async fn count<'e, E>(executor: E) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chart_accounts")
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Database initialization
// ============================================================================

/// How long a writer waits for the database lock before SQLITE_BUSY
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn connect_options(database_url: &str) -> PersistenceResult<SqliteConnectOptions> {
    Ok(SqliteConnectOptions::from_str(database_url)?.busy_timeout(BUSY_TIMEOUT))
}

/// Connect to an existing database
pub async fn create_pool(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(connect_options(database_url)?)
        .await?;
    Ok(pool)
}

/// Apply the schema (idempotent)
pub async fn run_migrations(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

/// Open (creating if missing) a database and apply the schema
pub async fn init_database(database_url: &str) -> PersistenceResult<SqlitePool> {
    let options = connect_options(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}
