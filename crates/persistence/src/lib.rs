//! # Chartbook Persistence
//!
//! SQLite storage for the chart of accounts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chartbook_persistence::{AccountRepo, Database};
//!
//! let db = Database::open("data/chartbook.db").await?;
//! let rows = AccountRepo::get_all(db.pool()).await?;
//!
//! // Same repo inside a transaction
//! let mut tx = db.pool().begin().await?;
//! let id = AccountRepo::insert(&mut *tx, &new_account).await?;
//! tx.commit().await?;
//! ```

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::{create_pool, init_database, run_migrations, AccountRepo, AccountRow};

use sqlx::SqlitePool;
use std::path::Path;

/// Database facade
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a database file, creating it and its schema if needed
    pub async fn open<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PersistenceError::Configuration(format!(
                    "cannot create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Self::init(&database_url(path)).await
    }

    /// Connect by URL and apply the schema
    pub async fn init(db_url: &str) -> PersistenceResult<Self> {
        let pool = init_database(db_url).await?;
        Ok(Self { pool })
    }

    /// Connect by URL to an already initialized database
    pub async fn connect(db_url: &str) -> PersistenceResult<Self> {
        let pool = create_pool(db_url).await?;
        Ok(Self { pool })
    }

    /// Get SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// SQLite URL for a file path
pub fn database_url(path: &Path) -> String {
    format!("sqlite:{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartbook_core::{Account, NewAccount};
    use tempfile::TempDir;

    async fn temp_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path().join("chart.db")).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let (_dir, db) = temp_db().await;

        let id = AccountRepo::insert(db.pool(), &NewAccount::group("1", "Assets", "Asset"))
            .await
            .unwrap();

        let row = AccountRepo::get_by_id(db.pool(), id).await.unwrap();
        let account: Account = row.into();
        assert_eq!(account.id, id);
        assert_eq!(account.code, "1");
        assert_eq!(account.account_type, "Asset");
        assert!(!account.accepts_entries);

        assert_eq!(AccountRepo::count(db.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unique_code_constraint() {
        let (_dir, db) = temp_db().await;
        let account = NewAccount::group("1", "Assets", "Asset");

        AccountRepo::insert(db.pool(), &account).await.unwrap();
        let err = AccountRepo::insert(db.pool(), &account).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_dir, db) = temp_db().await;
        let id = AccountRepo::insert(db.pool(), &NewAccount::group("1", "Assets", "Asset"))
            .await
            .unwrap();

        AccountRepo::update(db.pool(), id, &NewAccount::posting("2", "Cash", "Asset"))
            .await
            .unwrap();
        let row = AccountRepo::get_by_id(db.pool(), id).await.unwrap();
        assert_eq!(row.code, "2");
        assert!(row.accepts_entries);

        AccountRepo::delete(db.pool(), id).await.unwrap();
        let err = AccountRepo::get_by_id(db.pool(), id).await.unwrap_err();
        assert!(err.is_not_found());

        let err = AccountRepo::delete(db.pool(), id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_repo_inside_transaction() {
        let (_dir, db) = temp_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        AccountRepo::insert(&mut *tx, &NewAccount::group("1", "Assets", "Asset"))
            .await
            .unwrap();
        assert_eq!(AccountRepo::get_all(&mut *tx).await.unwrap().len(), 1);
        tx.rollback().await.unwrap();

        assert_eq!(AccountRepo::count(db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("chart.db");

        let db = Database::open(&path).await.unwrap();
        AccountRepo::insert(db.pool(), &NewAccount::group("1", "Assets", "Asset"))
            .await
            .unwrap();
        db.close().await;

        let db = Database::open(&path).await.unwrap();
        assert_eq!(AccountRepo::count(db.pool()).await.unwrap(), 1);
    }
}
