//! Database schema definitions
//!
//! Row types for sqlx mapping, plus the DDL applied by `init_database`.

use chartbook_core::Account;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema for the chart of accounts.
///
/// `code` is UNIQUE: whatever the service validated, storage has the last word
/// on duplicates.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS chart_accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    account_type TEXT NOT NULL,
    accepts_entries BOOLEAN NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_chart_accounts_type ON chart_accounts(account_type);
"#;

/// Row type for the `chart_accounts` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub account_type: String,
    pub accepts_entries: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            code: row.code,
            name: row.name,
            account_type: row.account_type,
            accepts_entries: row.accepts_entries,
        }
    }
}
