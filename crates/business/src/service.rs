//! Chart service - the collaborator that owns storage
//!
//! Each write runs in one `BEGIN IMMEDIATE` transaction: load the snapshot,
//! validate, write, commit. Writers queue on the database lock (bounded by the
//! connection busy timeout), so a losing writer validates against the
//! winner's row. The UNIQUE constraint on `code` backs up the duplicate check.

use crate::error::{BusinessError, BusinessResult};
use chartbook_core::account::sort_by_code;
use chartbook_core::{
    validate_account, Account, AccountCode, AccountId, CodeSuggester, DeletePolicy,
    HierarchyError, NewAccount, Suggestion, TracingTrace,
};
use chartbook_persistence::{AccountRepo, Database, PersistenceError};
use sqlx::{Executor, Sqlite, Transaction};

/// Service behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    /// Reject codes that are not `n(.n)*` with every n in 1..=999
    pub strict_codes: bool,
    /// Guard applied on delete
    pub delete_policy: DeletePolicy,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            strict_codes: true,
            delete_policy: DeletePolicy::Unrestricted,
        }
    }
}

/// Chart of accounts operations
pub struct ChartService {
    db: Database,
    options: ChartOptions,
}

impl ChartService {
    pub fn new(db: Database) -> Self {
        Self::with_options(db, ChartOptions::default())
    }

    pub fn with_options(db: Database, options: ChartOptions) -> Self {
        Self { db, options }
    }

    pub fn options(&self) -> ChartOptions {
        self.options
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// All accounts in tree order
    pub async fn list_accounts(&self) -> BusinessResult<Vec<Account>> {
        let mut accounts = load_snapshot(self.db.pool()).await?;
        sort_by_code(&mut accounts);
        Ok(accounts)
    }

    /// Get one account
    pub async fn get_account(&self, id: AccountId) -> BusinessResult<Account> {
        AccountRepo::get_by_id(self.db.pool(), id)
            .await
            .map(Account::from)
            .map_err(|e| not_found_or(e, id))
    }

    /// Validate and store a new account
    pub async fn create_account(&self, new: NewAccount) -> BusinessResult<Account> {
        let new = self.normalize(new)?;

        let mut tx = self.begin_write().await?;
        let existing = load_snapshot(&mut *tx).await?;

        if let Err(err) = validate_account(&new, &existing, None) {
            tracing::warn!(code = %new.code, reason = err.kind(), "Create rejected");
            return Err(err.into());
        }

        let id = AccountRepo::insert(&mut *tx, &new)
            .await
            .map_err(|e| duplicate_backstop(e, &new.code))?;
        tx.commit().await.map_err(PersistenceError::from)?;

        tracing::info!(id, code = %new.code, "Account created");
        Ok(Account::from_new(id, new))
    }

    /// Replace account `id` with `account`, re-validating as a fresh insert
    pub async fn update_account(&self, id: AccountId, account: Account) -> BusinessResult<Account> {
        if account.id != id {
            return Err(BusinessError::IdMismatch {
                target: id,
                body: account.id,
            });
        }
        let new = self.normalize(account.to_new())?;

        let mut tx = self.begin_write().await?;
        AccountRepo::get_by_id(&mut *tx, id)
            .await
            .map_err(|e| not_found_or(e, id))?;
        let existing = load_snapshot(&mut *tx).await?;

        if let Err(err) = validate_account(&new, &existing, Some(id)) {
            tracing::warn!(id, code = %new.code, reason = err.kind(), "Update rejected");
            return Err(err.into());
        }

        AccountRepo::update(&mut *tx, id, &new)
            .await
            .map_err(|e| duplicate_backstop(e, &new.code))?;
        tx.commit().await.map_err(PersistenceError::from)?;

        tracing::info!(id, code = %new.code, "Account updated");
        Ok(Account::from_new(id, new))
    }

    /// Delete account `id`, subject to the configured delete policy
    pub async fn delete_account(&self, id: AccountId) -> BusinessResult<Account> {
        let mut tx = self.begin_write().await?;
        let target: Account = AccountRepo::get_by_id(&mut *tx, id)
            .await
            .map_err(|e| not_found_or(e, id))?
            .into();

        if self.options.delete_policy != DeletePolicy::Unrestricted {
            let existing = load_snapshot(&mut *tx).await?;
            if let Err(err) = self.options.delete_policy.check(&target, &existing) {
                tracing::warn!(id, code = %target.code, reason = err.kind(), "Delete rejected");
                return Err(err.into());
            }
        }

        AccountRepo::delete(&mut *tx, id).await?;
        tx.commit().await.map_err(PersistenceError::from)?;

        tracing::info!(id, code = %target.code, "Account deleted");
        Ok(target)
    }

    /// Suggest the next child code under `parent_code`
    pub async fn suggest_next_code(&self, parent_code: &str) -> BusinessResult<Suggestion> {
        let parent_code = parent_code.trim();
        if self.options.strict_codes {
            AccountCode::parse(parent_code)?;
        }

        let existing = load_snapshot(self.db.pool()).await?;
        let suggestion = CodeSuggester::new(&existing)
            .with_trace(&TracingTrace)
            .suggest(parent_code)?;

        tracing::info!(
            parent = parent_code,
            code = suggestion.code(),
            rollover = suggestion.is_rollover(),
            "Suggested code"
        );
        Ok(suggestion)
    }

    /// Suggest the next root code
    pub async fn suggest_root_code(&self) -> BusinessResult<String> {
        let existing = load_snapshot(self.db.pool()).await?;
        let code = CodeSuggester::new(&existing)
            .with_trace(&TracingTrace)
            .suggest_root()?;
        Ok(code)
    }

    /// Number of stored accounts
    pub async fn count(&self) -> BusinessResult<i64> {
        Ok(AccountRepo::count(self.db.pool()).await?)
    }

    /// Start a transaction that holds the write lock from its first read
    async fn begin_write(&self) -> BusinessResult<Transaction<'static, Sqlite>> {
        let tx = self
            .db
            .pool()
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(PersistenceError::from)?;
        Ok(tx)
    }

    fn normalize(&self, mut new: NewAccount) -> BusinessResult<NewAccount> {
        if self.options.strict_codes {
            new.code = AccountCode::parse(&new.code)?.into();
        }
        Ok(new)
    }
}

/// Load every account as a snapshot for the engine
async fn load_snapshot<'e, E>(executor: E) -> BusinessResult<Vec<Account>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = AccountRepo::get_all(executor).await?;
    Ok(rows.into_iter().map(Account::from).collect())
}

fn not_found_or(err: PersistenceError, id: AccountId) -> BusinessError {
    if err.is_not_found() {
        BusinessError::AccountNotFound(id)
    } else {
        err.into()
    }
}

fn duplicate_backstop(err: PersistenceError, code: &str) -> BusinessError {
    if err.is_unique_violation() {
        tracing::warn!(code, "Duplicate code caught by storage constraint");
        HierarchyError::duplicate_code(code).into()
    } else {
        err.into()
    }
}
