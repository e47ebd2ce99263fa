//! Structural validation of a candidate account
//!
//! One function decides both create and update. On update the caller passes
//! the account's own id so its prior row is ignored.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. duplicate code
//! 2. parent exists
//! 3. parent does not accept entries
//! 4. type matches parent

use crate::account::{Account, AccountId, NewAccount};
use crate::code;
use crate::error::HierarchyError;

/// Validation result with detailed error
pub type ValidationResult = Result<(), HierarchyError>;

/// Validates candidates against a snapshot of all accounts
#[derive(Debug, Clone, Copy)]
pub struct HierarchyValidator<'a> {
    existing: &'a [Account],
}

impl<'a> HierarchyValidator<'a> {
    pub fn new(existing: &'a [Account]) -> Self {
        Self { existing }
    }

    /// Validate `candidate`. `self_id` is the id being updated, if any.
    pub fn validate(&self, candidate: &NewAccount, self_id: Option<AccountId>) -> ValidationResult {
        self.check_duplicate(candidate, self_id)?;

        // An empty parent (".5") is treated like a root, as is a single segment
        match code::parent_of(&candidate.code).filter(|p| !p.is_empty()) {
            Some(parent_code) => self.check_parent(candidate, parent_code, self_id),
            None => Ok(()),
        }
    }

    fn others(&self, self_id: Option<AccountId>) -> impl Iterator<Item = &'a Account> + '_ {
        self.existing
            .iter()
            .filter(move |a| Some(a.id) != self_id)
    }

    fn check_duplicate(&self, candidate: &NewAccount, self_id: Option<AccountId>) -> ValidationResult {
        if self.others(self_id).any(|a| a.code == candidate.code) {
            return Err(HierarchyError::duplicate_code(&candidate.code));
        }
        Ok(())
    }

    fn check_parent(
        &self,
        candidate: &NewAccount,
        parent_code: &str,
        self_id: Option<AccountId>,
    ) -> ValidationResult {
        let parent = self
            .others(self_id)
            .find(|a| a.code == parent_code)
            .ok_or_else(|| HierarchyError::parent_not_found(parent_code))?;

        if parent.accepts_entries {
            return Err(HierarchyError::ParentAcceptsEntries {
                parent_code: parent.code.clone(),
            });
        }

        if candidate.account_type != parent.account_type {
            return Err(HierarchyError::TypeMismatch {
                expected: parent.account_type.clone(),
                actual: candidate.account_type.clone(),
            });
        }

        Ok(())
    }
}

/// Validate a candidate against `existing`
pub fn validate_account(
    candidate: &NewAccount,
    existing: &[Account],
    self_id: Option<AccountId>,
) -> ValidationResult {
    HierarchyValidator::new(existing).validate(candidate, self_id)
}
