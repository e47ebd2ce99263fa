//! Business layer errors

use chartbook_core::{AccountId, CodeError, HierarchyError};
use chartbook_persistence::PersistenceError;
use thiserror::Error;

/// Chart operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Rejections (caller-facing) ===
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("Invalid account code: {0}")]
    InvalidCode(#[from] CodeError),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Account id in request ({body}) does not match target id ({target})")]
    IdMismatch { target: AccountId, body: AccountId },

    // === Wrapped errors ===
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

impl BusinessError {
    /// True for errors caused by the request rather than the infrastructure
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Persistence(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }

    /// Underlying hierarchy rule, if that is what failed
    pub fn hierarchy(&self) -> Option<&HierarchyError> {
        match self {
            Self::Hierarchy(err) => Some(err),
            _ => None,
        }
    }
}
