//! # Error Module
//!
//! Structural rejections produced by the hierarchy engine.
//!
//! None of these are fatal. They are returned to the caller, who decides how
//! to present them.

use thiserror::Error;

/// Hierarchy rule violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("An account with code '{code}' already exists")]
    DuplicateCode { code: String },

    #[error("Parent account with code '{parent_code}' not found")]
    ParentNotFound { parent_code: String },

    #[error("Parent account '{parent_code}' accepts entries and cannot have child accounts")]
    ParentAcceptsEntries { parent_code: String },

    #[error("Account type '{actual}' must match parent account type '{expected}'")]
    TypeMismatch { expected: String, actual: String },

    #[error("{}", exhausted_message(.level, .ancestor))]
    LevelExhausted {
        /// Level that ran out of numbers
        level: String,
        /// Ancestor level that was tried as a fallback, if any
        ancestor: Option<String>,
    },

    #[error("Account '{code}' still has {children} child account(s)")]
    HasChildren { code: String, children: usize },
}

fn exhausted_message(level: &str, ancestor: &Option<String>) -> String {
    match ancestor {
        None if level.is_empty() => "Code limit reached for root accounts".to_string(),
        None => format!(
            "Code limit reached under '{}' and there is no level above to roll over into",
            level
        ),
        Some(ancestor) => format!(
            "Code limit reached under '{}' and under '{}': all levels saturated",
            level, ancestor
        ),
    }
}

/// Result type alias with HierarchyError
pub type HierarchyResult<T> = Result<T, HierarchyError>;

impl HierarchyError {
    pub fn duplicate_code(code: &str) -> Self {
        Self::DuplicateCode {
            code: code.to_string(),
        }
    }

    pub fn parent_not_found(parent_code: &str) -> Self {
        Self::ParentNotFound {
            parent_code: parent_code.to_string(),
        }
    }

    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateCode { .. } => "duplicate_code",
            Self::ParentNotFound { .. } => "parent_not_found",
            Self::ParentAcceptsEntries { .. } => "parent_accepts_entries",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::LevelExhausted { .. } => "level_exhausted",
            Self::HasChildren { .. } => "has_children",
        }
    }

    pub fn is_level_exhausted(&self) -> bool {
        matches!(self, Self::LevelExhausted { .. })
    }
}
