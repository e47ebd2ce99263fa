//! Next-code suggestion
//!
//! Finds the next free sibling number under a parent. When the parent's
//! level is full (999), the suggestion rolls up one level and proposes a new
//! branch under the grandparent instead.
//!
//! Suggestion is a pure read and reserves nothing. Two callers asking at the
//! same time get the same answer; the duplicate-code check at create time
//! settles the race.

use crate::account::{direct_children, Account};
use crate::code::{self, MAX_SEGMENT};
use crate::error::{HierarchyError, HierarchyResult};
use crate::trace::{HierarchyTrace, NoopTrace};
use serde::{Deserialize, Serialize};

/// Suggested code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Suggestion {
    /// Rolled over: the requested parent is full, use `new_parent_code` instead.
    /// Listed first so untagged deserialization tries the wider shape first.
    Rollover {
        #[serde(rename = "newParentCode")]
        new_parent_code: String,
        code: String,
    },
    /// Next child under the requested parent
    Child { code: String },
}

impl Suggestion {
    pub fn code(&self) -> &str {
        match self {
            Suggestion::Child { code } | Suggestion::Rollover { code, .. } => code,
        }
    }

    /// Replacement parent when the requested level overflowed
    pub fn new_parent_code(&self) -> Option<&str> {
        match self {
            Suggestion::Child { .. } => None,
            Suggestion::Rollover {
                new_parent_code, ..
            } => Some(new_parent_code),
        }
    }

    pub fn is_rollover(&self) -> bool {
        matches!(self, Suggestion::Rollover { .. })
    }
}

/// Computes next sibling codes over a snapshot of all accounts
pub struct CodeSuggester<'a> {
    existing: &'a [Account],
    trace: &'a dyn HierarchyTrace,
}

impl<'a> CodeSuggester<'a> {
    pub fn new(existing: &'a [Account]) -> Self {
        Self {
            existing,
            trace: &NoopTrace,
        }
    }

    /// Report internals to `trace`
    pub fn with_trace(mut self, trace: &'a dyn HierarchyTrace) -> Self {
        self.trace = trace;
        self
    }

    /// Next number under `parent_code`: highest valid child number + 1
    pub fn next_number(&self, parent_code: &str) -> u32 {
        let mut children = 0;
        let max = direct_children(parent_code, self.existing)
            .filter_map(|child| {
                children += 1;
                let number = code::last_segment(&child.code);
                self.trace.child_scanned(parent_code, child, number);
                number
            })
            .max()
            .unwrap_or(0);

        let next = max.saturating_add(1);
        self.trace.level_counted(parent_code, children, next);
        next
    }

    /// Suggest the next child code under `parent_code`
    pub fn suggest(&self, parent_code: &str) -> HierarchyResult<Suggestion> {
        let next = self.next_number(parent_code);
        if next <= MAX_SEGMENT {
            return Ok(Suggestion::Child {
                code: code::child_code(parent_code, next),
            });
        }

        let Some(grandparent) = code::parent_of(parent_code).filter(|p| !p.is_empty()) else {
            self.trace.level_overflow(parent_code, None);
            return Err(HierarchyError::LevelExhausted {
                level: parent_code.to_string(),
                ancestor: None,
            });
        };
        self.trace.level_overflow(parent_code, Some(grandparent));

        let next = self.next_number(grandparent);
        if next > MAX_SEGMENT {
            return Err(HierarchyError::LevelExhausted {
                level: parent_code.to_string(),
                ancestor: Some(grandparent.to_string()),
            });
        }

        Ok(Suggestion::Rollover {
            new_parent_code: grandparent.to_string(),
            code: code::child_code(grandparent, next),
        })
    }

    /// Suggest the next root code (single segment)
    pub fn suggest_root(&self) -> HierarchyResult<String> {
        let max = self
            .existing
            .iter()
            .filter(|a| code::parent_of(&a.code).is_none())
            .filter_map(|a| code::last_segment(&a.code))
            .max()
            .unwrap_or(0);

        let next = max.saturating_add(1);
        if next > MAX_SEGMENT {
            self.trace.level_overflow("", None);
            return Err(HierarchyError::LevelExhausted {
                level: String::new(),
                ancestor: None,
            });
        }
        Ok(next.to_string())
    }
}

/// Suggest the next child code under `parent_code`
pub fn suggest_next_code(parent_code: &str, existing: &[Account]) -> HierarchyResult<Suggestion> {
    CodeSuggester::new(existing).suggest(parent_code)
}
