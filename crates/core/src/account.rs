//! # Account Module
//!
//! A node in the chart of accounts.
//!
//! An account does not know its parent. The parent is recomputed from the
//! code every time it is needed (see [`crate::code::parent_of`]).

use crate::code;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier
pub type AccountId = i64;

/// Stored account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Dotted code, e.g. `1.2.3`
    pub code: String,
    pub name: String,
    /// Free-form classification (Asset, Liability, ...), shared down a branch
    pub account_type: String,
    /// Postings may target this account directly; such an account has no children
    pub accepts_entries: bool,
}

impl Account {
    /// Attach a storage id to a new account
    pub fn from_new(id: AccountId, new: NewAccount) -> Self {
        Self {
            id,
            code: new.code,
            name: new.name,
            account_type: new.account_type,
            accepts_entries: new.accepts_entries,
        }
    }

    /// Editable fields of this account
    pub fn to_new(&self) -> NewAccount {
        NewAccount {
            code: self.code.clone(),
            name: self.name.clone(),
            account_type: self.account_type.clone(),
            accepts_entries: self.accepts_entries,
        }
    }

    pub fn parent_code(&self) -> Option<&str> {
        code::parent_of(&self.code)
    }

    pub fn is_root(&self) -> bool {
        self.parent_code().is_none()
    }

    pub fn depth(&self) -> usize {
        code::depth(&self.code)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}{}]",
            self.code,
            self.name,
            self.account_type,
            if self.accepts_entries { ", posting" } else { "" }
        )
    }
}

/// Candidate account for create/update, without an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub code: String,
    pub name: String,
    pub account_type: String,
    pub accepts_entries: bool,
}

impl NewAccount {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: impl Into<String>,
        accepts_entries: bool,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type: account_type.into(),
            accepts_entries,
        }
    }

    /// Grouping account (no postings)
    pub fn group(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: impl Into<String>,
    ) -> Self {
        Self::new(code, name, account_type, false)
    }

    /// Posting account
    pub fn posting(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: impl Into<String>,
    ) -> Self {
        Self::new(code, name, account_type, true)
    }
}

/// Accounts in `existing` whose derived parent is exactly `parent_code`
pub fn direct_children<'a>(
    parent_code: &'a str,
    existing: &'a [Account],
) -> impl Iterator<Item = &'a Account> + 'a {
    existing
        .iter()
        .filter(move |a| code::is_direct_child(&a.code, parent_code))
}

/// Sort accounts into tree order
pub fn sort_by_code(accounts: &mut [Account]) {
    accounts.sort_by(|a, b| code::compare_codes(&a.code, &b.code));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: AccountId, code: &str) -> Account {
        Account::from_new(id, NewAccount::group(code, "Test", "Asset"))
    }

    #[test]
    fn test_account_from_new() {
        let acc = Account::from_new(7, NewAccount::posting("1.1.1", "Cash", "Asset"));
        assert_eq!(acc.id, 7);
        assert_eq!(acc.code, "1.1.1");
        assert!(acc.accepts_entries);
        assert_eq!(acc.parent_code(), Some("1.1"));
        assert_eq!(acc.depth(), 3);
        assert_eq!(acc.to_new().code, "1.1.1");
    }

    #[test]
    fn test_root_account() {
        let acc = account(1, "1");
        assert!(acc.is_root());
        assert_eq!(acc.parent_code(), None);
    }

    #[test]
    fn test_direct_children() {
        let all = vec![
            account(1, "1"),
            account(2, "1.1"),
            account(3, "1.2"),
            account(4, "1.2.1"),
            account(5, "11"),
        ];
        let codes: Vec<&str> = direct_children("1", &all).map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["1.1", "1.2"]);
    }

    #[test]
    fn test_sort_by_code() {
        let mut all = vec![account(1, "1.10"), account(2, "2"), account(3, "1.9")];
        sort_by_code(&mut all);
        let codes: Vec<&str> = all.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["1.9", "1.10", "2"]);
    }

    #[test]
    fn test_display() {
        let acc = Account::from_new(1, NewAccount::posting("1.1", "Cash", "Asset"));
        assert_eq!(acc.to_string(), "1.1 Cash [Asset, posting]");
    }
}
