//! Opt-in structural policies
//!
//! Deleting an account never cascades. By default it is not checked at all,
//! so children may be left pointing at a missing parent code. Callers that
//! want stricter behaviour enable [`DeletePolicy::RejectIfChildren`].

use crate::account::{direct_children, Account};
use crate::error::{HierarchyError, HierarchyResult};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What to do when deleting an account that has children
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DeletePolicy {
    /// Delete regardless of children
    #[default]
    Unrestricted,
    /// Refuse while direct children exist
    RejectIfChildren,
}

impl DeletePolicy {
    /// Check whether `target` may be deleted from `existing`
    pub fn check(&self, target: &Account, existing: &[Account]) -> HierarchyResult<()> {
        match self {
            DeletePolicy::Unrestricted => Ok(()),
            DeletePolicy::RejectIfChildren => {
                let children = direct_children(&target.code, existing)
                    .filter(|a| a.id != target.id)
                    .count();
                if children > 0 {
                    return Err(HierarchyError::HasChildren {
                        code: target.code.clone(),
                        children,
                    });
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::NewAccount;

    fn chart() -> Vec<Account> {
        vec![
            Account::from_new(1, NewAccount::group("1", "Assets", "Asset")),
            Account::from_new(2, NewAccount::group("1.1", "Current", "Asset")),
            Account::from_new(3, NewAccount::posting("1.1.1", "Cash", "Asset")),
        ]
    }

    #[test]
    fn test_unrestricted_allows_parent_delete() {
        let all = chart();
        assert!(DeletePolicy::Unrestricted.check(&all[0], &all).is_ok());
    }

    #[test]
    fn test_reject_if_children() {
        let all = chart();
        let policy = DeletePolicy::RejectIfChildren;

        let result = policy.check(&all[1], &all);
        assert_eq!(
            result,
            Err(HierarchyError::HasChildren {
                code: "1.1".to_string(),
                children: 1
            })
        );

        // Leaves can always go
        assert!(policy.check(&all[2], &all).is_ok());
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(DeletePolicy::default(), DeletePolicy::Unrestricted);
        assert_eq!(DeletePolicy::RejectIfChildren.to_string(), "reject-if-children");
        assert_eq!(
            "reject-if-children".parse::<DeletePolicy>().unwrap(),
            DeletePolicy::RejectIfChildren
        );
    }
}
