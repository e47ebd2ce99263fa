//! # Chartbook Core
//!
//! Hierarchy engine for a chart of accounts.
//!
//! Every account carries a dotted code (`1.2.3`) and its place in the tree is
//! derived from that code alone. The engine is pure: callers hand it a
//! snapshot of all accounts and get back a decision.
//!
//! ## Key Types
//! - [`HierarchyValidator`]: checks a new or edited account against its parent
//! - [`CodeSuggester`]: proposes the next free code under a parent
//! - [`AccountCode`]: strictly parsed code
//! - [`DeletePolicy`]: opt-in guard against orphaning children
//!
//! ```
//! use chartbook_core::{suggest_next_code, validate_account, Account, NewAccount};
//!
//! let chart = vec![Account::from_new(1, NewAccount::group("1", "Assets", "Asset"))];
//!
//! let next = suggest_next_code("1", &chart).unwrap();
//! assert_eq!(next.code(), "1.1");
//!
//! let cash = NewAccount::posting(next.code(), "Cash", "Asset");
//! assert!(validate_account(&cash, &chart, None).is_ok());
//! ```

pub mod account;
pub mod code;
pub mod error;
pub mod policy;
pub mod suggester;
pub mod trace;
pub mod validator;

pub use account::{Account, AccountId, NewAccount};
pub use code::{AccountCode, CodeError, MAX_SEGMENT};
pub use error::{HierarchyError, HierarchyResult};
pub use policy::DeletePolicy;
pub use suggester::{suggest_next_code, CodeSuggester, Suggestion};
pub use trace::{HierarchyTrace, NoopTrace, TracingTrace};
pub use validator::{validate_account, HierarchyValidator, ValidationResult};
