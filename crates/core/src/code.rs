//! # Code Module
//!
//! Dotted account codes: `1`, `1.2`, `1.2.10`.
//!
//! The hierarchy lives entirely in the code string. The parent of `1.2.3` is
//! `1.2`, and a single-segment code is a root. Nothing is stored besides the
//! string itself.
//!
//! Two layers live here:
//! - free functions over `&str` (`parent_of`, `last_segment`, ...), which are
//!   permissive and never fail;
//! - [`AccountCode`], a strictly parsed code for callers that accept raw input.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Segment separator
pub const SEPARATOR: char = '.';

/// Largest number a single segment may carry
pub const MAX_SEGMENT: u32 = 999;

/// Parent code of `code`, or `None` for a root.
///
/// ```
/// use chartbook_core::code::parent_of;
///
/// assert_eq!(parent_of("1.2.3"), Some("1.2"));
/// assert_eq!(parent_of("7"), None);
/// ```
pub fn parent_of(code: &str) -> Option<&str> {
    code.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

/// Last segment as a positive number.
///
/// Returns `None` when the segment does not parse or is zero, so malformed
/// siblings simply drop out of numbering.
pub fn last_segment(code: &str) -> Option<u32> {
    let last = code.rsplit(SEPARATOR).next()?;
    last.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Iterate the raw segments of a code
pub fn segments(code: &str) -> impl Iterator<Item = &str> {
    code.split(SEPARATOR)
}

/// Number of segments (a root has depth 1)
pub fn depth(code: &str) -> usize {
    segments(code).count()
}

/// True when `code` sits exactly one level below `parent`
pub fn is_direct_child(code: &str, parent: &str) -> bool {
    parent_of(code) == Some(parent)
}

/// Build the code of child number `n` under `parent`
pub fn child_code(parent: &str, n: u32) -> String {
    format!("{}{}{}", parent, SEPARATOR, n)
}

/// Tree ordering: compare segment by segment, numerically where possible.
///
/// `1.2` sorts before `1.10`, and a parent sorts before its children.
/// Segments that are not numbers fall back to string order after all
/// numeric ones.
pub fn compare_codes(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Errors from strict code parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Account code cannot be empty")]
    Empty,

    #[error("Account code '{code}' has an empty segment at position {position}")]
    EmptySegment { code: String, position: usize },

    #[error("Account code '{code}' has a non-numeric segment '{segment}'")]
    NotNumeric { code: String, segment: String },

    #[error("Account code '{code}': segment {value} is outside 1..={max}", max = MAX_SEGMENT)]
    OutOfRange { code: String, value: u64 },
}

/// A well-formed account code.
///
/// Every segment is a plain decimal number in `1..=999`. Ordering follows
/// the tree (segment-wise, numeric).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountCode {
    raw: String,
}

impl AccountCode {
    /// Parse and validate a code
    pub fn parse(input: &str) -> Result<Self, CodeError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CodeError::Empty);
        }

        for (position, segment) in segments(input).enumerate() {
            if segment.is_empty() {
                return Err(CodeError::EmptySegment {
                    code: input.to_string(),
                    position: position + 1,
                });
            }
            if !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CodeError::NotNumeric {
                    code: input.to_string(),
                    segment: segment.to_string(),
                });
            }
            // All digits; only overflow can fail here
            let value = segment.parse::<u64>().unwrap_or(u64::MAX);
            if value == 0 || value > MAX_SEGMENT as u64 {
                return Err(CodeError::OutOfRange {
                    code: input.to_string(),
                    value,
                });
            }
        }

        Ok(Self {
            raw: input.to_string(),
        })
    }

    /// Root code with a single segment
    pub fn root(n: u32) -> Result<Self, CodeError> {
        Self::parse(&n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric segments
    pub fn numbers(&self) -> Vec<u32> {
        // Validated in parse, every segment is a number
        segments(&self.raw)
            .filter_map(|s| s.parse::<u32>().ok())
            .collect()
    }

    pub fn depth(&self) -> usize {
        depth(&self.raw)
    }

    pub fn is_root(&self) -> bool {
        self.depth() == 1
    }

    pub fn parent(&self) -> Option<AccountCode> {
        parent_of(&self.raw).map(|p| AccountCode { raw: p.to_string() })
    }

    /// Number carried by the last segment
    pub fn last(&self) -> u32 {
        last_segment(&self.raw).unwrap_or_default()
    }

    /// Code of child number `n`
    pub fn child(&self, n: u32) -> Result<AccountCode, CodeError> {
        Self::parse(&child_code(&self.raw, n))
    }

    /// True when `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &AccountCode) -> bool {
        other.raw.len() > self.raw.len()
            && other.raw.starts_with(&self.raw)
            && other.raw[self.raw.len()..].starts_with(SEPARATOR)
    }
}

impl fmt::Display for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for AccountCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountCode> for String {
    fn from(code: AccountCode) -> Self {
        code.raw
    }
}

impl AsRef<str> for AccountCode {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl PartialOrd for AccountCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AccountCode {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_codes(&self.raw, &other.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of("1.2.3"), Some("1.2"));
        assert_eq!(parent_of("1.2"), Some("1"));
        assert_eq!(parent_of("1"), None);
        assert_eq!(parent_of("10.20.300"), Some("10.20"));
    }

    #[test]
    fn test_parent_drops_exactly_one_segment() {
        for code in ["1.2", "1.2.3", "4.5.6.7", "1.999.1.2.3"] {
            let parent = parent_of(code).unwrap();
            assert_eq!(depth(parent), depth(code) - 1);
            let cut = code.rfind('.').unwrap();
            assert_eq!(parent, &code[..cut]);
        }
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("1.2.10"), Some(10));
        assert_eq!(last_segment("7"), Some(7));
        assert_eq!(last_segment("1.2.x"), None);
        assert_eq!(last_segment("1.2.0"), None);
        assert_eq!(last_segment("1.2.-4"), None);
        assert_eq!(last_segment("1.2."), None);
    }

    #[test]
    fn test_direct_child_is_exact() {
        assert!(is_direct_child("1.2.3", "1.2"));
        assert!(!is_direct_child("1.2.3", "1"));
        assert!(!is_direct_child("1.20", "1.2"));
        assert!(!is_direct_child("1", "1"));
    }

    #[test]
    fn test_compare_codes() {
        assert_eq!(compare_codes("1.2", "1.10"), Ordering::Less);
        assert_eq!(compare_codes("1", "1.1"), Ordering::Less);
        assert_eq!(compare_codes("2", "1.999"), Ordering::Greater);
        assert_eq!(compare_codes("3.4", "3.4"), Ordering::Equal);

        let mut codes = vec!["1.10", "2", "1.2", "1", "1.2.1"];
        codes.sort_by(|a, b| compare_codes(a, b));
        assert_eq!(codes, vec!["1", "1.2", "1.2.1", "1.10", "2"]);
    }

    #[test]
    fn test_parse_valid_code() {
        let code: AccountCode = "1.2.999".parse().unwrap();
        assert_eq!(code.numbers(), vec![1, 2, 999]);
        assert_eq!(code.depth(), 3);
        assert_eq!(code.last(), 999);
        assert_eq!(code.parent().unwrap().as_str(), "1.2");
        assert!(!code.is_root());
        assert!(AccountCode::root(4).unwrap().is_root());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(AccountCode::parse(""), Err(CodeError::Empty));
        assert!(matches!(
            AccountCode::parse("1..2"),
            Err(CodeError::EmptySegment { position: 2, .. })
        ));
        assert!(matches!(
            AccountCode::parse("1.a"),
            Err(CodeError::NotNumeric { .. })
        ));
        assert!(matches!(
            AccountCode::parse("1.+2"),
            Err(CodeError::NotNumeric { .. })
        ));
        assert!(matches!(
            AccountCode::parse("1.0"),
            Err(CodeError::OutOfRange { value: 0, .. })
        ));
        assert!(matches!(
            AccountCode::parse("1.1000"),
            Err(CodeError::OutOfRange { value: 1000, .. })
        ));
    }

    #[test]
    fn test_child_and_ancestry() {
        let parent = AccountCode::parse("1.2").unwrap();
        let child = parent.child(3).unwrap();
        assert_eq!(child.as_str(), "1.2.3");
        assert!(parent.is_ancestor_of(&child));
        assert!(!child.is_ancestor_of(&parent));

        let lookalike = AccountCode::parse("1.20").unwrap();
        assert!(!parent.is_ancestor_of(&lookalike));

        assert!(parent.child(1000).is_err());
    }

    #[test]
    fn test_code_ordering() {
        let mut codes: Vec<AccountCode> = ["1.10", "1.2", "1"]
            .iter()
            .map(|c| c.parse().unwrap())
            .collect();
        codes.sort();
        let sorted: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(sorted, vec!["1", "1.2", "1.10"]);
    }

    #[test]
    fn test_code_serde() {
        let code = AccountCode::parse("3.1").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"3.1\"");

        let back: AccountCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);

        let bad: Result<AccountCode, _> = serde_json::from_str("\"3.x\"");
        assert!(bad.is_err());
    }
}
