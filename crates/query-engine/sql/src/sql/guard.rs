//! Screening of raw `ORDER BY` expressions.
//!
//! An ordering expression is spliced into the statement text, so it cannot be
//! bound as a parameter. Two checks run in order: a blacklist of statement
//! keywords, then (when enabled) a shape check accepting only a comma separated
//! list of `column [ASC|DESC] [NULLS FIRST|LAST]` items. The blacklist alone is
//! a heuristic and does not catch every injection; keep the shape check on.

use regex::Regex;
use std::sync::LazyLock;

/// Statement keywords never allowed in an ordering expression.
pub const BLACKLISTED_KEYWORDS: [&str; 8] = [
    "SELECT", "DELETE", "DROP", "INSERT", "UPDATE", "TRUNCATE", "MERGE", "EXEC",
];

static BLACKLIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({})\b", BLACKLISTED_KEYWORDS.join("|")))
        .expect("blacklist pattern is valid")
});

const ORDERING_ITEM: &str =
    r"[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)?(?:\s+(?i:asc|desc))?(?:\s+(?i:nulls)\s+(?i:first|last))?";

static ORDERING_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*{ORDERING_ITEM}(?:\s*,\s*{ORDERING_ITEM})*\s*$"
    ))
    .expect("ordering pattern is valid")
});

/// The outcome of screening an ordering expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Safe,
    /// Contains a blacklisted statement keyword, reported in upper case.
    Blacklisted(String),
    /// Not a plain list of columns and directions.
    Malformed,
}

impl Verdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderByGuard {
    pub check_shape: bool,
}

impl Default for OrderByGuard {
    fn default() -> Self {
        OrderByGuard { check_shape: true }
    }
}

impl OrderByGuard {
    /// Only the keyword blacklist.
    pub fn blacklist_only() -> OrderByGuard {
        OrderByGuard { check_shape: false }
    }

    pub fn screen(&self, expression: &str) -> Verdict {
        if let Some(found) = BLACKLIST.find(expression) {
            return Verdict::Blacklisted(found.as_str().to_ascii_uppercase());
        }
        if self.check_shape && !ORDERING_LIST.is_match(expression) {
            return Verdict::Malformed;
        }
        Verdict::Safe
    }
}
