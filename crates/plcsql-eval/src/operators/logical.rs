//! Logical Operators
//!
//! Implements: NOT, AND, OR, XOR over three-valued booleans (`None` is
//! unknown), and IS NULL / IS NOT NULL under the empty-string policy.

use crate::engine::Runtime;
use plcsql_types::Value;

pub fn not(v: Option<bool>) -> Option<bool> {
    v.map(|v| !v)
}

/// FALSE wins over unknown
pub fn and(l: Option<bool>, r: Option<bool>) -> Option<bool> {
    match (l, r) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }
}

/// TRUE wins over unknown
pub fn or(l: Option<bool>, r: Option<bool>) -> Option<bool> {
    match (l, r) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}

pub fn xor(l: Option<bool>, r: Option<bool>) -> Option<bool> {
    l.zip(r).map(|(l, r)| l != r)
}

impl Runtime {
    /// IS NULL; with empty-string mode on, '' IS NULL is true
    pub fn is_null(&self, v: &Value) -> bool {
        self.effective(v).is_null()
    }

    pub fn is_not_null(&self, v: &Value) -> bool {
        !self.is_null(v)
    }
}
