//! Comparison Operators for PL/CSQL
//!
//! Implements: Equal, NotEqual, NullSafeEqual, Less, LessOrEqual, Greater,
//! GreaterOrEqual, Between, In
//!
//! Typed comparisons work on any `PartialOrd` type. Text comparisons apply
//! the empty-string policy, and their CHAR variants ignore trailing spaces.
//! The dynamic comparisons promote both operands to a common type first.

use crate::engine::Runtime;
use crate::error::{EvalResult, incomparable};
use crate::lattice::comparison_type;
use plcsql_diagnostics::RuntimeError;
use plcsql_types::Value;
use std::cmp::Ordering;

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Whether an ordering satisfies the operator
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Neq => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }
}

// =========================================================================
// Typed Comparisons
// =========================================================================

/// Apply `op`; NULL when either side is NULL or the values are unordered
pub fn compare_typed<T: PartialOrd>(op: CompareOp, l: Option<T>, r: Option<T>) -> Option<bool> {
    let (l, r) = l.zip(r)?;
    l.partial_cmp(&r).map(|ordering| op.holds(ordering))
}

pub fn eq<T: PartialOrd>(l: Option<T>, r: Option<T>) -> Option<bool> {
    compare_typed(CompareOp::Eq, l, r)
}

pub fn neq<T: PartialOrd>(l: Option<T>, r: Option<T>) -> Option<bool> {
    compare_typed(CompareOp::Neq, l, r)
}

pub fn lt<T: PartialOrd>(l: Option<T>, r: Option<T>) -> Option<bool> {
    compare_typed(CompareOp::Lt, l, r)
}

pub fn le<T: PartialOrd>(l: Option<T>, r: Option<T>) -> Option<bool> {
    compare_typed(CompareOp::Le, l, r)
}

pub fn gt<T: PartialOrd>(l: Option<T>, r: Option<T>) -> Option<bool> {
    compare_typed(CompareOp::Gt, l, r)
}

pub fn ge<T: PartialOrd>(l: Option<T>, r: Option<T>) -> Option<bool> {
    compare_typed(CompareOp::Ge, l, r)
}

/// `<=>`: NULL equals NULL and differs from everything else
pub fn null_safe_eq<T: PartialEq>(l: Option<T>, r: Option<T>) -> bool {
    l == r
}

/// `lower <= o AND o <= upper`; NULL when any of the three is NULL
pub fn between<T: PartialOrd>(o: Option<T>, lower: Option<T>, upper: Option<T>) -> Option<bool> {
    let (Some(o), Some(lower), Some(upper)) = (o, lower, upper) else {
        return None;
    };
    Some(lower <= o && o <= upper)
}

/// `o IN (list)`: TRUE on a match, else NULL when the list holds a NULL
pub fn in_list<T: PartialEq>(o: Option<T>, list: &[Option<T>]) -> Option<bool> {
    let o = o?;
    let mut null_found = false;
    for item in list {
        match item {
            Some(item) if *item == o => return Some(true),
            Some(_) => {}
            None => null_found = true,
        }
    }
    if null_found { None } else { Some(false) }
}

impl Runtime {
    // =========================================================================
    // Text Comparisons
    // =========================================================================

    /// Compare two VARCHAR values
    pub fn compare_string(&self, op: CompareOp, l: Option<&str>, r: Option<&str>) -> Option<bool> {
        compare_typed(op, self.effective_str(l), self.effective_str(r))
    }

    /// Compare two CHAR values, ignoring trailing spaces
    pub fn compare_char(&self, op: CompareOp, l: Option<&str>, r: Option<&str>) -> Option<bool> {
        compare_typed(op, self.trimmed(l), self.trimmed(r))
    }

    pub fn null_safe_eq_string(&self, l: Option<&str>, r: Option<&str>) -> bool {
        null_safe_eq(self.effective_str(l), self.effective_str(r))
    }

    pub fn null_safe_eq_char(&self, l: Option<&str>, r: Option<&str>) -> bool {
        null_safe_eq(self.trimmed(l), self.trimmed(r))
    }

    pub fn between_string(&self, o: Option<&str>, lower: Option<&str>, upper: Option<&str>) -> Option<bool> {
        between(self.effective_str(o), self.effective_str(lower), self.effective_str(upper))
    }

    pub fn between_char(&self, o: Option<&str>, lower: Option<&str>, upper: Option<&str>) -> Option<bool> {
        between(self.trimmed(o), self.trimmed(lower), self.trimmed(upper))
    }

    pub fn in_string(&self, o: Option<&str>, list: &[Option<&str>]) -> Option<bool> {
        let list: Vec<_> = list.iter().map(|s| self.effective_str(*s)).collect();
        in_list(self.effective_str(o), &list)
    }

    pub fn in_char(&self, o: Option<&str>, list: &[Option<&str>]) -> Option<bool> {
        let list: Vec<_> = list.iter().map(|s| self.trimmed(*s)).collect();
        in_list(self.trimmed(o), &list)
    }

    // =========================================================================
    // Dynamic Comparisons
    // =========================================================================

    /// Three-way comparison of two non-NULL values after promotion
    pub fn compare(&self, l: &Value, r: &Value) -> EvalResult<Ordering> {
        let common = match (l.runtime_type(), r.runtime_type()) {
            (Some(lt), Some(rt)) => comparison_type(lt, rt),
            _ => None,
        }
        .ok_or_else(incomparable)?;
        let (lv, rv) = (self.coerce(l, common)?, self.coerce(r, common)?);

        let ordering = match (&lv, &rv) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Short(a), Value::Short(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Bigint(a), Value::Bigint(b)) => a.cmp(b),
            (Value::Numeric(a), Value::Numeric(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b).ok_or_else(incomparable)?,
            (Value::Double(a), Value::Double(b)) => a.partial_cmp(b).ok_or_else(incomparable)?,
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            (Value::Datetime(a), Value::Datetime(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            _ => {
                return Err(RuntimeError::program_error(format!(
                    "unexpected operands after promotion to {common}"
                )));
            }
        };
        Ok(ordering)
    }

    fn dynamic_compare(&self, op: CompareOp, l: &Value, r: &Value) -> EvalResult<Option<bool>> {
        let (l, r) = (self.effective(l), self.effective(r));
        if l.is_null() || r.is_null() {
            return Ok(None);
        }
        Ok(Some(op.holds(self.compare(l, r)?)))
    }

    /// `=` on any values
    pub fn equal(&self, l: &Value, r: &Value) -> EvalResult<Option<bool>> {
        self.dynamic_compare(CompareOp::Eq, l, r)
    }

    /// `<>` on any values
    pub fn not_equal(&self, l: &Value, r: &Value) -> EvalResult<Option<bool>> {
        self.dynamic_compare(CompareOp::Neq, l, r)
    }

    pub fn less(&self, l: &Value, r: &Value) -> EvalResult<Option<bool>> {
        self.dynamic_compare(CompareOp::Lt, l, r)
    }

    pub fn less_or_equal(&self, l: &Value, r: &Value) -> EvalResult<Option<bool>> {
        self.dynamic_compare(CompareOp::Le, l, r)
    }

    pub fn greater(&self, l: &Value, r: &Value) -> EvalResult<Option<bool>> {
        self.dynamic_compare(CompareOp::Gt, l, r)
    }

    pub fn greater_or_equal(&self, l: &Value, r: &Value) -> EvalResult<Option<bool>> {
        self.dynamic_compare(CompareOp::Ge, l, r)
    }

    /// `<=>` on any values
    pub fn null_safe_equal(&self, l: &Value, r: &Value) -> EvalResult<bool> {
        match (self.effective(l), self.effective(r)) {
            (Value::Null, Value::Null) => Ok(true),
            (Value::Null, _) | (_, Value::Null) => Ok(false),
            (l, r) => Ok(self.compare(l, r)? == Ordering::Equal),
        }
    }

    /// `o BETWEEN lower AND upper` on any values
    pub fn between(&self, o: &Value, lower: &Value, upper: &Value) -> EvalResult<Option<bool>> {
        let (o, lower, upper) = (self.effective(o), self.effective(lower), self.effective(upper));
        if o.is_null() || lower.is_null() || upper.is_null() {
            return Ok(None);
        }
        Ok(Some(
            self.compare(lower, o)? != Ordering::Greater && self.compare(o, upper)? != Ordering::Greater,
        ))
    }

    /// `o IN (list)` on any values
    pub fn in_list(&self, o: &Value, list: &[Value]) -> EvalResult<Option<bool>> {
        let o = self.effective(o);
        if o.is_null() {
            return Ok(None);
        }
        let mut null_found = false;
        for item in list.iter().map(|v| self.effective(v)) {
            if item.is_null() {
                null_found = true;
            } else if self.compare(o, item)? == Ordering::Equal {
                return Ok(Some(true));
            }
        }
        Ok(if null_found { None } else { Some(false) })
    }

    /// CHAR operand with the empty-string policy applied and trailing spaces removed
    fn trimmed<'a>(&self, s: Option<&'a str>) -> Option<&'a str> {
        self.effective_str(s).map(rtrim)
    }
}

fn rtrim(s: &str) -> &str {
    s.trim_end_matches(' ')
}
