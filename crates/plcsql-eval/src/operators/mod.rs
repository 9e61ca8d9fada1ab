//! PL/CSQL Operator Implementations
//!
//! Operators are organized by category:
//! - Arithmetic operators (negation, +, -, *, /, DIV, MOD)
//! - Bitwise operators (~, &, |, ^, <<, >>)
//! - Comparison operators (=, <>, <=>, <, <=, >, >=, BETWEEN, IN)
//! - Logical operators (NOT, AND, OR, XOR, IS NULL)
//! - String operators (||, LIKE)
//! - Temporal operators (offset arithmetic and differences)
//!
//! Each category offers typed functions over `Option<T>`, where `None` is
//! NULL, and dynamic methods on `Runtime` that take `Value` operands and
//! resolve the typed operator from their runtime types.

pub mod arithmetic;
pub mod bitwise;
pub mod comparison;
pub mod datetime;
pub mod logical;
pub mod string;

pub use arithmetic::*;
pub use bitwise::*;
pub use comparison::*;
pub use datetime::*;
pub use logical::*;
pub use string::*;

use crate::error::EvalResult;

/// Apply `f` when both operands are present; NULL otherwise
pub(crate) fn binary<A, B, R>(
    l: Option<A>,
    r: Option<B>,
    f: impl FnOnce(A, B) -> EvalResult<R>,
) -> EvalResult<Option<R>> {
    match (l, r) {
        (Some(l), Some(r)) => f(l, r).map(Some),
        _ => Ok(None),
    }
}
