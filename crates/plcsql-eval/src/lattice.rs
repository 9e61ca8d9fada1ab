//! Type lattice for the dynamic operator resolver
//!
//! Each function answers the question "to which runtime type are both
//! operands converted before the typed operator runs". `None` means the pair
//! is not applicable to that operator family.

use plcsql_types::RuntimeType as T;

/// Common type of two numeric operands
///
/// SHORT < INT < BIGINT < NUMERIC; FLOAT absorbs the integers, FLOAT with
/// NUMERIC widens to DOUBLE, and DOUBLE absorbs everything.
pub fn numeric_ladder(l: T, r: T) -> Option<T> {
    if !l.is_numeric() || !r.is_numeric() {
        return None;
    }
    let common = match (l, r) {
        (T::Double, _) | (_, T::Double) => T::Double,
        (T::Float, T::Numeric) | (T::Numeric, T::Float) => T::Double,
        (T::Float, _) | (_, T::Float) => T::Float,
        (T::Numeric, _) | (_, T::Numeric) => T::Numeric,
        (T::Bigint, _) | (_, T::Bigint) => T::Bigint,
        (T::Int, _) | (_, T::Int) => T::Int,
        _ => T::Short,
    };
    Some(common)
}

/// Operand type for `-`, `*` and `/` between non-temporal operands
///
/// Text takes part as DOUBLE.
pub fn arithmetic_type(l: T, r: T) -> Option<T> {
    match (l, r) {
        (T::String, T::String) => Some(T::Double),
        (T::String, n) | (n, T::String) if n.is_numeric() => Some(T::Double),
        _ => numeric_ladder(l, r),
    }
}

/// Operand type for `DIV` and `MOD`
pub fn integer_division_type(l: T, r: T) -> Option<T> {
    let operand = |t: T| t.is_numeric() || t == T::String;
    match (l, r) {
        (T::Short, T::Short) => Some(T::Short),
        (T::Int, T::Int) => Some(T::Int),
        _ if operand(l) && operand(r) => Some(T::Bigint),
        _ => None,
    }
}

/// Operand type for `=`, `<`, `BETWEEN`, `IN` and the other comparisons
pub fn comparison_type(l: T, r: T) -> Option<T> {
    match (l, r) {
        (T::Boolean, T::Boolean) => Some(T::Boolean),
        (T::String, T::String) => Some(T::String),
        (T::String, n) | (n, T::String) if n.is_numeric() => Some(T::Double),
        (T::String, t) | (t, T::String) if t.is_temporal() => Some(t),
        (a, b) if a.is_numeric() && b.is_numeric() => numeric_ladder(a, b),
        (i, T::Time) | (T::Time, i) if i.is_integer() => Some(T::Time),
        (i, T::Timestamp) | (T::Timestamp, i) if i.is_integer() => Some(T::Timestamp),
        (a, b) if a == b && a.is_temporal() => Some(a),
        (T::Date, T::Datetime) | (T::Datetime, T::Date) => Some(T::Datetime),
        (T::Date | T::Datetime, T::Timestamp) | (T::Timestamp, T::Date | T::Datetime) => Some(T::Datetime),
        _ => None,
    }
}
