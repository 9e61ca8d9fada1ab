//! Logical Operator Tests
//!
//! Tests for: Not, And, Or, Xor under three-valued logic, and IS NULL /
//! IS NOT NULL with the empty-string policy

use crate::{oracle_runtime, runtime};
use plcsql_eval::operators::{and, not, or, xor};
use plcsql_types::Value;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

const T: Option<bool> = Some(true);
const F: Option<bool> = Some(false);
const U: Option<bool> = None;

fn tri() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(T), Just(F), Just(U)]
}

// ============================================================================
// Truth Tables
// ============================================================================

#[rstest]
#[case(T, T, T)]
#[case(T, F, F)]
#[case(T, U, U)]
#[case(F, T, F)]
#[case(F, F, F)]
#[case(F, U, F)]
#[case(U, T, U)]
#[case(U, F, F)]
#[case(U, U, U)]
fn test_and(#[case] l: Option<bool>, #[case] r: Option<bool>, #[case] expected: Option<bool>) {
    assert_eq!(and(l, r), expected);
}

#[rstest]
#[case(T, T, T)]
#[case(T, F, T)]
#[case(T, U, T)]
#[case(F, T, T)]
#[case(F, F, F)]
#[case(F, U, U)]
#[case(U, T, T)]
#[case(U, F, U)]
#[case(U, U, U)]
fn test_or(#[case] l: Option<bool>, #[case] r: Option<bool>, #[case] expected: Option<bool>) {
    assert_eq!(or(l, r), expected);
}

#[rstest]
#[case(T, T, F)]
#[case(T, F, T)]
#[case(F, F, F)]
#[case(T, U, U)]
#[case(U, F, U)]
fn test_xor(#[case] l: Option<bool>, #[case] r: Option<bool>, #[case] expected: Option<bool>) {
    assert_eq!(xor(l, r), expected);
}

#[test]
fn test_not() {
    assert_eq!(not(T), F);
    assert_eq!(not(F), T);
    assert_eq!(not(U), U);
}

proptest! {
    #[test]
    fn prop_de_morgan(l in tri(), r in tri()) {
        prop_assert_eq!(not(and(l, r)), or(not(l), not(r)));
        prop_assert_eq!(not(or(l, r)), and(not(l), not(r)));
    }
}

// ============================================================================
// IS NULL
// ============================================================================

#[test]
fn test_is_null() {
    let rt = runtime();
    assert!(rt.is_null(&Value::Null));
    assert!(!rt.is_null(&Value::Int(0)));
    assert!(!rt.is_null(&Value::from("")));
    assert!(rt.is_not_null(&Value::from("")));
}

#[test]
fn test_empty_string_is_null_under_flag() {
    let rt = oracle_runtime();
    assert!(rt.is_null(&Value::from("")));
    assert!(!rt.is_not_null(&Value::from("")));
    assert!(!rt.is_null(&Value::from(" ")));
}
