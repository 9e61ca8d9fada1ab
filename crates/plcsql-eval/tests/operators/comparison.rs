//! Comparison Operator Tests
//!
//! Tests for: Equal, NotEqual, NullSafeEqual, Less, LessOrEqual, Greater,
//! GreaterOrEqual, Between, In across promoted operand types

use crate::{oracle_runtime, runtime};
use plcsql_diagnostics::VALUE_ERROR;
use plcsql_eval::CompareOp;
use plcsql_eval::operators::{between, eq, ge, gt, in_list, le, lt, neq, null_safe_eq};
use plcsql_types::{Date, Datetime, Numeric, Time, Timestamp, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ============================================================================
// Test Helpers
// ============================================================================

fn num(s: &str) -> Value {
    Value::Numeric(s.parse::<Numeric>().unwrap())
}

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(Date::from_ymd(y, m, d).unwrap())
}

fn datetime(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> Value {
    Value::Datetime(Datetime::from_ymd_hms_milli(y, m, d, hh, mm, ss, 0).unwrap())
}

// ============================================================================
// Typed Comparisons
// ============================================================================

#[test]
fn test_typed_operators() {
    assert_eq!(eq(Some(1), Some(1)), Some(true));
    assert_eq!(neq(Some(1), Some(1)), Some(false));
    assert_eq!(lt(Some(1.5), Some(2.0)), Some(true));
    assert_eq!(le(Some("a"), Some("a")), Some(true));
    assert_eq!(gt(Some(1i16), None), None);
    assert_eq!(ge(None::<i64>, None), None);
}

#[test]
fn test_typed_nan_is_unknown() {
    assert_eq!(eq(Some(f64::NAN), Some(f64::NAN)), None);
}

#[test]
fn test_typed_null_safe_equal() {
    assert!(null_safe_eq::<i32>(None, None));
    assert!(!null_safe_eq(None, Some(0)));
    assert!(null_safe_eq(Some("x"), Some("x")));
}

#[test]
fn test_typed_between_and_in() {
    assert_eq!(between(Some(5), Some(1), Some(9)), Some(true));
    assert_eq!(between(Some(5), Some(9), Some(1)), Some(false));
    assert_eq!(between(None, Some(1), Some(9)), None);
    assert_eq!(in_list(Some(2), &[Some(1), Some(2)]), Some(true));
    assert_eq!(in_list(Some(3), &[Some(1), None]), None);
    assert_eq!(in_list(None, &[Some(1)]), None);
}

// ============================================================================
// Text Comparisons
// ============================================================================

#[test]
fn test_char_comparison_ignores_trailing_spaces() {
    let rt = runtime();
    assert_eq!(rt.compare_char(CompareOp::Eq, Some("abc   "), Some("abc")), Some(true));
    assert_eq!(rt.compare_string(CompareOp::Eq, Some("abc   "), Some("abc")), Some(false));
    assert_eq!(rt.compare_char(CompareOp::Lt, Some(" a"), Some("a")), Some(true));
    assert!(rt.null_safe_eq_char(Some("x "), Some("x")));
    assert_eq!(rt.in_char(Some("b "), &[Some("a"), Some("b")]), Some(true));
}

#[rstest]
#[case(Some("b  "), Some("a"), Some("b"), Some(true))]
#[case(Some("b"), Some("b   "), Some("c "), Some(true))]
#[case(Some("d "), Some("a"), Some("c"), Some(false))]
#[case(Some("b"), None, Some("c"), None)]
fn test_between_char(
    #[case] o: Option<&str>,
    #[case] lower: Option<&str>,
    #[case] upper: Option<&str>,
    #[case] expected: Option<bool>,
) {
    assert_eq!(runtime().between_char(o, lower, upper), expected);
}

#[test]
fn test_between_char_empty_string_policy() {
    assert_eq!(runtime().between_char(Some(""), Some(""), Some("a")), Some(true));
    assert_eq!(oracle_runtime().between_char(Some(""), Some(""), Some("a")), None);
    assert_eq!(runtime().between_string(Some("b "), Some("a"), Some("b")), Some(false));
}

#[test]
fn test_text_comparison_empty_string_policy() {
    let plain = runtime();
    let oracle = oracle_runtime();

    assert_eq!(plain.compare_string(CompareOp::Eq, Some(""), Some("")), Some(true));
    assert_eq!(oracle.compare_string(CompareOp::Eq, Some(""), Some("")), None);
    assert!(oracle.null_safe_eq_string(Some(""), None));
    assert_eq!(oracle.between_string(Some("b"), Some(""), Some("c")), None);
    assert_eq!(oracle.in_string(Some("x"), &[Some(""), Some("y")]), None);
}

// ============================================================================
// Dynamic Comparisons
// ============================================================================

#[rstest]
#[case(Value::Int(1), num("1.0"))]
#[case(Value::Short(7), Value::Bigint(7))]
#[case(Value::Float(0.5), Value::Double(0.5))]
#[case(Value::from("10"), Value::Int(10))]
#[case(Value::from("abc"), Value::from("abc"))]
#[case(date(2024, 1, 15), Value::from("2024-01-15"))]
#[case(date(2024, 1, 15), datetime(2024, 1, 15, 0, 0, 0))]
#[case(Value::Time(Time::from_hms(0, 1, 40).unwrap()), Value::Int(100))]
#[case(Value::Timestamp(Timestamp::from_epoch_seconds(86_400).unwrap()), date(1970, 1, 2))]
#[case(Value::Boolean(true), Value::Boolean(true))]
fn test_dynamic_equal(#[case] l: Value, #[case] r: Value) {
    let rt = runtime();
    assert_eq!(rt.equal(&l, &r).unwrap(), Some(true));
    assert_eq!(rt.equal(&r, &l).unwrap(), Some(true));
    assert_eq!(rt.not_equal(&l, &r).unwrap(), Some(false));
}

#[test]
fn test_dynamic_ordering() {
    let rt = runtime();
    assert_eq!(rt.less(&Value::from("10"), &Value::Int(9)).unwrap(), Some(false));
    assert_eq!(rt.greater(&num("1.01"), &Value::Int(1)).unwrap(), Some(true));
    assert_eq!(
        rt.less(&date(2024, 1, 15), &datetime(2024, 1, 15, 0, 0, 1)).unwrap(),
        Some(true)
    );
    assert_eq!(rt.greater_or_equal(&Value::from("b"), &Value::from("a")).unwrap(), Some(true));
    assert_eq!(rt.less_or_equal(&Value::Bigint(i64::MIN), &Value::Short(i16::MIN)).unwrap(), Some(true));
}

#[test]
fn test_incomparable_types() {
    let rt = runtime();
    for (l, r) in [
        (Value::Boolean(true), Value::Int(1)),
        (date(2024, 1, 1), Value::Int(1)),
        (Value::Time(Time::MIDNIGHT), date(2024, 1, 1)),
        (Value::Double(f64::NAN), Value::Double(1.0)),
    ] {
        let err = rt.equal(&l, &r).unwrap_err();
        assert_eq!(err.code(), VALUE_ERROR);
        assert_eq!(err.message(), "incomparable types");
    }
}

#[test]
fn test_dynamic_null_handling() {
    let rt = runtime();
    assert_eq!(rt.equal(&Value::Null, &Value::Int(1)).unwrap(), None);
    assert_eq!(rt.less(&Value::Int(1), &Value::Null).unwrap(), None);
    assert!(rt.null_safe_equal(&Value::Null, &Value::Null).unwrap());
    assert!(!rt.null_safe_equal(&Value::Null, &Value::Int(1)).unwrap());
    assert!(rt.null_safe_equal(&Value::Int(1), &num("1")).unwrap());
}

#[test]
fn test_dynamic_empty_string_policy() {
    let plain = runtime();
    let oracle = oracle_runtime();
    let empty = Value::from("");

    assert_eq!(plain.equal(&empty, &empty).unwrap(), Some(true));
    assert_eq!(oracle.equal(&empty, &empty).unwrap(), None);
    assert!(oracle.null_safe_equal(&empty, &Value::Null).unwrap());
    assert!(!plain.null_safe_equal(&empty, &Value::Null).unwrap());
}

#[test]
fn test_dynamic_between() {
    let rt = runtime();
    assert_eq!(rt.between(&Value::Int(5), &Value::Int(1), &Value::Double(9.5)).unwrap(), Some(true));
    assert_eq!(rt.between(&Value::Int(5), &Value::Int(5), &Value::Int(5)).unwrap(), Some(true));
    assert_eq!(rt.between(&Value::Int(5), &Value::Int(6), &Value::Int(9)).unwrap(), Some(false));
    assert_eq!(rt.between(&Value::Int(5), &Value::Null, &Value::Int(9)).unwrap(), None);
    assert_eq!(
        oracle_runtime().between(&Value::from("b"), &Value::from(""), &Value::from("c")).unwrap(),
        None
    );
}

#[test]
fn test_dynamic_in_list() {
    let rt = runtime();
    assert_eq!(rt.in_list(&Value::Int(3), &[Value::Int(1), num("3.0")]).unwrap(), Some(true));
    assert_eq!(rt.in_list(&Value::Int(3), &[Value::Int(1), Value::Int(2)]).unwrap(), Some(false));
    assert_eq!(rt.in_list(&Value::Int(3), &[Value::Int(1), Value::Null]).unwrap(), None);
    assert_eq!(rt.in_list(&Value::Int(3), &[Value::Null, Value::Int(3)]).unwrap(), Some(true));
    assert_eq!(rt.in_list(&Value::Null, &[Value::Int(1)]).unwrap(), None);
    assert_eq!(rt.in_list(&Value::Int(1), &[]).unwrap(), Some(false));
}

proptest! {
    #[test]
    fn prop_mixed_width_ordering(a: i32, b: i64) {
        let rt = runtime();
        let (l, r) = (Value::Int(a), Value::Bigint(b));
        prop_assert_eq!(rt.less(&l, &r).unwrap(), Some(i64::from(a) < b));
        prop_assert_eq!(rt.equal(&l, &r).unwrap(), Some(i64::from(a) == b));
        prop_assert_eq!(rt.greater(&r, &l).unwrap(), Some(b > i64::from(a)));
    }
}
