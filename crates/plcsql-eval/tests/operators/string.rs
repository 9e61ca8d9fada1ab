//! String Operator Tests
//!
//! Tests for: Concatenate and Like, including escape characters, regex
//! metacharacters in patterns and the empty-string policy

use crate::{oracle_runtime, runtime};
use plcsql_diagnostics::VALUE_ERROR;
use plcsql_eval::operators::like_to_regex;
use plcsql_types::Value;
use pretty_assertions::assert_eq;
use rstest::rstest;

// ============================================================================
// LIKE
// ============================================================================

#[rstest]
#[case("aXXbYc", "a%b_c", Some(true))]
#[case("abc", "a%b_c", Some(false))]
#[case("abYc", "a%b_c", Some(true))]
#[case("", "%", Some(true))]
#[case("abc", "_", Some(false))]
#[case("a.c", "a.c", Some(true))]
#[case("abc", "a.c", Some(false))]
#[case("a+b(c)", "a+b(c)", Some(true))]
#[case("line1\nline2", "line1%line2", Some(true))]
#[case("ÄÖü", "_Ö_", Some(true))]
fn test_like(#[case] s: &str, #[case] pattern: &str, #[case] expected: Option<bool>) {
    assert_eq!(runtime().like(Some(s), Some(pattern), None).unwrap(), expected);
}

#[rstest]
#[case("50%", Some(true))]
#[case("500", Some(false))]
#[case("50", Some(false))]
fn test_like_with_escape(#[case] s: &str, #[case] expected: Option<bool>) {
    assert_eq!(runtime().like(Some(s), Some("50\\%"), Some("\\")).unwrap(), expected);
}

#[test]
fn test_like_escaped_underscore_and_escape() {
    let rt = runtime();
    assert_eq!(rt.like(Some("a_b"), Some("a!_b"), Some("!")).unwrap(), Some(true));
    assert_eq!(rt.like(Some("axb"), Some("a!_b"), Some("!")).unwrap(), Some(false));
    assert_eq!(rt.like(Some("a!b"), Some("a!!b"), Some("!")).unwrap(), Some(true));
    assert_eq!(rt.like(Some("ab!"), Some("ab!"), Some("!")).unwrap(), Some(true));
}

#[test]
fn test_like_escape_must_be_one_character() {
    let rt = runtime();
    for escape in ["", "ab"] {
        let err = rt.like(Some("x"), Some("x"), Some(escape)).unwrap_err();
        assert_eq!(err.code(), VALUE_ERROR);
        assert_eq!(err.message(), "the escape must be a single character");
    }
}

#[test]
fn test_like_null_operands() {
    let rt = runtime();
    assert_eq!(rt.like(None, Some("%"), None).unwrap(), None);
    assert_eq!(rt.like(Some("x"), None, None).unwrap(), None);
    assert_eq!(rt.like(Some(""), Some(""), None).unwrap(), Some(true));

    let oracle = oracle_runtime();
    assert_eq!(oracle.like(Some(""), Some("%"), None).unwrap(), None);
    assert_eq!(oracle.like(Some("x"), Some(""), None).unwrap(), None);
}

#[test]
fn test_like_translation() {
    assert_eq!(like_to_regex("a%b_c", None), "(?s)^a.*b.c$");
    assert_eq!(like_to_regex("x*y", None), "(?s)^x\\*y$");
}

// ============================================================================
// Concatenation
// ============================================================================

#[test]
fn test_concat() {
    let rt = runtime();
    assert_eq!(rt.concat(Some("ab"), Some("cd")).as_deref(), Some("abcd"));
    assert_eq!(rt.concat(Some("ab"), None), None);
    assert_eq!(rt.add_string(None, Some("cd")), None);
}

#[test]
fn test_concat_treats_null_as_empty_under_flag() {
    let rt = oracle_runtime();
    assert_eq!(rt.concat(Some("ab"), None).as_deref(), Some("ab"));
    assert_eq!(rt.concat(None, None).as_deref(), Some(""));
    assert_eq!(rt.add_string(None, Some("cd")).as_deref(), Some("cd"));
}

#[test]
fn test_concat_values_renders_operands() {
    let rt = runtime();
    assert_eq!(rt.concat_values(&Value::from("n="), &Value::Int(5)).unwrap(), Value::from("n=5"));
    assert_eq!(rt.concat_values(&Value::Null, &Value::Int(5)).unwrap(), Value::Null);
    assert_eq!(
        oracle_runtime().concat_values(&Value::Null, &Value::Int(5)).unwrap(),
        Value::from("5")
    );
    assert!(rt.concat_values(&Value::Boolean(true), &Value::from("x")).is_err());
}
