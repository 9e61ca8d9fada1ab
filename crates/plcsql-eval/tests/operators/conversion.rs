//! Conversion Tests
//!
//! Tests for: the conv_<src>_to_<dst> matrix, text rendering of numbers in
//! both number modes, session time zone handling and value coercion

use crate::{compat_runtime, runtime};
use plcsql_diagnostics::VALUE_ERROR;
use plcsql_eval::conversion::{
    conv_bigint_to_string, conv_bigint_to_time, conv_bigint_to_timestamp, conv_date_to_string,
    conv_datetime_to_string, conv_double_to_numeric, conv_double_to_time, conv_double_to_timestamp,
    conv_float_to_numeric, conv_float_to_time, conv_float_to_timestamp, conv_int_to_bigint, conv_int_to_double,
    conv_int_to_float, conv_int_to_numeric, conv_int_to_string, conv_int_to_time, conv_int_to_timestamp,
    conv_numeric_to_timestamp, conv_short_to_bigint, conv_short_to_double, conv_short_to_float, conv_short_to_int,
    conv_short_to_numeric, conv_short_to_string, conv_short_to_time, conv_short_to_timestamp, conv_string_to_int,
    conv_string_to_numeric, conv_time_to_string,
};
use plcsql_eval::{Runtime, SessionConfig};
use plcsql_types::{Date, Datetime, Numeric, RuntimeType, Time, Timestamp, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn num(s: &str) -> Numeric {
    s.parse().unwrap()
}

// ============================================================================
// Numbers
// ============================================================================

#[rstest]
#[case(Value::Int(40_000), "data overflow on data type SHORT: 40000")]
#[case(Value::Double(32_767.5), "data overflow on data type SHORT: 32767.5")]
#[case(Value::from("-40000"), "data overflow on data type SHORT: -40000")]
fn test_short_overflow(#[case] v: Value, #[case] message: &str) {
    let err = runtime().conv_value_to_short(&v).unwrap_err();
    assert_eq!(err.code(), VALUE_ERROR);
    assert_eq!(err.message(), message);
}

#[test]
fn test_integers_round_half_up() {
    let rt = runtime();
    assert_eq!(rt.conv_value_to_int(&Value::Numeric(num("2.5"))).unwrap(), Some(3));
    assert_eq!(rt.conv_value_to_int(&Value::Numeric(num("-2.5"))).unwrap(), Some(-3));
    assert_eq!(rt.conv_value_to_bigint(&Value::Float(1.49)).unwrap(), Some(1));
    assert_eq!(conv_string_to_int(" 12 ").unwrap(), 12);
}

#[test]
fn test_double_to_numeric_keeps_sixteen_digits() {
    assert_eq!(conv_double_to_numeric(0.1).unwrap(), num("0.1"));
    assert_eq!(conv_double_to_numeric(1.0 / 3.0).unwrap(), num("0.3333333333333333"));
    assert_eq!(conv_string_to_numeric("").unwrap(), None);
}

#[rstest]
#[case(1e300)]
#[case(-1e39)]
#[case(1e-40)]
fn test_double_to_numeric_overflow(#[case] v: f64) {
    let err = conv_double_to_numeric(v).unwrap_err();
    assert_eq!(err.code(), VALUE_ERROR);
    assert!(err.message().starts_with("data overflow on data type NUMERIC"));
}

#[test]
fn test_floating_to_numeric_bounds() {
    assert_eq!(conv_double_to_numeric(1e37).unwrap().precision(), 38);
    assert_eq!(conv_double_to_numeric(1e-38).unwrap(), num("0.00000000000000000000000000000000000001"));
    assert_eq!(conv_float_to_numeric(f32::MAX).unwrap_err().code(), VALUE_ERROR);
    assert_eq!(conv_float_to_numeric(1.5e10).unwrap(), num("15000000000"));
    assert_eq!(runtime().conv_value_to_numeric(&Value::Double(-1e300)).unwrap_err().code(), VALUE_ERROR);
}

#[rstest]
#[case(i16::MIN)]
#[case(-1)]
#[case(0)]
#[case(i16::MAX)]
fn test_short_widens(#[case] v: i16) {
    assert_eq!(conv_short_to_int(v), i32::from(v));
    assert_eq!(conv_short_to_bigint(v), i64::from(v));
    assert_eq!(conv_short_to_numeric(v), num(&v.to_string()));
    assert_eq!(conv_short_to_double(v), f64::from(v));
    assert_eq!(conv_short_to_float(v), f32::from(v));
    assert_eq!(conv_short_to_string(v), v.to_string());
}

#[rstest]
#[case(i32::MIN)]
#[case(7)]
#[case(i32::MAX)]
fn test_int_widens(#[case] v: i32) {
    assert_eq!(conv_int_to_bigint(v), i64::from(v));
    assert_eq!(conv_int_to_numeric(v), num(&v.to_string()));
    assert_eq!(conv_int_to_double(v), f64::from(v));
    assert_eq!(conv_int_to_float(v), v as f32);
    assert_eq!(conv_int_to_string(v), v.to_string());
}

#[test]
fn test_integer_text() {
    assert_eq!(conv_bigint_to_string(i64::MIN), "-9223372036854775808");
    assert_eq!(conv_int_to_string(-42), "-42");
    assert_eq!(conv_short_to_string(0), "0");
}

#[test]
fn test_number_rendering() {
    let rt = runtime();
    assert_eq!(rt.conv_double_to_string(1.5), "1.500000000000000e+00");
    assert_eq!(rt.conv_double_to_string(-0.00025), "-2.500000000000000e-04");
    assert_eq!(rt.conv_float_to_string(1.5), "1.500000e+00");
    assert_eq!(rt.conv_numeric_to_string(&num("1.500")), "1.500");
}

#[test]
fn test_number_rendering_in_compat_mode() {
    let rt = compat_runtime();
    assert_eq!(rt.conv_double_to_string(1.5), "1.5");
    assert_eq!(rt.conv_double_to_string(100.0), "100");
    assert_eq!(rt.conv_float_to_string(0.25), "0.25");
    assert_eq!(rt.conv_numeric_to_string(&num("1.500")), "1.5");
}

#[test]
fn test_invalid_number_text() {
    let rt = runtime();
    assert_eq!(rt.conv_value_to_double(&Value::from("1x")).unwrap_err().code(), VALUE_ERROR);
    assert_eq!(rt.conv_value_to_numeric(&Value::from("abc")).unwrap_err().code(), VALUE_ERROR);
}

// ============================================================================
// Temporal Values
// ============================================================================

#[test]
fn test_integers_to_temporal() {
    assert_eq!(conv_bigint_to_time(3_661).unwrap(), Time::from_hms(1, 1, 1).unwrap());
    assert_eq!(conv_bigint_to_time(86_400 + 1).unwrap(), Time::from_hms(0, 0, 1).unwrap());
    assert_eq!(conv_bigint_to_time(-1).unwrap_err().message(), "negative values not allowed");
    assert_eq!(conv_bigint_to_timestamp(0).unwrap(), Timestamp::ZERO);
    assert_eq!(
        conv_bigint_to_timestamp(2_147_483_648).unwrap_err().message(),
        "values over 2,147,483,647 not allowed"
    );
}

#[test]
fn test_narrow_integers_to_temporal() {
    assert_eq!(conv_int_to_time(3_661).unwrap(), Time::from_hms(1, 1, 1).unwrap());
    assert_eq!(conv_short_to_time(60).unwrap(), Time::from_hms(0, 1, 0).unwrap());
    assert_eq!(conv_int_to_time(-1).unwrap_err().message(), "negative values not allowed");
    assert_eq!(conv_int_to_timestamp(0).unwrap(), Timestamp::ZERO);
    assert_eq!(conv_int_to_timestamp(i32::MAX).unwrap().epoch_seconds(), 2_147_483_647);
    assert_eq!(conv_short_to_timestamp(150).unwrap().epoch_seconds(), 150);
    assert_eq!(conv_short_to_timestamp(-5).unwrap_err().code(), VALUE_ERROR);
}

#[rstest]
#[case(59.4, 59)]
#[case(59.5, 60)]
#[case(86_400.0, 0)]
fn test_floating_seconds_to_time(#[case] v: f64, #[case] seconds: i64) {
    let expected = Time::from_seconds(seconds);
    assert_eq!(conv_double_to_time(v).unwrap(), expected);
    assert_eq!(conv_float_to_time(v as f32).unwrap(), expected);
}

#[rstest]
#[case(100.4, 100)]
#[case(100.5, 101)]
fn test_rounded_epoch_seconds(#[case] v: f64, #[case] seconds: i64) {
    assert_eq!(conv_double_to_timestamp(v).unwrap().epoch_seconds(), seconds);
    assert_eq!(conv_float_to_timestamp(v as f32).unwrap().epoch_seconds(), seconds);
    assert_eq!(conv_numeric_to_timestamp(&num(&v.to_string())).unwrap().epoch_seconds(), seconds);
}

#[test]
fn test_floating_to_temporal_limits() {
    assert_eq!(conv_double_to_time(-0.6).unwrap_err().message(), "negative values not allowed");
    assert_eq!(conv_double_to_timestamp(1e10).unwrap_err().message(), "values over 2,147,483,647 not allowed");
    assert_eq!(conv_double_to_timestamp(1e30).unwrap_err().code(), VALUE_ERROR);
    assert_eq!(conv_numeric_to_timestamp(&num("-1")).unwrap_err().code(), VALUE_ERROR);
}

#[test]
fn test_temporal_text() {
    let d = Date::from_ymd(2024, 5, 6).unwrap();
    let t = Time::from_hms(13, 8, 9).unwrap();
    let dt = Datetime::from_ymd_hms_milli(2024, 5, 6, 13, 8, 9, 10).unwrap();
    assert_eq!(conv_date_to_string(&d), "05/06/2024");
    assert_eq!(conv_time_to_string(&t), "01:08:09 PM");
    assert_eq!(conv_datetime_to_string(&dt), "01:08:09.010 PM 05/06/2024");
    assert_eq!(conv_date_to_string(&Date::ZERO), "00/00/0000");
    assert_eq!(runtime().conv_value_to_string(&Value::Time(t)).unwrap(), Some(conv_time_to_string(&t)));
}

#[test]
fn test_numeric_is_not_a_time() {
    let err = runtime().conv_value_to_time(&Value::Numeric(num("1"))).unwrap_err();
    assert_eq!(err.code(), VALUE_ERROR);
}

#[test]
fn test_session_time_zone() {
    let rt = Runtime::new(SessionConfig::default().with_time_zone("+09:00")).unwrap();
    let local = Datetime::from_ymd_hms_milli(1970, 1, 2, 9, 0, 0, 0).unwrap();

    let ts = rt.conv_datetime_to_timestamp(&local).unwrap();
    assert_eq!(ts.epoch_seconds(), 86_400);
    assert_eq!(rt.conv_timestamp_to_datetime(&ts), local);
    assert_eq!(rt.conv_timestamp_to_date(&ts), Date::from_ymd(1970, 1, 2).unwrap());
    assert_eq!(runtime().conv_timestamp_to_time(&ts), Time::MIDNIGHT);
}

#[test]
fn test_datetime_parts() {
    let rt = runtime();
    let dt = Value::Datetime(Datetime::from_ymd_hms_milli(2024, 5, 6, 7, 8, 9, 10).unwrap());
    assert_eq!(rt.conv_value_to_date(&dt).unwrap(), Date::from_ymd(2024, 5, 6));
    assert_eq!(rt.conv_value_to_time(&dt).unwrap(), Time::from_hms(7, 8, 9));
}

// ============================================================================
// Coercion
// ============================================================================

#[rstest]
#[case(Value::Int(5), RuntimeType::String, Value::from("5"))]
#[case(Value::Short(5), RuntimeType::Numeric, Value::Numeric(num("5")))]
#[case(Value::from("2024-01-15"), RuntimeType::Date, Value::Date(Date::from_ymd(2024, 1, 15).unwrap()))]
#[case(Value::Bigint(60), RuntimeType::Time, Value::Time(Time::from_hms(0, 1, 0).unwrap()))]
#[case(Value::Null, RuntimeType::Int, Value::Null)]
#[case(Value::Boolean(true), RuntimeType::Boolean, Value::Boolean(true))]
fn test_coerce(#[case] v: Value, #[case] ty: RuntimeType, #[case] expected: Value) {
    assert_eq!(runtime().coerce(&v, ty).unwrap(), expected);
}

#[test]
fn test_coerce_incompatible() {
    let rt = runtime();
    assert_eq!(rt.coerce(&Value::Boolean(true), RuntimeType::Int).unwrap_err().code(), VALUE_ERROR);
    assert_eq!(rt.coerce(&Value::Int(1), RuntimeType::Boolean).unwrap_err().code(), VALUE_ERROR);
    assert_eq!(rt.coerce(&Value::Boolean(false), RuntimeType::String).unwrap_err().code(), VALUE_ERROR);
}
