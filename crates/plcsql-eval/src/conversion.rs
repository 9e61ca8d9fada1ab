//! Conversions between runtime types
//!
//! Typed conversions are named `conv_<src>_to_<dst>` and take a non-NULL
//! source value. Those that depend on session flags or the session time zone
//! are methods on `Runtime`; the rest are free functions. The
//! `conv_value_to_<dst>` methods accept any `Value`, map NULL to `None`, and
//! fail with "not compatible with <TYPE>" for sources outside the matrix.

use crate::checks::{check_double, check_float};
use crate::engine::Runtime;
use crate::error::{EvalResult, not_compatible};
use plcsql_diagnostics::RuntimeError;
use plcsql_types::{
    Date, Datetime, Numeric, Rounding, RuntimeType, Time, Timestamp, Value, detach_trailing_zeros,
};

const SECONDS_PER_DAY: i64 = 86_400;
const DOUBLE_DIGITS: u64 = 16;
const FLOAT_DIGITS: u64 = 7;

fn integer_overflow(type_name: &str, value: impl std::fmt::Display) -> RuntimeError {
    RuntimeError::value_error(format!("data overflow on data type {type_name}: {value}"))
}

// =========================================================================
// To integers
// =========================================================================

/// Round half-up to an integer, failing when it does not fit BIGINT
pub fn conv_numeric_to_bigint(n: &Numeric) -> EvalResult<i64> {
    n.to_i128_rounded(Rounding::HalfUp)
        .and_then(|v| i64::try_from(v).ok())
        .ok_or_else(|| integer_overflow("BIGINT", n))
}

pub fn conv_numeric_to_int(n: &Numeric) -> EvalResult<i32> {
    n.to_i128_rounded(Rounding::HalfUp)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| integer_overflow("INTEGER", n))
}

pub fn conv_numeric_to_short(n: &Numeric) -> EvalResult<i16> {
    n.to_i128_rounded(Rounding::HalfUp)
        .and_then(|v| i16::try_from(v).ok())
        .ok_or_else(|| integer_overflow("SHORT", n))
}

fn double_as_numeric(v: f64, type_name: &str) -> EvalResult<Numeric> {
    Numeric::from_f64(v).ok_or_else(|| integer_overflow(type_name, v))
}

pub fn conv_double_to_bigint(v: f64) -> EvalResult<i64> {
    conv_numeric_to_bigint(&double_as_numeric(v, "BIGINT")?)
}

pub fn conv_double_to_int(v: f64) -> EvalResult<i32> {
    conv_numeric_to_int(&double_as_numeric(v, "INTEGER")?)
}

pub fn conv_double_to_short(v: f64) -> EvalResult<i16> {
    conv_numeric_to_short(&double_as_numeric(v, "SHORT")?)
}

pub fn conv_float_to_bigint(v: f32) -> EvalResult<i64> {
    conv_double_to_bigint(f64::from(v))
}

pub fn conv_float_to_int(v: f32) -> EvalResult<i32> {
    conv_double_to_int(f64::from(v))
}

pub fn conv_float_to_short(v: f32) -> EvalResult<i16> {
    conv_double_to_short(f64::from(v))
}

pub fn conv_bigint_to_int(v: i64) -> EvalResult<i32> {
    i32::try_from(v).map_err(|_| integer_overflow("INTEGER", v))
}

pub fn conv_bigint_to_short(v: i64) -> EvalResult<i16> {
    i16::try_from(v).map_err(|_| integer_overflow("SHORT", v))
}

pub fn conv_int_to_short(v: i32) -> EvalResult<i16> {
    i16::try_from(v).map_err(|_| integer_overflow("SHORT", v))
}

pub fn conv_short_to_int(v: i16) -> i32 {
    i32::from(v)
}

pub fn conv_int_to_bigint(v: i32) -> i64 {
    i64::from(v)
}

pub fn conv_short_to_bigint(v: i16) -> i64 {
    i64::from(v)
}

/// Trimmed text as a decimal; the empty string is zero
fn text_as_numeric(s: &str) -> EvalResult<Numeric> {
    let s = s.trim();
    if s.is_empty() { Ok(Numeric::zero()) } else { Numeric::parse(s) }
}

pub fn conv_string_to_bigint(s: &str) -> EvalResult<i64> {
    conv_numeric_to_bigint(&text_as_numeric(s)?)
}

pub fn conv_string_to_int(s: &str) -> EvalResult<i32> {
    conv_numeric_to_int(&text_as_numeric(s)?)
}

pub fn conv_string_to_short(s: &str) -> EvalResult<i16> {
    conv_numeric_to_short(&text_as_numeric(s)?)
}

// =========================================================================
// To floating point and NUMERIC
// =========================================================================

pub fn conv_bigint_to_numeric(v: i64) -> Numeric {
    Numeric::from(v)
}

pub fn conv_bigint_to_double(v: i64) -> f64 {
    v as f64
}

pub fn conv_bigint_to_float(v: i64) -> f32 {
    v as f32
}

pub fn conv_int_to_numeric(v: i32) -> Numeric {
    Numeric::from(v)
}

pub fn conv_short_to_numeric(v: i16) -> Numeric {
    Numeric::from(v)
}

pub fn conv_int_to_double(v: i32) -> f64 {
    f64::from(v)
}

pub fn conv_short_to_double(v: i16) -> f64 {
    f64::from(v)
}

pub fn conv_int_to_float(v: i32) -> f32 {
    v as f32
}

pub fn conv_short_to_float(v: i16) -> f32 {
    f32::from(v)
}

pub fn conv_float_to_double(v: f32) -> f64 {
    f64::from(v)
}

pub fn conv_double_to_float(v: f64) -> EvalResult<f32> {
    check_float(v as f32).map_err(|_| RuntimeError::value_error(format!("data overflow on data type FLOAT: {v}")))
}

pub fn conv_numeric_to_double(n: &Numeric) -> EvalResult<f64> {
    check_double(n.to_f64()).map_err(|_| RuntimeError::value_error(format!("data overflow on data type DOUBLE: {n}")))
}

pub fn conv_numeric_to_float(n: &Numeric) -> EvalResult<f32> {
    check_float(n.to_f32()).map_err(|_| RuntimeError::value_error(format!("data overflow on data type FLOAT: {n}")))
}

/// Keep 16 significant digits, truncating the rest
///
/// Values needing more than 38 digits overflow.
pub fn conv_double_to_numeric(v: f64) -> EvalResult<Numeric> {
    Numeric::from_f64(v)
        .map(|n| n.with_precision(DOUBLE_DIGITS, Rounding::Down))
        .and_then(Numeric::into_bounded)
        .ok_or_else(|| RuntimeError::value_error(format!("data overflow on data type NUMERIC: {v}")))
}

/// Keep 7 significant digits, truncating the rest
pub fn conv_float_to_numeric(v: f32) -> EvalResult<Numeric> {
    Numeric::from_f32(v)
        .map(|n| n.with_precision(FLOAT_DIGITS, Rounding::Down))
        .and_then(Numeric::into_bounded)
        .ok_or_else(|| RuntimeError::value_error(format!("data overflow on data type NUMERIC: {v}")))
}

/// Trimmed text as a DOUBLE; the empty string is zero
pub fn conv_string_to_double(s: &str) -> EvalResult<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let v: f64 = s
        .parse()
        .map_err(|_| RuntimeError::value_error(format!("invalid DOUBLE string: '{s}'")))?;
    check_double(v)
}

/// Trimmed text as a FLOAT; the empty string is zero
pub fn conv_string_to_float(s: &str) -> EvalResult<f32> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let v: f32 = s
        .parse()
        .map_err(|_| RuntimeError::value_error(format!("invalid FLOAT string: '{s}'")))?;
    check_float(v)
}

/// Trimmed text as a NUMERIC; the empty string is NULL
pub fn conv_string_to_numeric(s: &str) -> EvalResult<Option<Numeric>> {
    let s = s.trim();
    if s.is_empty() { Ok(None) } else { Numeric::parse(s).map(Some) }
}

// =========================================================================
// To temporal types
// =========================================================================

/// Seconds modulo one day
pub fn conv_bigint_to_time(v: i64) -> EvalResult<Time> {
    if v < 0 {
        return Err(RuntimeError::value_error("negative values not allowed"));
    }
    Ok(Time::from_seconds(v % SECONDS_PER_DAY))
}

/// Epoch seconds; zero is the zero TIMESTAMP
pub fn conv_bigint_to_timestamp(v: i64) -> EvalResult<Timestamp> {
    if v < 0 {
        return Err(RuntimeError::value_error("negative values not allowed"));
    }
    if v > Timestamp::MAX_EPOCH_SECONDS {
        return Err(RuntimeError::value_error("values over 2,147,483,647 not allowed"));
    }
    Timestamp::from_epoch_seconds(v)
}

pub fn conv_int_to_time(v: i32) -> EvalResult<Time> {
    conv_bigint_to_time(i64::from(v))
}

pub fn conv_short_to_time(v: i16) -> EvalResult<Time> {
    conv_bigint_to_time(i64::from(v))
}

/// Seconds rounded half-up, then as `conv_bigint_to_time`
pub fn conv_double_to_time(v: f64) -> EvalResult<Time> {
    conv_bigint_to_time(conv_double_to_bigint(v)?)
}

pub fn conv_float_to_time(v: f32) -> EvalResult<Time> {
    conv_bigint_to_time(conv_float_to_bigint(v)?)
}

pub fn conv_int_to_timestamp(v: i32) -> EvalResult<Timestamp> {
    conv_bigint_to_timestamp(i64::from(v))
}

pub fn conv_short_to_timestamp(v: i16) -> EvalResult<Timestamp> {
    conv_bigint_to_timestamp(i64::from(v))
}

pub fn conv_numeric_to_timestamp(n: &Numeric) -> EvalResult<Timestamp> {
    conv_bigint_to_timestamp(conv_numeric_to_bigint(n)?)
}

/// Epoch seconds rounded half-up, then as `conv_bigint_to_timestamp`
pub fn conv_double_to_timestamp(v: f64) -> EvalResult<Timestamp> {
    conv_bigint_to_timestamp(conv_double_to_bigint(v)?)
}

pub fn conv_float_to_timestamp(v: f32) -> EvalResult<Timestamp> {
    conv_bigint_to_timestamp(conv_float_to_bigint(v)?)
}

pub fn conv_string_to_date(s: &str) -> EvalResult<Date> {
    Date::parse(s)
}

pub fn conv_string_to_time(s: &str) -> EvalResult<Time> {
    Time::parse(s)
}

pub fn conv_string_to_datetime(s: &str) -> EvalResult<Datetime> {
    Datetime::parse(s)
}

pub fn conv_date_to_datetime(d: &Date) -> Datetime {
    d.to_datetime()
}

pub fn conv_datetime_to_date(dt: &Datetime) -> Date {
    dt.to_date()
}

pub fn conv_datetime_to_time(dt: &Datetime) -> Time {
    dt.to_time()
}

// =========================================================================
// To strings
// =========================================================================

pub fn conv_bigint_to_string(v: i64) -> String {
    v.to_string()
}

pub fn conv_int_to_string(v: i32) -> String {
    v.to_string()
}

pub fn conv_short_to_string(v: i16) -> String {
    v.to_string()
}

pub fn conv_date_to_string(d: &Date) -> String {
    d.to_string()
}

pub fn conv_time_to_string(t: &Time) -> String {
    t.to_string()
}

pub fn conv_datetime_to_string(dt: &Datetime) -> String {
    dt.to_string()
}

/// C `printf` style exponent: "1.5e3" becomes "1.5e+03"
fn c_exponent(formatted: String) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        }
        None => formatted,
    }
}

impl Runtime {
    // =========================================================================
    // Session-dependent conversions
    // =========================================================================

    pub fn conv_double_to_string(&self, v: f64) -> String {
        if self.oracle_compat_numbers() {
            if let Some(n) = Numeric::from_f64(v) {
                let plain = n.with_precision(DOUBLE_DIGITS, Rounding::HalfUp).to_plain_string();
                return detach_trailing_zeros(&plain).to_string();
            }
        }
        c_exponent(format!("{v:.15e}"))
    }

    pub fn conv_float_to_string(&self, v: f32) -> String {
        if self.oracle_compat_numbers() {
            if let Some(n) = Numeric::from_f32(v) {
                let plain = n.with_precision(FLOAT_DIGITS, Rounding::HalfUp).to_plain_string();
                return detach_trailing_zeros(&plain).to_string();
            }
        }
        c_exponent(format!("{v:.6e}"))
    }

    pub fn conv_numeric_to_string(&self, n: &Numeric) -> String {
        let plain = n.to_plain_string();
        if self.oracle_compat_numbers() {
            detach_trailing_zeros(&plain).to_string()
        } else {
            plain
        }
    }

    pub fn conv_timestamp_to_string(&self, ts: &Timestamp) -> String {
        ts.format_in(self.time_zone())
    }

    /// Parse a wall-clock time in the session time zone
    pub fn conv_string_to_timestamp(&self, s: &str) -> EvalResult<Timestamp> {
        Timestamp::parse_in(s, self.time_zone())
    }

    pub fn conv_date_to_timestamp(&self, d: &Date) -> EvalResult<Timestamp> {
        d.to_datetime().to_timestamp(self.time_zone())
    }

    pub fn conv_datetime_to_timestamp(&self, dt: &Datetime) -> EvalResult<Timestamp> {
        dt.to_timestamp(self.time_zone())
    }

    pub fn conv_timestamp_to_datetime(&self, ts: &Timestamp) -> Datetime {
        ts.to_datetime(self.time_zone())
    }

    pub fn conv_timestamp_to_date(&self, ts: &Timestamp) -> Date {
        ts.to_date(self.time_zone())
    }

    pub fn conv_timestamp_to_time(&self, ts: &Timestamp) -> Time {
        ts.to_time(self.time_zone())
    }

    // =========================================================================
    // Conversions from any value
    // =========================================================================

    pub fn conv_value_to_bigint(&self, v: &Value) -> EvalResult<Option<i64>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => conv_string_to_bigint(s)?,
            Value::Short(i) => conv_short_to_bigint(*i),
            Value::Int(i) => conv_int_to_bigint(*i),
            Value::Bigint(i) => *i,
            Value::Numeric(n) => conv_numeric_to_bigint(n)?,
            Value::Float(f) => conv_float_to_bigint(*f)?,
            Value::Double(d) => conv_double_to_bigint(*d)?,
            _ => return Err(not_compatible("BIGINT")),
        }))
    }

    pub fn conv_value_to_int(&self, v: &Value) -> EvalResult<Option<i32>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => conv_string_to_int(s)?,
            Value::Short(i) => conv_short_to_int(*i),
            Value::Int(i) => *i,
            Value::Bigint(i) => conv_bigint_to_int(*i)?,
            Value::Numeric(n) => conv_numeric_to_int(n)?,
            Value::Float(f) => conv_float_to_int(*f)?,
            Value::Double(d) => conv_double_to_int(*d)?,
            _ => return Err(not_compatible("INTEGER")),
        }))
    }

    pub fn conv_value_to_short(&self, v: &Value) -> EvalResult<Option<i16>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => conv_string_to_short(s)?,
            Value::Short(i) => *i,
            Value::Int(i) => conv_int_to_short(*i)?,
            Value::Bigint(i) => conv_bigint_to_short(*i)?,
            Value::Numeric(n) => conv_numeric_to_short(n)?,
            Value::Float(f) => conv_float_to_short(*f)?,
            Value::Double(d) => conv_double_to_short(*d)?,
            _ => return Err(not_compatible("SHORT")),
        }))
    }

    pub fn conv_value_to_numeric(&self, v: &Value) -> EvalResult<Option<Numeric>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => return conv_string_to_numeric(s),
            Value::Short(i) => conv_short_to_numeric(*i),
            Value::Int(i) => conv_int_to_numeric(*i),
            Value::Bigint(i) => conv_bigint_to_numeric(*i),
            Value::Numeric(n) => n.clone(),
            Value::Float(f) => conv_float_to_numeric(*f)?,
            Value::Double(d) => conv_double_to_numeric(*d)?,
            _ => return Err(not_compatible("NUMERIC")),
        }))
    }

    pub fn conv_value_to_double(&self, v: &Value) -> EvalResult<Option<f64>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => conv_string_to_double(s)?,
            Value::Short(i) => conv_short_to_double(*i),
            Value::Int(i) => conv_int_to_double(*i),
            Value::Bigint(i) => conv_bigint_to_double(*i),
            Value::Numeric(n) => conv_numeric_to_double(n)?,
            Value::Float(f) => conv_float_to_double(*f),
            Value::Double(d) => *d,
            _ => return Err(not_compatible("DOUBLE")),
        }))
    }

    pub fn conv_value_to_float(&self, v: &Value) -> EvalResult<Option<f32>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => conv_string_to_float(s)?,
            Value::Short(i) => conv_short_to_float(*i),
            Value::Int(i) => conv_int_to_float(*i),
            Value::Bigint(i) => conv_bigint_to_float(*i),
            Value::Numeric(n) => conv_numeric_to_float(n)?,
            Value::Float(f) => *f,
            Value::Double(d) => conv_double_to_float(*d)?,
            _ => return Err(not_compatible("FLOAT")),
        }))
    }

    /// Text form of any value except BOOLEAN
    pub fn conv_value_to_string(&self, v: &Value) -> EvalResult<Option<String>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::Boolean(_) => return Err(not_compatible("STRING")),
            Value::String(s) => s.clone(),
            Value::Short(i) => conv_short_to_string(*i),
            Value::Int(i) => conv_int_to_string(*i),
            Value::Bigint(i) => conv_bigint_to_string(*i),
            Value::Numeric(n) => self.conv_numeric_to_string(n),
            Value::Float(f) => self.conv_float_to_string(*f),
            Value::Double(d) => self.conv_double_to_string(*d),
            Value::Date(d) => conv_date_to_string(d),
            Value::Time(t) => conv_time_to_string(t),
            Value::Datetime(dt) => conv_datetime_to_string(dt),
            Value::Timestamp(ts) => self.conv_timestamp_to_string(ts),
        }))
    }

    pub fn conv_value_to_date(&self, v: &Value) -> EvalResult<Option<Date>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => conv_string_to_date(s)?,
            Value::Date(d) => *d,
            Value::Datetime(dt) => conv_datetime_to_date(dt),
            Value::Timestamp(ts) => self.conv_timestamp_to_date(ts),
            _ => return Err(not_compatible("DATE")),
        }))
    }

    /// TIME from text, temporal values, and integral or floating seconds
    pub fn conv_value_to_time(&self, v: &Value) -> EvalResult<Option<Time>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => conv_string_to_time(s)?,
            Value::Short(i) => conv_short_to_time(*i)?,
            Value::Int(i) => conv_int_to_time(*i)?,
            Value::Bigint(i) => conv_bigint_to_time(*i)?,
            Value::Float(f) => conv_float_to_time(*f)?,
            Value::Double(d) => conv_double_to_time(*d)?,
            Value::Time(t) => *t,
            Value::Datetime(dt) => conv_datetime_to_time(dt),
            Value::Timestamp(ts) => self.conv_timestamp_to_time(ts),
            _ => return Err(not_compatible("TIME")),
        }))
    }

    pub fn conv_value_to_datetime(&self, v: &Value) -> EvalResult<Option<Datetime>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => conv_string_to_datetime(s)?,
            Value::Date(d) => conv_date_to_datetime(d),
            Value::Datetime(dt) => *dt,
            Value::Timestamp(ts) => self.conv_timestamp_to_datetime(ts),
            _ => return Err(not_compatible("DATETIME")),
        }))
    }

    pub fn conv_value_to_timestamp(&self, v: &Value) -> EvalResult<Option<Timestamp>> {
        Ok(Some(match v {
            Value::Null => return Ok(None),
            Value::String(s) => self.conv_string_to_timestamp(s)?,
            Value::Short(i) => conv_short_to_timestamp(*i)?,
            Value::Int(i) => conv_int_to_timestamp(*i)?,
            Value::Bigint(i) => conv_bigint_to_timestamp(*i)?,
            Value::Numeric(n) => conv_numeric_to_timestamp(n)?,
            Value::Float(f) => conv_float_to_timestamp(*f)?,
            Value::Double(d) => conv_double_to_timestamp(*d)?,
            Value::Date(d) => self.conv_date_to_timestamp(d)?,
            Value::Datetime(dt) => self.conv_datetime_to_timestamp(dt)?,
            Value::Timestamp(ts) => *ts,
            _ => return Err(not_compatible("TIMESTAMP")),
        }))
    }

    /// Convert a value to `ty`, keeping NULL
    pub fn coerce(&self, v: &Value, ty: RuntimeType) -> EvalResult<Value> {
        if v.runtime_type() == Some(ty) {
            return Ok(v.clone());
        }
        Ok(match ty {
            RuntimeType::Boolean => match v {
                Value::Null => Value::Null,
                _ => return Err(not_compatible("BOOLEAN")),
            },
            RuntimeType::String => self.conv_value_to_string(v)?.into(),
            RuntimeType::Short => self.conv_value_to_short(v)?.into(),
            RuntimeType::Int => self.conv_value_to_int(v)?.into(),
            RuntimeType::Bigint => self.conv_value_to_bigint(v)?.into(),
            RuntimeType::Numeric => self.conv_value_to_numeric(v)?.into(),
            RuntimeType::Float => self.conv_value_to_float(v)?.into(),
            RuntimeType::Double => self.conv_value_to_double(v)?.into(),
            RuntimeType::Date => self.conv_value_to_date(v)?.into(),
            RuntimeType::Time => self.conv_value_to_time(v)?.into(),
            RuntimeType::Datetime => self.conv_value_to_datetime(v)?.into(),
            RuntimeType::Timestamp => self.conv_value_to_timestamp(v)?.into(),
        })
    }
}
