//! Temporal Operators
//!
//! Implements: offset addition and subtraction for DATE (days), TIME
//! (seconds), DATETIME (milliseconds) and TIMESTAMP (seconds), and the
//! difference of two values of the same temporal type in the same unit.

use super::binary;
use crate::error::EvalResult;
use plcsql_diagnostics::RuntimeError;
use plcsql_types::{Date, Datetime, Time, Timestamp};

fn negated(offset: i64, type_name: &str) -> EvalResult<i64> {
    offset
        .checked_neg()
        .ok_or_else(|| RuntimeError::value_error(format!("not in the valid range of {type_name} type")))
}

// =========================================================================
// DATE
// =========================================================================

pub fn add_date(d: Option<Date>, days: Option<i64>) -> EvalResult<Option<Date>> {
    binary(d, days, |d, days| d.add_days(days))
}

pub fn subtract_date(d: Option<Date>, days: Option<i64>) -> EvalResult<Option<Date>> {
    binary(d, days, |d, days| d.add_days(negated(days, "DATE")?))
}

/// Days between two dates
pub fn subtract_dates(l: Option<Date>, r: Option<Date>) -> EvalResult<Option<i64>> {
    binary(l, r, |l, r| l.days_since(&r))
}

// =========================================================================
// TIME
// =========================================================================

/// Add seconds, wrapping around midnight
pub fn add_time(t: Option<Time>, seconds: Option<i64>) -> EvalResult<Option<Time>> {
    binary(t, seconds, |t, seconds| Ok(t.add_seconds(seconds)))
}

pub fn subtract_time(t: Option<Time>, seconds: Option<i64>) -> EvalResult<Option<Time>> {
    binary(t, seconds, |t, seconds| Ok(t.add_seconds(-(seconds % 86_400))))
}

/// Seconds between two times of day
pub fn subtract_times(l: Option<Time>, r: Option<Time>) -> EvalResult<Option<i64>> {
    binary(l, r, |l, r| Ok(l.seconds_since(&r)))
}

// =========================================================================
// DATETIME
// =========================================================================

pub fn add_datetime(dt: Option<Datetime>, millis: Option<i64>) -> EvalResult<Option<Datetime>> {
    binary(dt, millis, |dt, millis| dt.add_millis(millis))
}

pub fn subtract_datetime(dt: Option<Datetime>, millis: Option<i64>) -> EvalResult<Option<Datetime>> {
    binary(dt, millis, |dt, millis| dt.add_millis(negated(millis, "DATETIME")?))
}

/// Milliseconds between two datetimes
pub fn subtract_datetimes(l: Option<Datetime>, r: Option<Datetime>) -> EvalResult<Option<i64>> {
    binary(l, r, |l, r| l.millis_since(&r))
}

// =========================================================================
// TIMESTAMP
// =========================================================================

pub fn add_timestamp(ts: Option<Timestamp>, seconds: Option<i64>) -> EvalResult<Option<Timestamp>> {
    binary(ts, seconds, |ts, seconds| ts.add_seconds(seconds))
}

pub fn subtract_timestamp(ts: Option<Timestamp>, seconds: Option<i64>) -> EvalResult<Option<Timestamp>> {
    binary(ts, seconds, |ts, seconds| ts.add_seconds(negated(seconds, "TIMESTAMP")?))
}

/// Seconds between two timestamps
pub fn subtract_timestamps(l: Option<Timestamp>, r: Option<Timestamp>) -> EvalResult<Option<i64>> {
    binary(l, r, |l, r| l.seconds_since(&r))
}
