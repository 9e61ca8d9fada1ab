//! Value checks applied on assignment and at loop boundaries

use crate::error::EvalResult;
use plcsql_diagnostics::RuntimeError;
use plcsql_types::{MAX_PRECISION, Numeric, Rounding, Value};

/// Reject infinite and NaN FLOAT values
pub fn check_float(v: f32) -> EvalResult<f32> {
    if v.is_infinite() {
        Err(RuntimeError::value_error("data overflow on data type FLOAT"))
    } else if v.is_nan() {
        Err(RuntimeError::value_error("not a valid FLOAT value"))
    } else {
        Ok(v)
    }
}

/// Reject infinite and NaN DOUBLE values
pub fn check_double(v: f64) -> EvalResult<f64> {
    if v.is_infinite() {
        Err(RuntimeError::value_error("data overflow on data type DOUBLE"))
    } else if v.is_nan() {
        Err(RuntimeError::value_error("not a valid DOUBLE value"))
    } else {
        Ok(v)
    }
}

/// Fit a string into a CHAR(length) or VARCHAR(length) slot
///
/// CHAR values are padded with spaces up to `length`.
pub fn check_str_length(is_char: bool, length: usize, s: Option<&str>) -> EvalResult<Option<String>> {
    let Some(s) = s else {
        return Ok(None);
    };
    let chars = s.chars().count();
    if chars > length {
        return Err(RuntimeError::value_error("string does not fit in the target type's length"));
    }
    let mut out = s.to_string();
    if is_char {
        out.extend(std::iter::repeat_n(' ', length - chars));
    }
    Ok(Some(out))
}

/// Fit a NUMERIC value into NUMERIC(precision, scale)
pub fn check_precision(precision: u64, scale: i64, n: Option<&Numeric>) -> EvalResult<Option<Numeric>> {
    if !(1..=MAX_PRECISION).contains(&precision) || scale < 0 || scale as u64 > precision {
        return Err(RuntimeError::program_error(format!(
            "invalid target type NUMERIC({precision}, {scale})"
        )));
    }
    let Some(n) = n else {
        return Ok(None);
    };
    let fitted = if n.scale() == scale { n.clone() } else { n.with_scale(scale, Rounding::HalfUp) };
    if fitted.precision() > precision {
        return Err(RuntimeError::value_error(
            "numeric value does not fit in the target type's precision and scale",
        ));
    }
    Ok(Some(fitted))
}

/// Fail with VALUE_ERROR(`message`) on NULL
pub fn check_not_null<'a>(v: &'a Value, message: &str) -> EvalResult<&'a Value> {
    if v.is_null() { Err(RuntimeError::value_error(message)) } else { Ok(v) }
}

pub fn check_for_loop_iter_step(step: i64) -> EvalResult<i64> {
    if step <= 0 {
        Err(RuntimeError::value_error("FOR loop iteration steps must be positive integers"))
    } else {
        Ok(step)
    }
}
