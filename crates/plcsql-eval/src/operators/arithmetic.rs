//! Arithmetic Operators for PL/CSQL
//!
//! Implements: Negate, Add, Subtract, Multiply, Divide, DivInt, Modulo for
//! SHORT, INT, BIGINT, NUMERIC, FLOAT and DOUBLE, plus the dynamic
//! fallbacks that promote operands along the numeric ladder and route
//! temporal operands to offset arithmetic.

use super::binary;
use super::datetime::{
    add_date, add_datetime, add_time, add_timestamp, subtract_date, subtract_datetime,
    subtract_datetimes, subtract_dates, subtract_time, subtract_times, subtract_timestamp,
    subtract_timestamps,
};
use crate::checks::{check_double, check_float};
use crate::conversion::conv_string_to_double;
use crate::engine::{Runtime, non_null};
use crate::error::{
    ArithOp, EvalResult, float_overflow, incompatible_binary, incompatible_unary, integer_overflow,
    negation_overflow,
};
use crate::lattice::{arithmetic_type, integer_division_type};
use plcsql_diagnostics::RuntimeError;
use plcsql_types::{Datetime, MAX_PRECISION, Numeric, Rounding, RuntimeType, Time, Value};

macro_rules! integer_arithmetic {
    ($ty:ty, $rt:expr, $core:ident, $neg:ident, $add:ident, $sub:ident, $mul:ident, $div_int:ident, $modulo:ident) => {
        fn $core(op: ArithOp, l: $ty, r: $ty) -> EvalResult<$ty> {
            if matches!(op, ArithOp::Divide | ArithOp::DivInt | ArithOp::Modulo) && r == 0 {
                return Err(RuntimeError::zero_divide());
            }
            let result = match op {
                ArithOp::Add => l.checked_add(r),
                ArithOp::Subtract => l.checked_sub(r),
                ArithOp::Multiply => l.checked_mul(r),
                ArithOp::Divide | ArithOp::DivInt => l.checked_div(r),
                ArithOp::Modulo => Some(l.wrapping_rem(r)),
            };
            result.ok_or_else(|| integer_overflow(op, $rt))
        }

        pub fn $neg(v: Option<$ty>) -> EvalResult<Option<$ty>> {
            v.map(|v| v.checked_neg().ok_or_else(|| negation_overflow($rt))).transpose()
        }

        pub fn $add(l: Option<$ty>, r: Option<$ty>) -> EvalResult<Option<$ty>> {
            binary(l, r, |l, r| $core(ArithOp::Add, l, r))
        }

        pub fn $sub(l: Option<$ty>, r: Option<$ty>) -> EvalResult<Option<$ty>> {
            binary(l, r, |l, r| $core(ArithOp::Subtract, l, r))
        }

        pub fn $mul(l: Option<$ty>, r: Option<$ty>) -> EvalResult<Option<$ty>> {
            binary(l, r, |l, r| $core(ArithOp::Multiply, l, r))
        }

        /// Truncating integer division
        pub fn $div_int(l: Option<$ty>, r: Option<$ty>) -> EvalResult<Option<$ty>> {
            binary(l, r, |l, r| $core(ArithOp::DivInt, l, r))
        }

        /// Remainder with the sign of the dividend
        pub fn $modulo(l: Option<$ty>, r: Option<$ty>) -> EvalResult<Option<$ty>> {
            binary(l, r, |l, r| $core(ArithOp::Modulo, l, r))
        }
    };
}

integer_arithmetic!(i16, RuntimeType::Short, short_arith, neg_short, add_short, subtract_short, mult_short, div_int_short, mod_short);
integer_arithmetic!(i32, RuntimeType::Int, int_arith, neg_int, add_int, subtract_int, mult_int, div_int_int, mod_int);
integer_arithmetic!(i64, RuntimeType::Bigint, bigint_arith, neg_bigint, add_bigint, subtract_bigint, mult_bigint, div_int_bigint, mod_bigint);

macro_rules! float_arithmetic {
    ($ty:ty, $rt:expr, $check:ident, $core:ident, $neg:ident, $add:ident, $sub:ident, $mul:ident, $div:ident) => {
        fn $core(op: ArithOp, l: $ty, r: $ty) -> EvalResult<$ty> {
            let result = match op {
                ArithOp::Add => l + r,
                ArithOp::Subtract => l - r,
                ArithOp::Multiply => l * r,
                ArithOp::Divide if r == 0.0 => return Err(RuntimeError::zero_divide()),
                ArithOp::Divide => l / r,
                ArithOp::DivInt | ArithOp::Modulo => {
                    return Err(RuntimeError::program_error(format!("{} is not defined on {}", op.noun(), $rt)));
                }
            };
            $check(result).map_err(|_| float_overflow(op, $rt))
        }

        pub fn $neg(v: Option<$ty>) -> EvalResult<Option<$ty>> {
            Ok(v.map(|v| -v))
        }

        pub fn $add(l: Option<$ty>, r: Option<$ty>) -> EvalResult<Option<$ty>> {
            binary(l, r, |l, r| $core(ArithOp::Add, l, r))
        }

        pub fn $sub(l: Option<$ty>, r: Option<$ty>) -> EvalResult<Option<$ty>> {
            binary(l, r, |l, r| $core(ArithOp::Subtract, l, r))
        }

        pub fn $mul(l: Option<$ty>, r: Option<$ty>) -> EvalResult<Option<$ty>> {
            binary(l, r, |l, r| $core(ArithOp::Multiply, l, r))
        }

        pub fn $div(l: Option<$ty>, r: Option<$ty>) -> EvalResult<Option<$ty>> {
            binary(l, r, |l, r| $core(ArithOp::Divide, l, r))
        }
    };
}

float_arithmetic!(f32, RuntimeType::Float, check_float, float_arith, neg_float, add_float, subtract_float, mult_float, div_float);
float_arithmetic!(f64, RuntimeType::Double, check_double, double_arith, neg_double, add_double, subtract_double, mult_double, div_double);

// =========================================================================
// NUMERIC
// =========================================================================

/// Counts zeros implied by a negative scale, and rejects more than 38
/// fractional digits
fn within_max_precision(n: Numeric) -> EvalResult<Numeric> {
    n.into_bounded().ok_or_else(|| {
        RuntimeError::value_error(format!("the operation results in a precision higher than {MAX_PRECISION}"))
    })
}

pub fn neg_numeric(v: Option<&Numeric>) -> EvalResult<Option<Numeric>> {
    Ok(v.map(|n| -n))
}

/// Exact sum at scale max(s1, s2)
pub fn add_numeric(l: Option<&Numeric>, r: Option<&Numeric>) -> EvalResult<Option<Numeric>> {
    binary(l, r, |l, r| within_max_precision(l + r))
}

/// Exact difference at scale max(s1, s2)
pub fn subtract_numeric(l: Option<&Numeric>, r: Option<&Numeric>) -> EvalResult<Option<Numeric>> {
    binary(l, r, |l, r| within_max_precision(l - r))
}

/// Exact product at scale s1 + s2
pub fn mult_numeric(l: Option<&Numeric>, r: Option<&Numeric>) -> EvalResult<Option<Numeric>> {
    binary(l, r, |l, r| within_max_precision(l * r))
}

impl Runtime {
    // =========================================================================
    // Session-dependent division
    // =========================================================================

    fn numeric_quotient(&self, l: &Numeric, r: &Numeric) -> EvalResult<Numeric> {
        if r.is_zero() {
            return Err(RuntimeError::zero_divide());
        }
        let scale = self.division_scale(l.scale(), r.scale());
        l.div(r, scale, Rounding::HalfUp)
            .and_then(Numeric::into_bounded)
            .ok_or_else(numeric_division_overflow)
    }

    /// Quotient rounded half-up to max(9, s1, s2) digits, or max(s1, s2)
    /// under `compat_numeric_division_scale`
    pub fn div_numeric(&self, l: Option<&Numeric>, r: Option<&Numeric>) -> EvalResult<Option<Numeric>> {
        binary(l, r, |l, r| self.numeric_quotient(l, r))
    }

    /// Integer quotient, or a NUMERIC one under `oracle_compat_number_behavior`
    fn integer_quotient<T>(&self, l: T, r: T, core: fn(ArithOp, T, T) -> EvalResult<T>) -> EvalResult<Value>
    where
        T: Copy + Into<i64> + Into<Value>,
    {
        if self.oracle_compat_numbers() {
            let (l, r): (i64, i64) = (l.into(), r.into());
            return self.numeric_quotient(&Numeric::from(l), &Numeric::from(r)).map(Value::Numeric);
        }
        core(ArithOp::Divide, l, r).map(Into::into)
    }

    pub fn div_short(&self, l: Option<i16>, r: Option<i16>) -> EvalResult<Value> {
        Ok(binary(l, r, |l, r| self.integer_quotient(l, r, short_arith))?.unwrap_or_default())
    }

    pub fn div_int(&self, l: Option<i32>, r: Option<i32>) -> EvalResult<Value> {
        Ok(binary(l, r, |l, r| self.integer_quotient(l, r, int_arith))?.unwrap_or_default())
    }

    pub fn div_bigint(&self, l: Option<i64>, r: Option<i64>) -> EvalResult<Value> {
        Ok(binary(l, r, |l, r| self.integer_quotient(l, r, bigint_arith))?.unwrap_or_default())
    }

    /// Typed string addition: concatenation, where empty-string mode reads
    /// a NULL operand as ""
    pub fn add_string(&self, l: Option<&str>, r: Option<&str>) -> Option<String> {
        self.concat(l, r)
    }

    // =========================================================================
    // Dynamic Arithmetic
    // =========================================================================

    /// Unary minus on any value
    pub fn negate(&self, v: &Value) -> EvalResult<Value> {
        Ok(match self.effective(v) {
            Value::Null => Value::Null,
            Value::String(s) => Value::Double(-conv_string_to_double(s)?),
            Value::Short(i) => neg_short(Some(*i))?.into(),
            Value::Int(i) => neg_int(Some(*i))?.into(),
            Value::Bigint(i) => neg_bigint(Some(*i))?.into(),
            Value::Numeric(n) => Value::Numeric(-n),
            Value::Float(f) => Value::Float(-f),
            Value::Double(d) => Value::Double(-d),
            other => return Err(incompatible_unary("negate", other)),
        })
    }

    /// `+` on any values
    ///
    /// Two strings concatenate; a temporal value and a numeric or string
    /// offset shift the temporal value in either operand order.
    pub fn add(&self, l: &Value, r: &Value) -> EvalResult<Value> {
        let (l, r) = (self.effective(l), self.effective(r));
        if l.is_null() || r.is_null() {
            return Ok(Value::Null);
        }
        if let (Value::String(a), Value::String(b)) = (l, r) {
            return Ok(Value::String(format!("{a}{b}")));
        }
        if let Some(shifted) = self.shift_temporal(l, r)? {
            return Ok(shifted);
        }
        if let Some(shifted) = self.shift_temporal(r, l)? {
            return Ok(shifted);
        }
        self.numeric_arithmetic(ArithOp::Add, l, r)
    }

    /// `-` on any values
    pub fn subtract(&self, l: &Value, r: &Value) -> EvalResult<Value> {
        let (l, r) = (self.effective(l), self.effective(r));
        if l.is_null() || r.is_null() {
            return Ok(Value::Null);
        }
        if let Some(difference) = self.temporal_difference(l, r)? {
            return Ok(difference);
        }
        if let Some(shifted) = self.unshift_temporal(l, r)? {
            return Ok(shifted);
        }
        self.numeric_arithmetic(ArithOp::Subtract, l, r)
    }

    /// `*` on any values
    pub fn multiply(&self, l: &Value, r: &Value) -> EvalResult<Value> {
        self.dynamic_arithmetic(ArithOp::Multiply, l, r)
    }

    /// `/` on any values
    pub fn divide(&self, l: &Value, r: &Value) -> EvalResult<Value> {
        self.dynamic_arithmetic(ArithOp::Divide, l, r)
    }

    /// `DIV` on any values
    pub fn div_integer(&self, l: &Value, r: &Value) -> EvalResult<Value> {
        self.dynamic_arithmetic(ArithOp::DivInt, l, r)
    }

    /// `MOD` on any values
    pub fn modulo(&self, l: &Value, r: &Value) -> EvalResult<Value> {
        self.dynamic_arithmetic(ArithOp::Modulo, l, r)
    }

    fn dynamic_arithmetic(&self, op: ArithOp, l: &Value, r: &Value) -> EvalResult<Value> {
        let (l, r) = (self.effective(l), self.effective(r));
        if l.is_null() || r.is_null() {
            return Ok(Value::Null);
        }
        self.numeric_arithmetic(op, l, r)
    }

    /// Promote two non-NULL operands to their common type and apply `op`
    fn numeric_arithmetic(&self, op: ArithOp, l: &Value, r: &Value) -> EvalResult<Value> {
        let common = match (l.runtime_type(), r.runtime_type()) {
            (Some(lt), Some(rt)) if matches!(op, ArithOp::DivInt | ArithOp::Modulo) => integer_division_type(lt, rt),
            (Some(lt), Some(rt)) => arithmetic_type(lt, rt),
            _ => None,
        };
        let common = common.ok_or_else(|| incompatible_binary(op, l, r))?;
        let (lv, rv) = (self.coerce(l, common)?, self.coerce(r, common)?);

        match (lv, rv) {
            (Value::Short(a), Value::Short(b)) if op == ArithOp::Divide => self.integer_quotient(a, b, short_arith),
            (Value::Short(a), Value::Short(b)) => short_arith(op, a, b).map(Value::Short),
            (Value::Int(a), Value::Int(b)) if op == ArithOp::Divide => self.integer_quotient(a, b, int_arith),
            (Value::Int(a), Value::Int(b)) => int_arith(op, a, b).map(Value::Int),
            (Value::Bigint(a), Value::Bigint(b)) if op == ArithOp::Divide => self.integer_quotient(a, b, bigint_arith),
            (Value::Bigint(a), Value::Bigint(b)) => bigint_arith(op, a, b).map(Value::Bigint),
            (Value::Numeric(a), Value::Numeric(b)) => {
                let result = match op {
                    ArithOp::Add => add_numeric(Some(&a), Some(&b))?,
                    ArithOp::Subtract => subtract_numeric(Some(&a), Some(&b))?,
                    ArithOp::Multiply => mult_numeric(Some(&a), Some(&b))?,
                    ArithOp::Divide => self.div_numeric(Some(&a), Some(&b))?,
                    ArithOp::DivInt | ArithOp::Modulo => return Err(incompatible_binary(op, l, r)),
                };
                Ok(result.into())
            }
            (Value::Float(a), Value::Float(b)) => float_arith(op, a, b).map(Value::Float),
            (Value::Double(a), Value::Double(b)) => double_arith(op, a, b).map(Value::Double),
            _ => Err(RuntimeError::program_error(format!(
                "unexpected operands after promotion to {common}"
            ))),
        }
    }

    /// Offset as BIGINT for temporal arithmetic
    fn offset(&self, v: &Value) -> EvalResult<i64> {
        non_null(self.conv_value_to_bigint(v)?)
    }

    fn is_offset(v: &Value) -> bool {
        v.runtime_type().is_some_and(|t| t.is_numeric() || t == RuntimeType::String)
    }

    /// `temporal + offset`; `None` when `t` is not temporal or `o` is not an offset
    fn shift_temporal(&self, t: &Value, o: &Value) -> EvalResult<Option<Value>> {
        if !Self::is_offset(o) {
            return Ok(None);
        }
        let shifted: Value = match t {
            Value::Date(d) => add_date(Some(*d), Some(self.offset(o)?))?.into(),
            Value::Time(tm) => add_time(Some(*tm), Some(self.offset(o)?))?.into(),
            Value::Datetime(dt) => add_datetime(Some(*dt), Some(self.offset(o)?))?.into(),
            Value::Timestamp(ts) => add_timestamp(Some(*ts), Some(self.offset(o)?))?.into(),
            _ => return Ok(None),
        };
        Ok(Some(shifted))
    }

    /// `temporal - numeric offset`
    fn unshift_temporal(&self, t: &Value, o: &Value) -> EvalResult<Option<Value>> {
        if !o.runtime_type().is_some_and(|ty| ty.is_numeric()) {
            return Ok(None);
        }
        let shifted: Value = match t {
            Value::Date(d) => subtract_date(Some(*d), Some(self.offset(o)?))?.into(),
            Value::Time(tm) => subtract_time(Some(*tm), Some(self.offset(o)?))?.into(),
            Value::Datetime(dt) => subtract_datetime(Some(*dt), Some(self.offset(o)?))?.into(),
            Value::Timestamp(ts) => subtract_timestamp(Some(*ts), Some(self.offset(o)?))?.into(),
            _ => return Ok(None),
        };
        Ok(Some(shifted))
    }

    /// Difference of two temporal operands, or a temporal and a string
    fn temporal_difference(&self, l: &Value, r: &Value) -> EvalResult<Option<Value>> {
        let tz = self.time_zone();
        let difference = match (l, r) {
            (Value::Date(a), Value::Date(b)) => subtract_dates(Some(*a), Some(*b))?,
            (Value::Time(a), Value::Time(b)) => subtract_times(Some(*a), Some(*b))?,
            (Value::Datetime(a), Value::Datetime(b)) => subtract_datetimes(Some(*a), Some(*b))?,
            (Value::Timestamp(a), Value::Timestamp(b)) => subtract_timestamps(Some(*a), Some(*b))?,

            (Value::Date(a), Value::Datetime(b)) => subtract_datetimes(Some(a.to_datetime()), Some(*b))?,
            (Value::Datetime(a), Value::Date(b)) => subtract_datetimes(Some(*a), Some(b.to_datetime()))?,
            (Value::Date(a), Value::Timestamp(b)) => {
                subtract_datetimes(Some(a.to_datetime()), Some(b.to_datetime(tz)))?
            }
            (Value::Timestamp(a), Value::Date(b)) => {
                subtract_datetimes(Some(a.to_datetime(tz)), Some(b.to_datetime()))?
            }
            (Value::Datetime(a), Value::Timestamp(b)) => subtract_datetimes(Some(*a), Some(b.to_datetime(tz)))?,
            (Value::Timestamp(a), Value::Datetime(b)) => subtract_datetimes(Some(a.to_datetime(tz)), Some(*b))?,

            (Value::String(s), Value::Date(_) | Value::Datetime(_)) => {
                subtract_datetimes(Some(Datetime::parse(s)?), self.conv_value_to_datetime(r)?)?
            }
            (Value::Date(_) | Value::Datetime(_), Value::String(s)) => {
                subtract_datetimes(self.conv_value_to_datetime(l)?, Some(Datetime::parse(s)?))?
            }
            (Value::String(s), Value::Time(t)) => subtract_times(Some(Time::parse(s)?), Some(*t))?,
            (Value::Time(t), Value::String(s)) => subtract_times(Some(*t), Some(Time::parse(s)?))?,
            (Value::String(s), Value::Timestamp(ts)) => {
                subtract_timestamps(Some(self.conv_string_to_timestamp(s)?), Some(*ts))?
            }
            (Value::Timestamp(ts), Value::String(s)) => {
                subtract_timestamps(Some(*ts), Some(self.conv_string_to_timestamp(s)?))?
            }
            _ => return Ok(None),
        };
        Ok(Some(difference.into()))
    }
}

fn numeric_division_overflow() -> RuntimeError {
    RuntimeError::value_error("data overflow in division of NUMERIC values")
}
