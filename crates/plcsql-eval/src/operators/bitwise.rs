//! Bitwise Operators
//!
//! Implements: complement (~) on SHORT, INT and BIGINT, and &, |, ^, <<, >>
//! on BIGINT. Every result is a BIGINT. Shift counts use their low six
//! bits, so `1 << 64` is 1.

use super::binary;
use crate::conversion::{conv_double_to_bigint, conv_float_to_bigint, conv_numeric_to_bigint, conv_string_to_bigint};
use crate::engine::Runtime;
use crate::error::{EvalResult, incompatible_unary};
use plcsql_types::Value;

const SHIFT_MASK: i64 = 0x3f;

pub fn bit_compli_short(v: Option<i16>) -> Option<i64> {
    v.map(|v| !i64::from(v))
}

pub fn bit_compli_int(v: Option<i32>) -> Option<i64> {
    v.map(|v| !i64::from(v))
}

pub fn bit_compli_bigint(v: Option<i64>) -> Option<i64> {
    v.map(|v| !v)
}

pub fn bit_and(l: Option<i64>, r: Option<i64>) -> Option<i64> {
    l.zip(r).map(|(l, r)| l & r)
}

pub fn bit_or(l: Option<i64>, r: Option<i64>) -> Option<i64> {
    l.zip(r).map(|(l, r)| l | r)
}

pub fn bit_xor(l: Option<i64>, r: Option<i64>) -> Option<i64> {
    l.zip(r).map(|(l, r)| l ^ r)
}

pub fn bit_shift_left(l: Option<i64>, r: Option<i64>) -> Option<i64> {
    l.zip(r).map(|(l, r)| l.wrapping_shl((r & SHIFT_MASK) as u32))
}

/// Arithmetic right shift
pub fn bit_shift_right(l: Option<i64>, r: Option<i64>) -> Option<i64> {
    l.zip(r).map(|(l, r)| l.wrapping_shr((r & SHIFT_MASK) as u32))
}

impl Runtime {
    /// `~` on any value; text and non-integral numbers go through BIGINT
    pub fn bit_compli(&self, v: &Value) -> EvalResult<Value> {
        let operand = match self.effective(v) {
            Value::Null => return Ok(Value::Null),
            Value::String(s) => conv_string_to_bigint(s)?,
            Value::Short(i) => i64::from(*i),
            Value::Int(i) => i64::from(*i),
            Value::Bigint(i) => *i,
            Value::Numeric(n) => conv_numeric_to_bigint(n)?,
            Value::Float(f) => conv_float_to_bigint(*f)?,
            Value::Double(d) => conv_double_to_bigint(*d)?,
            other => return Err(incompatible_unary("take bit-complement of", other)),
        };
        Ok(bit_compli_bigint(Some(operand)).into())
    }

    /// Binary bitwise operator on any values, both converted to BIGINT
    pub fn bitwise(&self, op: fn(Option<i64>, Option<i64>) -> Option<i64>, l: &Value, r: &Value) -> EvalResult<Value> {
        let l = self.conv_value_to_bigint(self.effective(l))?;
        let r = self.conv_value_to_bigint(self.effective(r))?;
        Ok(binary(l, r, |l, r| Ok(op(Some(l), Some(r))))?.flatten().into())
    }
}
