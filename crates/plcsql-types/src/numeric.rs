//! Exact decimal values
//!
//! `Numeric` keeps the unscaled magnitude and scale of the value it was built
//! from, so `1.50` and `1.5` compare equal but report different precision and
//! scale. Precision is the number of digits the value needs in plain notation:
//! the digits of the unscaled magnitude plus any zeros a negative scale implies.
//!
//! Values from `parse` and from [`Numeric::into_bounded`] satisfy
//! `0 <= scale <= 38` and `precision <= 38`.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use plcsql_diagnostics::RuntimeError;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Largest precision a NUMERIC value may carry
pub const MAX_PRECISION: u64 = 38;

/// Rounding applied when digits are discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round half away from zero
    HalfUp,
    /// Truncate toward zero
    Down,
}

/// Exact decimal number
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeric(BigDecimal);

fn pow10(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exponent as usize)
}

fn digit_count(n: &BigInt) -> u64 {
    n.magnitude().to_string().len() as u64
}

/// Integer division of `n` by `d` with the given rounding
fn div_round(n: &BigInt, d: &BigInt, rounding: Rounding) -> BigInt {
    let quotient = n / d;
    let remainder = n % d;
    if remainder.is_zero() || rounding == Rounding::Down {
        return quotient;
    }
    let twice = remainder.abs() * 2u8;
    if twice >= d.abs() {
        if n.is_negative() != d.is_negative() {
            quotient - BigInt::one()
        } else {
            quotient + BigInt::one()
        }
    } else {
        quotient
    }
}

impl Numeric {
    /// Create from an unscaled magnitude and a scale
    ///
    /// The result is not bounded; pass it through [`Numeric::into_bounded`]
    /// before it reaches a NUMERIC variable.
    pub fn new(unscaled: BigInt, scale: i64) -> Self {
        Self(BigDecimal::new(unscaled, scale))
    }

    pub fn zero() -> Self {
        Self::from(0i64)
    }

    /// Parse a decimal literal
    ///
    /// Fails with VALUE_ERROR on malformed text and on values needing more
    /// than 38 digits.
    pub fn parse(s: &str) -> Result<Self, RuntimeError> {
        let value = BigDecimal::from_str(s)
            .map(Self)
            .map_err(|_| RuntimeError::value_error(format!("invalid number string: '{s}'")))?;
        value
            .into_bounded()
            .ok_or_else(|| RuntimeError::value_error(format!("data overflow when converted to NUMERIC: '{s}'")))
    }

    /// Whether the value has at most 38 digits and at most 38 of them
    /// fractional
    pub fn fits_max_precision(&self) -> bool {
        self.precision() <= MAX_PRECISION && self.scale() <= MAX_PRECISION as i64
    }

    /// The same value with a non-negative scale, or `None` when it does not
    /// fit in 38 digits
    pub fn into_bounded(self) -> Option<Self> {
        if !self.fits_max_precision() {
            return None;
        }
        if self.scale() < 0 {
            Some(self.with_scale(0, Rounding::Down))
        } else {
            Some(self)
        }
    }

    /// Unscaled magnitude and scale
    pub fn parts(&self) -> (BigInt, i64) {
        self.0.as_bigint_and_exponent()
    }

    pub fn unscaled(&self) -> BigInt {
        self.parts().0
    }

    pub fn scale(&self) -> i64 {
        self.parts().1
    }

    /// Digits needed in plain notation; zero has precision 1
    pub fn precision(&self) -> u64 {
        let (unscaled, scale) = self.parts();
        let digits = digit_count(&unscaled);
        if scale < 0 { digits.saturating_add(scale.unsigned_abs()) } else { digits }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn as_big_decimal(&self) -> &BigDecimal {
        &self.0
    }

    /// Change the scale, rounding discarded digits
    pub fn with_scale(&self, new_scale: i64, rounding: Rounding) -> Self {
        let (unscaled, scale) = self.parts();
        if new_scale >= scale {
            Self::new(unscaled * pow10((new_scale - scale) as u64), new_scale)
        } else {
            let divisor = pow10((scale - new_scale) as u64);
            Self::new(div_round(&unscaled, &divisor, rounding), new_scale)
        }
    }

    /// Keep at most `digits` significant digits
    pub fn with_precision(&self, digits: u64, rounding: Rounding) -> Self {
        let (unscaled, scale) = self.parts();
        let significant = digit_count(&unscaled);
        if significant <= digits {
            return self.clone();
        }
        self.with_scale(scale - (significant - digits) as i64, rounding)
    }

    /// Quotient rounded to `scale` fractional digits
    ///
    /// Returns `None` when `other` is zero.
    pub fn div(&self, other: &Self, scale: i64, rounding: Rounding) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let (n, sn) = self.parts();
        let (d, sd) = other.parts();
        let exponent = scale + sd - sn;
        let quotient = if exponent >= 0 {
            div_round(&(n * pow10(exponent as u64)), &d, rounding)
        } else {
            div_round(&n, &(d * pow10(exponent.unsigned_abs())), rounding)
        };
        Some(Self::new(quotient, scale))
    }

    /// Round to an integer and convert to `i128` when it fits
    pub fn to_i128_rounded(&self, rounding: Rounding) -> Option<i128> {
        if self.precision() > 39 {
            return None;
        }
        self.with_scale(0, rounding).unscaled().to_i128()
    }

    pub fn to_f64(&self) -> f64 {
        self.to_plain_string().parse().unwrap_or(f64::NAN)
    }

    pub fn to_f32(&self) -> f32 {
        self.to_plain_string().parse().unwrap_or(f32::NAN)
    }

    /// Decimal value of a finite double, using its shortest round-trip form
    ///
    /// Large magnitudes keep a negative scale; the result is not bounded.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        BigDecimal::from_str(&format!("{value:e}")).ok().map(Self)
    }

    /// Decimal value of a finite float, using its shortest round-trip form
    pub fn from_f32(value: f32) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        BigDecimal::from_str(&format!("{value:e}")).ok().map(Self)
    }

    /// Render without exponent notation, keeping every digit of the scale
    pub fn to_plain_string(&self) -> String {
        let (unscaled, scale) = self.parts();
        let digits = unscaled.abs().to_string();
        let mut out = String::with_capacity(digits.len() + 3);
        if unscaled.is_negative() {
            out.push('-');
        }
        if scale <= 0 {
            out.push_str(&digits);
            out.extend(std::iter::repeat_n('0', scale.unsigned_abs() as usize));
        } else {
            let scale = scale as usize;
            if digits.len() > scale {
                let (int_part, frac_part) = digits.split_at(digits.len() - scale);
                out.push_str(int_part);
                out.push('.');
                out.push_str(frac_part);
            } else {
                out.push_str("0.");
                out.extend(std::iter::repeat_n('0', scale - digits.len()));
                out.push_str(&digits);
            }
        }
        out
    }
}

/// Remove trailing fractional zeros, and the point when nothing follows it
pub fn detach_trailing_zeros(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0');
    trimmed.strip_suffix('.').unwrap_or(trimmed)
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl From<i32> for Numeric {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<i16> for Numeric {
    fn from(value: i16) -> Self {
        Self::from(i64::from(value))
    }
}

// Exact arithmetic: sums keep max(s1, s2) and products s1 + s2 fractional
// digits. Results are not bounded.

impl Add for &Numeric {
    type Output = Numeric;

    fn add(self, other: Self) -> Numeric {
        Numeric(&self.0 + &other.0)
    }
}

impl Sub for &Numeric {
    type Output = Numeric;

    fn sub(self, other: Self) -> Numeric {
        Numeric(&self.0 - &other.0)
    }
}

impl Mul for &Numeric {
    type Output = Numeric;

    fn mul(self, other: Self) -> Numeric {
        Numeric(&self.0 * &other.0)
    }
}

impl Neg for &Numeric {
    type Output = Numeric;

    fn neg(self) -> Numeric {
        Numeric(-self.0.clone())
    }
}

impl FromStr for Numeric {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}
