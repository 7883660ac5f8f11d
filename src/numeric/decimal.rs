// ============================================================================
// Decimal Helpers
// Checked parsing, conversions and digit queries on `bigdecimal::BigDecimal`
// ============================================================================

use super::errors::{NumericError, NumericResult};
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use std::num::IntErrorKind;

/// Largest decimal exponent (and scale) magnitude accepted by the crate.
///
/// The product of two in-range values still has an `i64` scale, so every
/// operation can reject an out-of-range result instead of overflowing.
pub const MAX_EXPONENT: i64 = i64::MAX / 4;

/// Compute 10^n as a big integer
pub(crate) fn pow10(n: u32) -> BigInt {
    BigInt::from(10u32).pow(n)
}

/// Number of decimal digits in `|n|` (zero has one digit).
pub(crate) fn digit_count(n: &BigInt) -> u64 {
    n.magnitude().to_str_radix(10).len() as u64
}

/// Reject values whose scale left the supported exponent range.
pub(crate) fn check_range(x: BigDecimal) -> NumericResult<BigDecimal> {
    let (_, scale) = x.as_bigint_and_exponent();
    if scale.unsigned_abs() > MAX_EXPONENT as u64 {
        return Err(NumericError::Overflow);
    }
    Ok(x)
}

/// Digits of `|x|` and the exponent of its leading digit.
fn magnitude_digits(x: &BigDecimal) -> (String, i64) {
    let (mantissa, scale) = x.as_bigint_and_exponent();
    let body = mantissa.magnitude().to_str_radix(10);
    let adjusted = body.len() as i64 - 1 - scale;
    (body, adjusted)
}

// ============================================================================
// Construction
// ============================================================================

/// Parse a decimal literal (`"12.30"`, `"-0.001"`, `"6.022e23"`).
///
/// # Errors
/// - `InvalidInput` for anything that is not a decimal literal
/// - `Overflow` if the exponent lies outside [`MAX_EXPONENT`]
///
/// # Example
/// ```
/// use measurement::numeric::{parse_decimal, NumericError};
///
/// let x = parse_decimal("123.4500").unwrap();
/// assert_eq!(x, parse_decimal("123.45").unwrap());
/// assert_eq!(parse_decimal("1e9223372036854775807"), Err(NumericError::Overflow));
/// ```
pub fn parse_decimal(text: &str) -> NumericResult<BigDecimal> {
    let text = text.trim();

    if let Some(pos) = text.find(['e', 'E']) {
        let exponent: i64 = text[pos + 1..].parse().map_err(|e: std::num::ParseIntError| {
            match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NumericError::Overflow,
                _ => NumericError::InvalidInput,
            }
        })?;
        if exponent.unsigned_abs() > MAX_EXPONENT as u64 {
            return Err(NumericError::Overflow);
        }
    }

    let value: BigDecimal = text.parse().map_err(|_| NumericError::InvalidInput)?;
    check_range(value)
}

/// Convert through the shortest decimal text that round-trips the float,
/// so `0.1_f64` becomes exactly `0.1`.
///
/// # Errors
/// Returns `NonFinite` for NaN and infinities.
pub fn decimal_from_f64(value: f64) -> NumericResult<BigDecimal> {
    if !value.is_finite() {
        return Err(NumericError::NonFinite);
    }
    parse_decimal(&format!("{:e}", value))
}

/// Exact conversion from `rust_decimal::Decimal`.
pub fn decimal_from_rust_decimal(d: rust_decimal::Decimal) -> BigDecimal {
    BigDecimal::new(BigInt::from(d.mantissa()), i64::from(d.scale()))
}

// ============================================================================
// Digit Queries
// ============================================================================

/// Digit queries and rounding used by precision bookkeeping and rendering.
pub trait DecimalExt {
    /// Exponent of the leading significant digit (`123.4` → 2, `0.05` → -2).
    ///
    /// Zero reports 0.
    fn adjusted_exponent(&self) -> i64;

    /// Digit count of the integer part (`0.5` → 1, `-123.4` → 3).
    fn integer_digits(&self) -> u32;

    /// Digit count of the floored value (`9.9` → 1, `-9.5` → 2).
    fn floor_digits(&self) -> u32;

    /// Significant digits actually held, trailing zeros excluded.
    fn precision_digits(&self) -> u64;

    /// Round to `digits` significant digits, half away from zero.
    fn round_significant(&self, digits: u32) -> BigDecimal;

    /// Round to the nearest integer, ties to even.
    fn round_half_even(&self) -> BigInt;

    /// The value as `i64` if it is an integer in range.
    fn to_exact_i64(&self) -> Option<i64>;

    /// Render with exactly `digits` significant digits in fixed notation.
    fn to_significant_string(&self, digits: u32, strip_zeros: bool) -> String;

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// - `PrecisionLoss` if more than 28 fractional digits are present
    /// - `Overflow` if the value exceeds 96 bits of mantissa
    fn to_rust_decimal(&self) -> NumericResult<rust_decimal::Decimal>;
}

impl DecimalExt for BigDecimal {
    fn adjusted_exponent(&self) -> i64 {
        if self.is_zero() {
            return 0;
        }
        magnitude_digits(self).1
    }

    fn integer_digits(&self) -> u32 {
        let adjusted = self.adjusted_exponent();
        if adjusted < 0 {
            1
        } else {
            u32::try_from(adjusted + 1).unwrap_or(u32::MAX)
        }
    }

    fn floor_digits(&self) -> u32 {
        if !self.is_negative() {
            return self.integer_digits();
        }

        let (body, adjusted) = magnitude_digits(self);
        if adjusted < 0 {
            // -1 < x < 0 floors to -1
            return 1;
        }

        // floor(x) = -(trunc|x| + 1) when |x| has a fraction
        let split = usize::try_from(adjusted + 1).unwrap_or(usize::MAX);
        let has_fraction = body.len() > split && body[split..].bytes().any(|b| b != b'0');
        let all_nines = body.len() >= split && body[..split].bytes().all(|b| b == b'9');

        let digits = self.integer_digits();
        if has_fraction && all_nines {
            digits.saturating_add(1)
        } else {
            digits
        }
    }

    fn precision_digits(&self) -> u64 {
        let (mantissa, _) = self.normalized().as_bigint_and_exponent();
        digit_count(&mantissa)
    }

    fn round_significant(&self, digits: u32) -> BigDecimal {
        let (mantissa, scale) = self.as_bigint_and_exponent();
        let have = digit_count(&mantissa);
        let digits = u64::from(digits.max(1));
        if mantissa.is_zero() || have <= digits {
            return self.clone();
        }
        let drop = (have - digits) as i64;
        self.with_scale_round(scale - drop, RoundingMode::HalfUp)
    }

    fn round_half_even(&self) -> BigInt {
        let (mantissa, scale) = self.as_bigint_and_exponent();
        if scale > 0 {
            let (rounded, _) = self
                .with_scale_round(0, RoundingMode::HalfEven)
                .as_bigint_and_exponent();
            return rounded;
        }
        // Already an integer; positional zeros must be written out
        mantissa * pow10(u32::try_from(-scale).unwrap_or(u32::MAX))
    }

    fn to_exact_i64(&self) -> Option<i64> {
        if self.is_zero() {
            return Some(0);
        }
        let (body, adjusted) = magnitude_digits(self);
        if !(0..=18).contains(&adjusted) {
            return None;
        }

        let split = adjusted as usize + 1;
        if body.len() > split && body[split..].bytes().any(|b| b != b'0') {
            return None;
        }
        let whole = if body.len() >= split {
            body[..split].to_string()
        } else {
            format!("{}{}", body, "0".repeat(split - body.len()))
        };

        let magnitude: i64 = whole.parse().ok()?;
        Some(if self.is_negative() { -magnitude } else { magnitude })
    }

    fn to_significant_string(&self, digits: u32, strip_zeros: bool) -> String {
        super::format::significant_string(self, digits, strip_zeros)
    }

    fn to_rust_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let (mut mantissa, scale) = self.normalized().as_bigint_and_exponent();
        if scale > 28 {
            return Err(NumericError::PrecisionLoss);
        }
        let scale = if scale < 0 {
            if scale < -28 {
                return Err(NumericError::Overflow);
            }
            mantissa *= pow10(scale.unsigned_abs() as u32);
            0
        } else {
            scale as u32
        };

        let raw = mantissa.to_i128().ok_or(NumericError::Overflow)?;
        rust_decimal::Decimal::try_from_i128_with_scale(raw, scale)
            .map_err(|_| NumericError::Overflow)
    }
}
