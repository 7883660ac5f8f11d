// ============================================================================
// Significant-Digit Formatting
// Fixed-notation rendering to an exact number of significant digits
// ============================================================================

use super::decimal::DecimalExt;
use bigdecimal::BigDecimal;
use num_traits::{Signed, Zero};

/// Render with exactly `digits` significant digits in fixed notation.
///
/// Rounding is half away from zero. Positional zeros are padded in
/// (`517.3` at 2 digits is `"520"`), and leading zeros after the point
/// are kept (`0.05` at 1 digit is `"0.05"`).
///
/// With `strip_zeros` the trailing fractional zeros are removed, but the
/// result always keeps a fractional part (`"4.0"`, `"0.05"`). Without it,
/// every significant digit is printed and a number whose significant
/// digits end at the units place has no decimal point (`"517"`).
///
/// Zero renders as `"0.0"` either way.
///
/// # Example
/// ```
/// use measurement::numeric::{parse_decimal, DecimalExt};
///
/// let x = parse_decimal("12").unwrap();
/// assert_eq!(x.to_significant_string(4, false), "12.00");
/// assert_eq!(x.to_significant_string(4, true), "12.0");
/// ```
pub(crate) fn significant_string(x: &BigDecimal, digits: u32, strip_zeros: bool) -> String {
    if x.is_zero() {
        return "0.0".to_string();
    }

    let digits = digits.max(1) as usize;
    let rounded = x.round_significant(digits as u32);
    let adjusted = rounded.adjusted_exponent();

    // A carry may leave one extra (zero) digit behind
    let (mantissa, _) = rounded.as_bigint_and_exponent();
    let mut body = mantissa.magnitude().to_str_radix(10);
    body.truncate(digits);
    if body.len() < digits {
        body.push_str(&"0".repeat(digits - body.len()));
    }

    let (int_part, frac_part) = if adjusted < 0 {
        let leading = "0".repeat((adjusted.unsigned_abs() - 1) as usize);
        ("0".to_string(), format!("{}{}", leading, body))
    } else {
        let split = adjusted as usize + 1;
        if split >= body.len() {
            body.push_str(&"0".repeat(split - body.len()));
            (body, String::new())
        } else {
            let frac = body.split_off(split);
            (body, frac)
        }
    };

    let sign = if rounded.is_negative() { "-" } else { "" };
    if strip_zeros {
        let trimmed = frac_part.trim_end_matches('0');
        let frac = if trimmed.is_empty() { "0" } else { trimmed };
        format!("{}{}.{}", sign, int_part, frac)
    } else if frac_part.is_empty() {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{}", sign, int_part, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::parse_decimal;

    fn sig(s: &str, digits: u32, strip: bool) -> String {
        significant_string(&parse_decimal(s).unwrap(), digits, strip)
    }

    #[test]
    fn test_keeps_trailing_zeros() {
        assert_eq!(sig("12", 4, false), "12.00");
        assert_eq!(sig("12.34", 3, false), "12.3");
        assert_eq!(sig("0.1", 3, false), "0.100");
        assert_eq!(sig("295.15", 3, false), "295");
    }

    #[test]
    fn test_pads_positional_zeros() {
        assert_eq!(sig("517.3", 2, false), "520");
        assert_eq!(sig("123456", 2, false), "120000");
    }

    #[test]
    fn test_small_magnitudes() {
        assert_eq!(sig("0.05", 1, true), "0.05");
        assert_eq!(sig("0.0983", 2, false), "0.098");
        assert_eq!(sig("0.000123", 1, false), "0.0001");
    }

    #[test]
    fn test_strip_zeros() {
        assert_eq!(sig("4", 1, true), "4.0");
        assert_eq!(sig("0.98", 1, true), "1.0");
        assert_eq!(sig("0.1118", 1, true), "0.1");
        assert_eq!(sig("40", 1, true), "40.0");
        assert_eq!(sig("1.04", 2, true), "1.0");
    }

    #[test]
    fn test_rounding_carry() {
        assert_eq!(sig("9.96", 2, false), "10");
        assert_eq!(sig("0.0996", 2, false), "0.10");
        assert_eq!(sig("999.5", 3, false), "1000");
    }

    #[test]
    fn test_unnormalized_input() {
        assert_eq!(sig("10.00", 1, true), "10.0");
        assert_eq!(sig("0.0500", 1, false), "0.05");
        assert_eq!(sig("1.2e3", 4, false), "1200");
    }

    #[test]
    fn test_negative_and_zero() {
        assert_eq!(sig("-12.345", 4, false), "-12.35");
        assert_eq!(sig("-0.1", 1, true), "-0.1");
        assert_eq!(sig("0", 3, false), "0.0");
        assert_eq!(sig("0", 1, true), "0.0");
    }
}
