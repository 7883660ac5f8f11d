// ============================================================================
// Measurement Display
// Significant-figure reporting of "value ± uncertainty"
// ============================================================================

use super::measurement::Measurement;
use crate::numeric::DecimalExt;
use std::fmt;

/// True for digit strings like "1" or "001".
fn is_one(digits: &str) -> bool {
    digits.trim_start_matches('0') == "1"
}

fn is_zero(digits: &str) -> bool {
    digits.bytes().all(|b| b == b'0')
}

impl Measurement {
    /// Rendered value and uncertainty strings.
    ///
    /// 1. The value gets exactly its significant digits, trailing zeros kept.
    /// 2. The uncertainty gets its significant digits with trailing zeros
    ///    stripped.
    /// 3. If that uncertainty reads as a leading 1 (`1.0`, `0.1`, `0.01`, ...),
    ///    it is re-rendered with one more digit and zeros kept.
    /// 4. Otherwise, if it has no fractional part, both value and uncertainty
    ///    print as integers (value rounded half to even).
    pub fn render_parts(&self) -> (String, String) {
        let value_digits = self.value_significant_digits();
        let uncertainty_digits = self.uncertainty_significant_digits();

        let value = self.value().to_significant_string(value_digits, false);
        let stripped = self
            .uncertainty()
            .to_significant_string(uncertainty_digits, true);

        let negative = stripped.starts_with('-');
        let magnitude = stripped.trim_start_matches('-');
        let (whole, frac) = magnitude.split_once('.').unwrap_or((magnitude, "0"));

        let leading_one = (is_one(whole) && is_zero(frac)) || (is_zero(whole) && is_one(frac));
        if leading_one {
            let widened = self
                .uncertainty()
                .to_significant_string(uncertainty_digits + 1, false);
            return (value, widened);
        }

        if is_zero(frac) {
            let rounded = self
                .value()
                .round_significant(value_digits)
                .round_half_even();
            let sign = if negative && !is_zero(whole) { "-" } else { "" };
            return (rounded.to_string(), format!("{}{}", sign, whole));
        }

        (value, stripped)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, uncertainty) = self.render_parts();
        write!(f, "{} ± {}", value, uncertainty)
    }
}
