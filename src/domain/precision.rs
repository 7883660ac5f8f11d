// ============================================================================
// Display Precision
// Decimal-place / significant-digit bookkeeping for a measured value
// ============================================================================

use crate::numeric::{BigDecimal, DecimalExt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default significant digits used to display an uncertainty.
pub const DEFAULT_UNCERTAINTY_DIGITS: u32 = 1;

/// Display precision of a measured value.
///
/// Both views are always populated: whichever one was supplied, the other is
/// derived from the value's integer part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Precision {
    /// Digits right of the decimal point
    decimals: u32,

    /// Significant digits
    significant_digits: u32,
}

impl Precision {
    /// Precision from a known number of decimal places.
    ///
    /// With zero decimals the significant digits are the digit count of the
    /// floored value; otherwise integer-part digits plus `decimals`.
    pub fn from_decimals(value: &BigDecimal, decimals: u32) -> Self {
        let significant_digits = if decimals == 0 {
            value.floor_digits()
        } else {
            value.integer_digits().saturating_add(decimals)
        };
        Self {
            decimals,
            significant_digits,
        }
    }

    /// Precision from a known number of significant digits.
    ///
    /// Decimals are whatever the significant digits leave after the integer
    /// part, so `517` at five significant digits carries two decimals.
    pub fn from_significant_digits(value: &BigDecimal, significant_digits: u32) -> Self {
        let decimals = significant_digits.saturating_sub(value.integer_digits());
        Self {
            decimals,
            significant_digits,
        }
    }

    /// Digits right of the decimal point
    #[inline]
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Significant digits
    #[inline]
    pub const fn significant_digits(&self) -> u32 {
        self.significant_digits
    }
}
