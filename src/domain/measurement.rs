// ============================================================================
// Measurement Domain Model
// ============================================================================

use super::errors::{MeasurementError, MeasurementResult};
use super::precision::{Precision, DEFAULT_UNCERTAINTY_DIGITS};
use crate::numeric::{parse_decimal, BigDecimal, Context};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A measured value with its uncertainty and display precision.
///
/// Immutable: every operator returns a new `Measurement`. The uncertainty is
/// stored exactly as supplied (sign included); propagation formulas use its
/// magnitude.
///
/// # Example
/// ```
/// use measurement::Measurement;
///
/// let a = Measurement::from_decimals("10.00", "0.05", 2).unwrap();
/// let b = Measurement::from_decimals("2.0", "0.1", 1).unwrap();
/// let sum = (&a + &b).unwrap();
/// assert_eq!(sum.value_decimals(), 1);
/// assert_eq!(sum.to_string(), "12.0 ± 0.11");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Central estimate
    value: BigDecimal,

    /// Uncertainty (one standard deviation)
    uncertainty: BigDecimal,

    /// Display precision of the value
    precision: Precision,

    /// Significant digits used to display the uncertainty
    uncertainty_digits: u32,

    /// Working precision for arithmetic on this measurement
    context: Context,
}

impl Measurement {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Start building a measurement from numeric literals.
    ///
    /// # Errors
    /// - `Numeric(InvalidInput)` if either literal fails to parse
    /// - `Numeric(Overflow)` if an exponent lies outside the supported range
    pub fn builder(value: &str, uncertainty: &str) -> MeasurementResult<MeasurementBuilder> {
        let value = parse_decimal(value)?;
        let uncertainty = parse_decimal(uncertainty)?;
        Ok(MeasurementBuilder::new(value, uncertainty))
    }

    /// Measurement whose value is known to `decimals` decimal places.
    ///
    /// # Errors
    /// Returns `Numeric(InvalidInput)` for unparsable literals.
    pub fn from_decimals(value: &str, uncertainty: &str, decimals: u32) -> MeasurementResult<Self> {
        Self::builder(value, uncertainty)?.decimals(decimals).build()
    }

    /// Measurement whose value is known to `digits` significant digits.
    ///
    /// # Errors
    /// - `InvalidPrecision` if `digits` is zero
    /// - `Numeric(InvalidInput)` for unparsable literals
    pub fn from_significant_digits(
        value: &str,
        uncertainty: &str,
        digits: u32,
    ) -> MeasurementResult<Self> {
        Self::builder(value, uncertainty)?
            .significant_digits(digits)
            .build()
    }

    /// Assemble an arithmetic result. Results reset the uncertainty digits
    /// to the default, like any freshly constructed measurement.
    pub(crate) fn assemble(
        value: BigDecimal,
        uncertainty: BigDecimal,
        precision: Precision,
        context: Context,
    ) -> Self {
        Self {
            value,
            uncertainty,
            precision,
            uncertainty_digits: DEFAULT_UNCERTAINTY_DIGITS,
            context,
        }
    }

    /// Copy with a different value; uncertainty and precision unchanged.
    pub(crate) fn with_value(&self, value: BigDecimal) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Central value
    #[inline]
    pub fn value(&self) -> &BigDecimal {
        &self.value
    }

    /// Uncertainty as supplied or propagated
    #[inline]
    pub fn uncertainty(&self) -> &BigDecimal {
        &self.uncertainty
    }

    /// Display precision of the value
    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Digits right of the decimal point used for the value
    #[inline]
    pub fn value_decimals(&self) -> u32 {
        self.precision.decimals()
    }

    /// Significant digits used for the value
    #[inline]
    pub fn value_significant_digits(&self) -> u32 {
        self.precision.significant_digits()
    }

    /// Significant digits used for the uncertainty
    #[inline]
    pub fn uncertainty_significant_digits(&self) -> u32 {
        self.uncertainty_digits
    }

    /// Working arithmetic context
    #[inline]
    pub fn context(&self) -> Context {
        self.context
    }

    /// `|uncertainty / value|`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when the value is zero.
    pub fn relative_uncertainty(&self) -> MeasurementResult<BigDecimal> {
        let ratio = self.context.div(&self.uncertainty, &self.value)?;
        Ok(ratio.abs())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Measurement`] with optional precision fields.
///
/// At least one of [`decimals`](Self::decimals) or
/// [`significant_digits`](Self::significant_digits) must be set. When both
/// are, the significant-digit count wins and decimals are re-derived.
#[derive(Debug, Clone)]
pub struct MeasurementBuilder {
    value: BigDecimal,
    uncertainty: BigDecimal,
    decimals: Option<u32>,
    significant_digits: Option<u32>,
    uncertainty_digits: Option<u32>,
    context: Context,
}

impl MeasurementBuilder {
    /// Builder over already-parsed numbers
    pub fn new(value: BigDecimal, uncertainty: BigDecimal) -> Self {
        Self {
            value,
            uncertainty,
            decimals: None,
            significant_digits: None,
            uncertainty_digits: None,
            context: Context::default(),
        }
    }

    /// Builder method: digits right of the decimal point
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Builder method: significant digits of the value
    pub fn significant_digits(mut self, digits: u32) -> Self {
        self.significant_digits = Some(digits);
        self
    }

    /// Builder method: significant digits of the uncertainty (default 1)
    pub fn uncertainty_digits(mut self, digits: u32) -> Self {
        self.uncertainty_digits = Some(digits);
        self
    }

    /// Builder method: arithmetic context (default 100 digits)
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// - `PrecisionUnspecified` if neither decimals nor significant digits were set
    /// - `InvalidPrecision` if a significant-digit count is zero
    pub fn build(self) -> MeasurementResult<Measurement> {
        if self.decimals.is_none() && self.significant_digits.is_none() {
            tracing::debug!(value = %self.value, "measurement rejected: no precision given");
            return Err(MeasurementError::PrecisionUnspecified);
        }
        if self.significant_digits == Some(0) || self.uncertainty_digits == Some(0) {
            return Err(MeasurementError::InvalidPrecision);
        }

        let value = self.context.round(&self.value);
        let uncertainty = self.context.round(&self.uncertainty);

        let precision = match (self.significant_digits, self.decimals) {
            (Some(digits), _) => Precision::from_significant_digits(&value, digits),
            (None, Some(decimals)) => Precision::from_decimals(&value, decimals),
            (None, None) => return Err(MeasurementError::PrecisionUnspecified),
        };

        Ok(Measurement {
            value,
            uncertainty,
            precision,
            uncertainty_digits: self.uncertainty_digits.unwrap_or(DEFAULT_UNCERTAINTY_DIGITS),
            context: self.context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericError;

    fn dec(s: &str) -> BigDecimal {
        parse_decimal(s).unwrap()
    }

    #[test]
    fn test_from_decimals() {
        let m = Measurement::from_decimals("10.00", "0.05", 2).unwrap();
        assert_eq!(m.value(), &dec("10"));
        assert_eq!(m.uncertainty(), &dec("0.05"));
        assert_eq!(m.value_decimals(), 2);
        assert_eq!(m.value_significant_digits(), 4);
        assert_eq!(m.uncertainty_significant_digits(), 1);
    }

    #[test]
    fn test_from_zero_decimals() {
        let m = Measurement::from_decimals("295.15", "1", 0).unwrap();
        assert_eq!(m.value_significant_digits(), 3);
        assert_eq!(m.value_decimals(), 0);
    }

    #[test]
    fn test_from_significant_digits() {
        let m = Measurement::from_significant_digits("0.514", "0.005", 3).unwrap();
        assert_eq!(m.value_significant_digits(), 3);
        assert_eq!(m.value_decimals(), 2);

        // written with or without a point, the value gets the same decimals
        let m = Measurement::from_significant_digits("517", "4", 5).unwrap();
        assert_eq!(m.value_decimals(), 2);

        let m = Measurement::from_significant_digits("517.0", "4", 5).unwrap();
        assert_eq!(m.value_decimals(), 2);

        let m = Measurement::from_significant_digits("5e2", "4", 4).unwrap();
        assert_eq!(m.value_decimals(), 1);
    }

    #[test]
    fn test_integer_literal_keeps_decimals_through_sum() {
        let a = Measurement::from_significant_digits("517", "0.4", 5).unwrap();
        assert_eq!(a.value_decimals(), 2);

        let b = Measurement::from_decimals("2.0", "0.1", 1).unwrap();
        let sum = (&a + &b).unwrap();
        assert_eq!(sum.value_decimals(), 1);
        assert_eq!(sum.to_string(), "519.0 ± 0.4");
    }

    #[test]
    fn test_out_of_range_exponent() {
        assert_eq!(
            Measurement::from_decimals("10e9223372036854775807", "1", 1).unwrap_err(),
            MeasurementError::Numeric(NumericError::Overflow)
        );
        assert_eq!(
            Measurement::from_decimals("1.0", "1e-9223372036854775808", 1).unwrap_err(),
            MeasurementError::Numeric(NumericError::Overflow)
        );
    }

    #[test]
    fn test_extreme_exponents_construct() {
        let tiny = Measurement::from_decimals("1e-1000000000000", "1", 2).unwrap();
        assert_eq!(tiny.value_significant_digits(), 3);

        let huge = Measurement::from_significant_digits("1e1000000000000", "1", 3).unwrap();
        assert_eq!(huge.value_decimals(), 0);
        assert_eq!(huge.value_significant_digits(), 3);
    }

    #[test]
    fn test_significant_digits_take_precedence() {
        let m = Measurement::builder("12.345", "0.01")
            .unwrap()
            .decimals(3)
            .significant_digits(3)
            .build()
            .unwrap();
        assert_eq!(m.value_significant_digits(), 3);
        assert_eq!(m.value_decimals(), 1);
    }

    #[test]
    fn test_precision_unspecified() {
        let result = Measurement::builder("1.0", "0.1").unwrap().build();
        assert_eq!(result.unwrap_err(), MeasurementError::PrecisionUnspecified);
    }

    #[test]
    fn test_invalid_precision() {
        assert_eq!(
            Measurement::from_significant_digits("1.0", "0.1", 0).unwrap_err(),
            MeasurementError::InvalidPrecision
        );
        let result = Measurement::builder("1.0", "0.1")
            .unwrap()
            .decimals(1)
            .uncertainty_digits(0)
            .build();
        assert_eq!(result.unwrap_err(), MeasurementError::InvalidPrecision);
    }

    #[test]
    fn test_invalid_literal() {
        assert!(matches!(
            Measurement::from_decimals("abc", "0.1", 1),
            Err(MeasurementError::Numeric(_))
        ));
        assert!(Measurement::from_decimals("1.0", "", 1).is_err());
    }

    #[test]
    fn test_negative_uncertainty_preserved() {
        let m = Measurement::from_decimals("3.0", "-0.2", 1).unwrap();
        assert_eq!(m.uncertainty(), &dec("-0.2"));
    }

    #[test]
    fn test_context_rounds_inputs() {
        let ctx = Context::new(3).unwrap();
        let m = Measurement::builder("1.23456", "0.0012345")
            .unwrap()
            .significant_digits(3)
            .context(ctx)
            .build()
            .unwrap();
        assert_eq!(m.value(), &dec("1.23"));
        assert_eq!(m.uncertainty(), &dec("0.00123"));
        assert_eq!(m.context(), ctx);
    }

    #[test]
    fn test_relative_uncertainty() {
        let m = Measurement::from_decimals("4.0", "0.2", 1).unwrap();
        assert_eq!(m.relative_uncertainty().unwrap(), dec("0.05"));

        let zero = Measurement::from_decimals("0.0", "0.2", 1).unwrap();
        assert_eq!(
            zero.relative_uncertainty().unwrap_err(),
            MeasurementError::DivisionByZero
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let m = Measurement::from_significant_digits("0.514", "0.005", 3).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"0.514\""));

        let back: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value(), m.value());
        assert_eq!(back.uncertainty(), m.uncertainty());
        assert_eq!(back.precision(), m.precision());
        assert_eq!(back.to_string(), m.to_string());
    }
}
