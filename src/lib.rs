// ============================================================================
// Measurement Library
// Physical measurements with uncertainty propagation and significant figures
// ============================================================================

//! # Measurement
//!
//! A value type for physical measurements: an arbitrary-precision value and
//! its uncertainty, combined with first-order error propagation and rendered
//! with significant-figure rules.
//!
//! ## Features
//!
//! - **Arbitrary precision**: 100 significant digits by default, configured
//!   through an explicit [`numeric::Context`] rather than global state
//! - **Uncertainty propagation**: quadrature for sums/differences, relative
//!   quadrature for products/quotients, derivative rule for powers
//! - **Dual precision bookkeeping**: decimal places and significant digits are
//!   both derived, whichever one is supplied
//! - **Significant-figure rendering**: trailing zeros preserved, extra digit
//!   for uncertainties with a leading 1, integer form for coarse uncertainties
//!
//! ## Example
//!
//! ```rust
//! use measurement::prelude::*;
//!
//! // Tube length as a difference of two readings
//! let top = Measurement::from_significant_digits("0.514", "0.005", 3).unwrap();
//! let bottom = Measurement::from_significant_digits("0.023", "0.005", 3).unwrap();
//! let length = (&top - &bottom).unwrap();
//!
//! // First resonance at 517 Hz: c = 2 f L
//! let frequency = Measurement::from_decimals("517", "4", 0).unwrap();
//! let velocity = ((2_i64 * &frequency).unwrap() * &length).unwrap();
//!
//! println!("c = {} m/s", velocity);
//! assert_eq!(velocity.to_string(), "508 ± 8");
//! ```

pub mod domain;
pub mod numeric;

pub use domain::{Measurement, MeasurementError, MeasurementResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        evaluate, BinaryOp, IntoOperand, Measurement, MeasurementBuilder, MeasurementError,
        MeasurementResult, Operand, OperandKind, Precision,
    };
    pub use crate::numeric::{parse_decimal, BigDecimal, Context, DecimalExt, NumericError};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;

    fn dec(s: &str) -> BigDecimal {
        parse_decimal(s).unwrap()
    }

    #[test]
    fn test_decimal_sum_scenario() {
        let a = Measurement::from_decimals("10.00", "0.05", 2).unwrap();
        let b = Measurement::from_decimals("2.0", "0.1", 1).unwrap();
        let c = (&a + &b).unwrap();

        assert_eq!(c.value(), &dec("12"));
        assert_eq!(c.value_decimals(), 1);
        let u = c.uncertainty().to_significant_string(4, false);
        assert_eq!(u, "0.1118");
        assert_eq!(c.to_string(), "12.0 ± 0.11");
    }

    #[test]
    fn test_sound_velocity_chain() {
        let top = Measurement::from_significant_digits("0.514", "0.005", 3).unwrap();
        let bottom = Measurement::from_significant_digits("0.023", "0.005", 3).unwrap();
        let length = (&top - &bottom).unwrap();
        assert_eq!(length.value(), &dec("0.491"));
        assert_eq!(length.value_decimals(), 2);
        assert_eq!(length.value_significant_digits(), 3);

        let frequency = Measurement::from_decimals("517", "4", 0).unwrap();
        let velocity = ((2_i64 * &frequency).unwrap() * &length).unwrap();
        assert_eq!(velocity.value(), &dec("507.694"));
        assert_eq!(velocity.value_significant_digits(), 3);
        assert_eq!(velocity.to_string(), "508 ± 8");
    }

    #[test]
    fn test_heat_capacity_ratio_chain() {
        let temperature = (Measurement::from_decimals("22", "1", 0).unwrap() + dec("273.15")).unwrap();
        let velocity = Measurement::from_significant_digits("343.2", "2.1", 4).unwrap();
        let molar_mass = dec("0.02897");
        let r = dec("8.31446261815324");

        let squared = velocity.checked_pow(2).unwrap();
        let numerator = (&molar_mass * &squared).unwrap();
        let denominator = (&temperature * &r).unwrap();
        let gamma = (&numerator / &denominator).unwrap();

        assert_eq!(gamma.value_significant_digits(), 3);
        assert!(gamma > 1.3 && gamma < 1.4);
    }

    #[test]
    fn test_error_surface() {
        let err = Measurement::builder("1.0", "0.1").unwrap().build().unwrap_err();
        assert_eq!(err, MeasurementError::PrecisionUnspecified);

        let m = Measurement::from_decimals("1.0", "0.1", 1).unwrap();
        assert!(matches!(
            m.checked_pow(&m),
            Err(MeasurementError::UnsupportedOperand { .. })
        ));
        assert_eq!((&m / 0_i64).unwrap_err(), MeasurementError::DivisionByZero);
    }
}
