// ============================================================================
// Operands
// Closed set of things an operator can combine: measurements and scalars
// ============================================================================

use super::errors::{MeasurementError, MeasurementResult};
use super::measurement::Measurement;
use crate::numeric::{decimal_from_f64, decimal_from_rust_decimal, BigDecimal};
use std::fmt;

/// Binary operators supported on measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Power with a scalar exponent
    Pow,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        };
        f.write_str(symbol)
    }
}

/// Tag of an operand, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Measurement,
    Scalar,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandKind::Measurement => f.write_str("measurement"),
            OperandKind::Scalar => f.write_str("scalar"),
        }
    }
}

/// Operand of a measurement operator.
///
/// A scalar is a dimensionless exact number with no uncertainty.
#[derive(Debug, Clone)]
pub enum Operand {
    Measurement(Measurement),
    Scalar(BigDecimal),
}

/// Borrowed view of an [`Operand`].
#[derive(Debug, Clone, Copy)]
pub enum OperandRef<'a> {
    Measurement(&'a Measurement),
    Scalar(&'a BigDecimal),
}

impl Operand {
    /// Borrow as an [`OperandRef`]
    pub fn view(&self) -> OperandRef<'_> {
        match self {
            Operand::Measurement(m) => OperandRef::Measurement(m),
            Operand::Scalar(k) => OperandRef::Scalar(k),
        }
    }

    /// Kind tag
    pub fn kind(&self) -> OperandKind {
        self.view().kind()
    }
}

impl OperandRef<'_> {
    /// Kind tag
    pub fn kind(&self) -> OperandKind {
        match self {
            OperandRef::Measurement(_) => OperandKind::Measurement,
            OperandRef::Scalar(_) => OperandKind::Scalar,
        }
    }
}

// ============================================================================
// Conversion into operands
// ============================================================================

/// Anything usable as the other side of a measurement operator.
///
/// Conversion is fallible because floating-point scalars may be NaN or
/// infinite.
pub trait IntoOperand {
    fn into_operand(self) -> MeasurementResult<Operand>;
}

impl IntoOperand for Operand {
    #[inline]
    fn into_operand(self) -> MeasurementResult<Operand> {
        Ok(self)
    }
}

impl IntoOperand for Measurement {
    #[inline]
    fn into_operand(self) -> MeasurementResult<Operand> {
        Ok(Operand::Measurement(self))
    }
}

impl IntoOperand for &Measurement {
    #[inline]
    fn into_operand(self) -> MeasurementResult<Operand> {
        Ok(Operand::Measurement(self.clone()))
    }
}

impl IntoOperand for BigDecimal {
    #[inline]
    fn into_operand(self) -> MeasurementResult<Operand> {
        Ok(Operand::Scalar(self))
    }
}

impl IntoOperand for &BigDecimal {
    #[inline]
    fn into_operand(self) -> MeasurementResult<Operand> {
        Ok(Operand::Scalar(self.clone()))
    }
}

impl IntoOperand for rust_decimal::Decimal {
    #[inline]
    fn into_operand(self) -> MeasurementResult<Operand> {
        Ok(Operand::Scalar(decimal_from_rust_decimal(self)))
    }
}

impl IntoOperand for f64 {
    fn into_operand(self) -> MeasurementResult<Operand> {
        Ok(Operand::Scalar(decimal_from_f64(self)?))
    }
}

macro_rules! impl_into_operand_integer {
    ($($t:ty),*) => {
        $(
            impl IntoOperand for $t {
                #[inline]
                fn into_operand(self) -> MeasurementResult<Operand> {
                    Ok(Operand::Scalar(BigDecimal::from(self)))
                }
            }
        )*
    };
}

impl_into_operand_integer!(i32, i64, u32, u64);

impl IntoOperand for usize {
    #[inline]
    fn into_operand(self) -> MeasurementResult<Operand> {
        Ok(Operand::Scalar(BigDecimal::from(self as u64)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{parse_decimal, NumericError};

    #[test]
    fn test_scalar_conversion() {
        let op = 3i64.into_operand().unwrap();
        assert_eq!(op.kind(), OperandKind::Scalar);

        let op = rust_decimal::Decimal::new(125, 2).into_operand().unwrap();
        match op {
            Operand::Scalar(k) => assert_eq!(k, parse_decimal("1.25").unwrap()),
            Operand::Measurement(_) => panic!("expected scalar"),
        }

        let op = 0.5f64.into_operand().unwrap();
        match op {
            Operand::Scalar(k) => assert_eq!(k, parse_decimal("0.5").unwrap()),
            Operand::Measurement(_) => panic!("expected scalar"),
        }
    }

    #[test]
    fn test_non_finite_scalar_rejected() {
        assert_eq!(
            f64::NAN.into_operand().unwrap_err(),
            MeasurementError::Numeric(NumericError::NonFinite)
        );
    }

    #[test]
    fn test_measurement_conversion() {
        let m = Measurement::from_decimals("1.0", "0.1", 1).unwrap();
        assert_eq!((&m).into_operand().unwrap().kind(), OperandKind::Measurement);
    }

    #[test]
    fn test_op_symbols() {
        assert_eq!(BinaryOp::Add.to_string(), "+");
        assert_eq!(BinaryOp::Pow.to_string(), "**");
    }
}
