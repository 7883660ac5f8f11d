// ============================================================================
// Measurement Errors
// ============================================================================

use super::operand::{BinaryOp, OperandKind};
use crate::numeric::NumericError;
use std::fmt;

/// Errors raised while constructing or combining measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementError {
    /// Neither decimal places nor significant digits were supplied
    PrecisionUnspecified,
    /// A significant-digit count of zero was supplied
    InvalidPrecision,
    /// Operator applied to an operand pairing it does not support
    UnsupportedOperand {
        op: BinaryOp,
        lhs: OperandKind,
        rhs: OperandKind,
    },
    /// Division by zero, including relative errors of zero-valued operands
    DivisionByZero,
    /// Propagation formula evaluated outside its domain
    InvalidDomain,
    /// Aggregate over an empty collection
    EmptyInput,
    /// Any other numeric failure (parse errors, non-finite scalars)
    Numeric(NumericError),
}

impl fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementError::PrecisionUnspecified => write!(
                f,
                "precision unspecified: neither decimal places nor significant digits were set"
            ),
            MeasurementError::InvalidPrecision => {
                write!(f, "invalid precision: significant digits must be positive")
            },
            MeasurementError::UnsupportedOperand { op, lhs, rhs } => {
                write!(f, "unsupported operand kinds for {}: {} and {}", op, lhs, rhs)
            },
            MeasurementError::DivisionByZero => write!(f, "division by zero"),
            MeasurementError::InvalidDomain => {
                write!(f, "invalid domain in uncertainty propagation")
            },
            MeasurementError::EmptyInput => write!(f, "empty input: nothing to aggregate"),
            MeasurementError::Numeric(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MeasurementError {}

impl From<NumericError> for MeasurementError {
    fn from(e: NumericError) -> Self {
        match e {
            NumericError::DivisionByZero => MeasurementError::DivisionByZero,
            NumericError::InvalidDomain => MeasurementError::InvalidDomain,
            NumericError::InvalidPrecision => MeasurementError::InvalidPrecision,
            other => MeasurementError::Numeric(other),
        }
    }
}

/// Result type alias for measurement operations
pub type MeasurementResult<T> = Result<T, MeasurementError>;
