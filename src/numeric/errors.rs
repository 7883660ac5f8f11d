// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision decimal arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur during arbitrary-precision decimal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Attempted division by zero
    DivisionByZero,
    /// Argument outside the domain of the function (sqrt/ln of a negative)
    InvalidDomain,
    /// Input string or value is invalid
    InvalidInput,
    /// NaN or infinite floating-point input
    NonFinite,
    /// Value does not fit the requested target type
    Overflow,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Context precision out of range
    InvalidPrecision,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidDomain => {
                write!(f, "invalid domain: argument outside the function's domain")
            },
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::NonFinite => write!(f, "non-finite input: NaN or infinity"),
            NumericError::Overflow => {
                write!(f, "overflow: value does not fit the target type")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidPrecision => {
                write!(f, "invalid precision: must be at least one digit")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
