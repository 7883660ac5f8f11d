// ============================================================================
// Numeric Module
// Arbitrary-precision decimal arithmetic for measurement propagation
// ============================================================================
//
// This module provides:
// - BigDecimal (from the `bigdecimal` crate) with bounded-exponent parsing,
//   conversions and digit queries (DecimalExt)
// - Context: working precision (default 100 significant digits) and the
//   rounded operations built on it (add, div, sqrt, pow, ln, exp)
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - No floating-point operations in the arithmetic path
// - All fallible arithmetic returns Result (no panics)
// - Precision is an explicit value, never process-wide state

mod context;
mod decimal;
mod errors;
mod format;
mod ops;

pub use bigdecimal::BigDecimal;
pub use context::{Context, DEFAULT_GUARD_DIGITS, DEFAULT_PRECISION};
pub use decimal::{
    decimal_from_f64, decimal_from_rust_decimal, parse_decimal, DecimalExt, MAX_EXPONENT,
};
pub use errors::{NumericError, NumericResult};
