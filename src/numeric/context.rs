// ============================================================================
// Numeric Context
// Working precision for arbitrary-precision arithmetic
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::errors::{NumericError, NumericResult};

/// Default number of significant digits kept by every rounded operation.
pub const DEFAULT_PRECISION: u32 = 100;

/// Default extra digits carried inside series evaluations (ln, exp).
pub const DEFAULT_GUARD_DIGITS: u32 = 10;

/// Arithmetic context: how many significant digits results are rounded to.
///
/// The context is a plain value passed to (or carried alongside) every
/// operation, so two computations with different precisions never interfere.
///
/// # Example
/// ```
/// use measurement::numeric::Context;
///
/// let ctx = Context::new(50).unwrap().with_guard_digits(20);
/// assert_eq!(ctx.precision(), 50);
/// assert!(ctx.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Context {
    /// Significant digits kept after each rounded operation
    precision: u32,

    /// Extra digits used internally by transcendental functions
    guard_digits: u32,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            guard_digits: DEFAULT_GUARD_DIGITS,
        }
    }
}

impl Context {
    /// Create a context with the given precision and default guard digits.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` if `precision` is zero.
    pub fn new(precision: u32) -> NumericResult<Self> {
        let ctx = Self {
            precision,
            ..Self::default()
        };
        ctx.validate().map_err(|_| NumericError::InvalidPrecision)?;
        Ok(ctx)
    }

    /// Builder method: set guard digits (clamped to at least one)
    pub fn with_guard_digits(mut self, guard_digits: u32) -> Self {
        self.guard_digits = guard_digits.max(1);
        self
    }

    /// Significant digits kept by rounded operations
    #[inline]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Extra digits used by series evaluations
    #[inline]
    pub const fn guard_digits(&self) -> u32 {
        self.guard_digits
    }

    /// Context with `extra` more digits of precision, for intermediate steps.
    pub(crate) fn widened(&self, extra: u32) -> Self {
        Self {
            precision: self.precision.saturating_add(extra),
            guard_digits: self.guard_digits,
        }
    }

    /// The more precise of two contexts.
    pub fn max(self, other: Self) -> Self {
        if other.precision > self.precision
            || (other.precision == self.precision && other.guard_digits > self.guard_digits)
        {
            other
        } else {
            self
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.precision == 0 {
            return Err("Precision must be at least one significant digit".to_string());
        }
        if self.guard_digits == 0 {
            return Err("Guard digits must be at least one".to_string());
        }
        Ok(())
    }
}
