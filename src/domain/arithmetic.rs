// ============================================================================
// Measurement Arithmetic
// First-order uncertainty propagation for +, -, *, / and powers
// ============================================================================
//
// Propagation rules (errors assumed independent, no covariance terms):
// - a ± b:  u = sqrt(ua² + ub²),               decimals = min(da, db)
// - a * b, a / b:  u = |result| · sqrt((ua/va)² + (ub/vb)²),
//                                              significant digits = min(sa, sb)
// - scalar k:  a ± k keeps ua; a·k gives |k|·ua; a/k gives ua/|k|
// - a^k:  u = |k · va^(k-1)| · ua,             significant digits = sa

use super::errors::{MeasurementError, MeasurementResult};
use super::measurement::Measurement;
use super::operand::{BinaryOp, IntoOperand, Operand, OperandRef};
use super::precision::Precision;
use crate::numeric::{BigDecimal, Context};
use num_traits::One;
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

// ============================================================================
// Dispatch
// ============================================================================

/// Apply `op` to two operands.
///
/// # Errors
/// - `UnsupportedOperand` for scalar⊕scalar, a measurement exponent, or a
///   scalar base raised to a measurement
/// - `DivisionByZero` / `InvalidDomain` from the propagation formulas
pub fn evaluate(op: BinaryOp, lhs: &Operand, rhs: &Operand) -> MeasurementResult<Measurement> {
    apply(op, lhs.view(), rhs.view())
}

fn apply(op: BinaryOp, lhs: OperandRef<'_>, rhs: OperandRef<'_>) -> MeasurementResult<Measurement> {
    use BinaryOp::{Add, Div, Mul, Pow, Sub};
    use OperandRef::{Measurement as M, Scalar as S};

    tracing::trace!(%op, lhs = %lhs.kind(), rhs = %rhs.kind(), "propagating uncertainty");

    match (op, lhs, rhs) {
        (Pow, M(a), S(k)) => power(a, k),
        (Pow, _, _) | (_, S(_), S(_)) => Err(unsupported(op, lhs, rhs)),

        (Add, M(a), M(b)) => propagate_sum(a, b, false),
        (Sub, M(a), M(b)) => propagate_sum(a, b, true),
        (Mul, M(a), M(b)) => propagate_product(a, b, false),
        (Div, M(a), M(b)) => propagate_product(a, b, true),

        (Add, M(a), S(k)) | (Add, S(k), M(a)) => Ok(offset(a, a.context().add(a.value(), k))),
        (Sub, M(a), S(k)) => Ok(offset(a, a.context().sub(a.value(), k))),
        (Sub, S(k), M(a)) => Ok(offset(a, a.context().sub(k, a.value()))),
        (Mul, M(a), S(k)) | (Mul, S(k), M(a)) => multiply_scalar(a, k),
        (Div, M(a), S(k)) => divide_scalar(a, k),
        (Div, S(k), M(a)) => scalar_over(k, a),
    }
}

fn unsupported(op: BinaryOp, lhs: OperandRef<'_>, rhs: OperandRef<'_>) -> MeasurementError {
    tracing::debug!(%op, lhs = %lhs.kind(), rhs = %rhs.kind(), "unsupported operand pairing");
    MeasurementError::UnsupportedOperand {
        op,
        lhs: lhs.kind(),
        rhs: rhs.kind(),
    }
}

/// sqrt(x² + y²)
fn quadrature(ctx: &Context, x: &BigDecimal, y: &BigDecimal) -> MeasurementResult<BigDecimal> {
    let sum = ctx.add(&ctx.mul(x, x)?, &ctx.mul(y, y)?);
    Ok(ctx.sqrt(&sum)?)
}

/// a + b or a - b: absolute uncertainties in quadrature, fewest decimals
fn propagate_sum(
    a: &Measurement,
    b: &Measurement,
    subtract: bool,
) -> MeasurementResult<Measurement> {
    let ctx = a.context().max(b.context());
    let value = if subtract {
        ctx.sub(a.value(), b.value())
    } else {
        ctx.add(a.value(), b.value())
    };
    let uncertainty = quadrature(&ctx, a.uncertainty(), b.uncertainty())?;
    let decimals = a.value_decimals().min(b.value_decimals());
    let precision = Precision::from_decimals(&value, decimals);
    Ok(Measurement::assemble(value, uncertainty, precision, ctx))
}

/// a * b or a / b: relative uncertainties in quadrature, fewest significant digits
fn propagate_product(
    a: &Measurement,
    b: &Measurement,
    divide: bool,
) -> MeasurementResult<Measurement> {
    let ctx = a.context().max(b.context());
    let value = if divide {
        ctx.div(a.value(), b.value())?
    } else {
        ctx.mul(a.value(), b.value())?
    };
    let rel_a = ctx.div(a.uncertainty(), a.value())?;
    let rel_b = ctx.div(b.uncertainty(), b.value())?;
    let relative = quadrature(&ctx, &rel_a, &rel_b)?;
    let uncertainty = ctx.mul(&value.abs(), &relative)?;
    let digits = a
        .value_significant_digits()
        .min(b.value_significant_digits());
    let precision = Precision::from_significant_digits(&value, digits);
    Ok(Measurement::assemble(value, uncertainty, precision, ctx))
}

/// Shifted by a scalar: uncertainty and decimals carried over
fn offset(a: &Measurement, value: BigDecimal) -> Measurement {
    let precision = Precision::from_decimals(&value, a.value_decimals());
    Measurement::assemble(value, a.uncertainty().clone(), precision, a.context())
}

/// a · k with u = |k| · ua
fn multiply_scalar(a: &Measurement, k: &BigDecimal) -> MeasurementResult<Measurement> {
    let ctx = a.context();
    let value = ctx.mul(a.value(), k)?;
    let uncertainty = ctx.mul(&k.abs(), a.uncertainty())?;
    Ok(scaled(a, value, uncertainty))
}

/// a / k with u = ua / |k|
fn divide_scalar(a: &Measurement, k: &BigDecimal) -> MeasurementResult<Measurement> {
    let ctx = a.context();
    let value = ctx.div(a.value(), k)?;
    let uncertainty = ctx.div(a.uncertainty(), &k.abs())?;
    Ok(scaled(a, value, uncertainty))
}

/// k / a, keeping the relative uncertainty of a
fn scalar_over(k: &BigDecimal, a: &Measurement) -> MeasurementResult<Measurement> {
    let ctx = a.context();
    let value = ctx.div(k, a.value())?;
    let relative = ctx.div(a.uncertainty(), a.value())?.abs();
    let uncertainty = ctx.mul(&value.abs(), &relative)?;
    Ok(scaled(a, value, uncertainty))
}

/// Result keeping the significant digits of `a`.
fn scaled(a: &Measurement, value: BigDecimal, uncertainty: BigDecimal) -> Measurement {
    let precision = Precision::from_significant_digits(&value, a.value_significant_digits());
    Measurement::assemble(value, uncertainty, precision, a.context())
}

/// a^k with u = |k · va^(k-1)| · ua
fn power(a: &Measurement, k: &BigDecimal) -> MeasurementResult<Measurement> {
    let ctx = a.context();
    let value = ctx.pow(a.value(), k)?;
    let lowered = ctx.sub(k, &BigDecimal::one());
    let derivative = ctx.mul(k, &ctx.pow(a.value(), &lowered)?)?.abs();
    let uncertainty = ctx.mul(&derivative, a.uncertainty())?;
    Ok(scaled(a, value, uncertainty))
}

// ============================================================================
// Checked Operations
// ============================================================================

impl Measurement {
    /// `self + rhs`
    pub fn checked_add(&self, rhs: impl IntoOperand) -> MeasurementResult<Self> {
        self.apply_rhs(BinaryOp::Add, rhs)
    }

    /// `self - rhs`
    pub fn checked_sub(&self, rhs: impl IntoOperand) -> MeasurementResult<Self> {
        self.apply_rhs(BinaryOp::Sub, rhs)
    }

    /// `self * rhs`
    pub fn checked_mul(&self, rhs: impl IntoOperand) -> MeasurementResult<Self> {
        self.apply_rhs(BinaryOp::Mul, rhs)
    }

    /// `self / rhs`
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero divisor or a zero-valued operand
    /// (its relative uncertainty is undefined).
    pub fn checked_div(&self, rhs: impl IntoOperand) -> MeasurementResult<Self> {
        self.apply_rhs(BinaryOp::Div, rhs)
    }

    /// `self ** exponent`, scalar exponents only.
    ///
    /// # Errors
    /// - `UnsupportedOperand` if the exponent is a measurement
    /// - `InvalidDomain` for a negative value with a non-integer exponent
    /// - `DivisionByZero` when the derivative blows up at zero
    pub fn checked_pow(&self, exponent: impl IntoOperand) -> MeasurementResult<Self> {
        self.apply_rhs(BinaryOp::Pow, exponent)
    }

    fn apply_rhs(&self, op: BinaryOp, rhs: impl IntoOperand) -> MeasurementResult<Self> {
        let rhs = rhs.into_operand()?;
        apply(op, OperandRef::Measurement(self), rhs.view())
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Sum of measurements, folded left to right with `+`.
    ///
    /// # Errors
    /// Returns `EmptyInput` if there is nothing to sum.
    pub fn sum<'a, I>(measurements: I) -> MeasurementResult<Self>
    where
        I: IntoIterator<Item = &'a Measurement>,
    {
        let mut iter = measurements.into_iter();
        let first = iter.next().ok_or(MeasurementError::EmptyInput)?.clone();
        iter.try_fold(first, |acc, m| acc.checked_add(m))
    }

    /// Arithmetic mean: the sum divided by the (exact) count.
    ///
    /// # Errors
    /// Returns `EmptyInput` if `measurements` is empty.
    pub fn mean(measurements: &[Measurement]) -> MeasurementResult<Self> {
        Self::sum(measurements)?.checked_div(measurements.len())
    }
}

// ============================================================================
// Operator Traits
// ============================================================================

macro_rules! impl_measurement_ops {
    ($($rhs:ty),*) => {
        $(
            impl_measurement_ops!(@op Add, add, BinaryOp::Add, $rhs);
            impl_measurement_ops!(@op Sub, sub, BinaryOp::Sub, $rhs);
            impl_measurement_ops!(@op Mul, mul, BinaryOp::Mul, $rhs);
            impl_measurement_ops!(@op Div, div, BinaryOp::Div, $rhs);
        )*
    };
    (@op $trait:ident, $method:ident, $op:expr, $rhs:ty) => {
        impl $trait<$rhs> for Measurement {
            type Output = MeasurementResult<Measurement>;

            #[inline]
            fn $method(self, rhs: $rhs) -> Self::Output {
                self.apply_rhs($op, rhs)
            }
        }

        impl $trait<$rhs> for &Measurement {
            type Output = MeasurementResult<Measurement>;

            #[inline]
            fn $method(self, rhs: $rhs) -> Self::Output {
                self.apply_rhs($op, rhs)
            }
        }
    };
}

impl_measurement_ops!(
    Measurement,
    &Measurement,
    BigDecimal,
    &BigDecimal,
    rust_decimal::Decimal,
    i32,
    i64,
    u32,
    u64,
    f64
);

/// scalar ⊕ Measurement, for scalar types on the left.
macro_rules! impl_scalar_lhs_ops {
    ($($lhs:ty),*) => {
        $(
            impl_scalar_lhs_ops!(@op Add, add, BinaryOp::Add, $lhs);
            impl_scalar_lhs_ops!(@op Sub, sub, BinaryOp::Sub, $lhs);
            impl_scalar_lhs_ops!(@op Mul, mul, BinaryOp::Mul, $lhs);
            impl_scalar_lhs_ops!(@op Div, div, BinaryOp::Div, $lhs);
        )*
    };
    (@op $trait:ident, $method:ident, $op:expr, $lhs:ty) => {
        impl $trait<Measurement> for $lhs {
            type Output = MeasurementResult<Measurement>;

            #[inline]
            fn $method(self, rhs: Measurement) -> Self::Output {
                $trait::$method(self, &rhs)
            }
        }

        impl $trait<&Measurement> for $lhs {
            type Output = MeasurementResult<Measurement>;

            fn $method(self, rhs: &Measurement) -> Self::Output {
                let lhs = self.into_operand()?;
                apply($op, lhs.view(), OperandRef::Measurement(rhs))
            }
        }
    };
}

impl_scalar_lhs_ops!(BigDecimal, &BigDecimal, rust_decimal::Decimal, i32, i64, u32, u64, f64);

impl num_traits::Pow<&BigDecimal> for &Measurement {
    type Output = MeasurementResult<Measurement>;

    #[inline]
    fn pow(self, exponent: &BigDecimal) -> Self::Output {
        self.checked_pow(exponent)
    }
}

impl num_traits::Pow<i64> for &Measurement {
    type Output = MeasurementResult<Measurement>;

    #[inline]
    fn pow(self, exponent: i64) -> Self::Output {
        self.checked_pow(exponent)
    }
}

impl num_traits::Pow<f64> for &Measurement {
    type Output = MeasurementResult<Measurement>;

    #[inline]
    fn pow(self, exponent: f64) -> Self::Output {
        self.checked_pow(exponent)
    }
}

impl Neg for Measurement {
    type Output = Measurement;

    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Neg for &Measurement {
    type Output = Measurement;

    fn neg(self) -> Self::Output {
        self.with_value(-self.value())
    }
}

// ============================================================================
// Comparison
// ============================================================================
//
// Ordering and equality look only at the central value. Uncertainty never
// takes part, so measurements sort by their best estimate.

impl PartialEq for Measurement {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl PartialOrd for Measurement {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.value().cmp(other.value()))
    }
}

impl PartialEq<BigDecimal> for Measurement {
    #[inline]
    fn eq(&self, other: &BigDecimal) -> bool {
        self.value() == other
    }
}

impl PartialOrd<BigDecimal> for Measurement {
    #[inline]
    fn partial_cmp(&self, other: &BigDecimal) -> Option<Ordering> {
        Some(self.value().cmp(other))
    }
}

impl PartialEq<Measurement> for BigDecimal {
    #[inline]
    fn eq(&self, other: &Measurement) -> bool {
        self == other.value()
    }
}

impl PartialOrd<Measurement> for BigDecimal {
    #[inline]
    fn partial_cmp(&self, other: &Measurement) -> Option<Ordering> {
        Some(self.cmp(other.value()))
    }
}

/// Compare against a plain scalar; non-finite floats are unordered.
macro_rules! impl_scalar_comparison {
    ($($t:ty),*) => {
        $(
            impl PartialEq<$t> for Measurement {
                fn eq(&self, other: &$t) -> bool {
                    self.partial_cmp(other) == Some(Ordering::Equal)
                }
            }

            impl PartialOrd<$t> for Measurement {
                fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                    match (*other).into_operand() {
                        Ok(Operand::Scalar(k)) => Some(self.value().cmp(&k)),
                        _ => None,
                    }
                }
            }

            impl PartialEq<Measurement> for $t {
                fn eq(&self, other: &Measurement) -> bool {
                    other == self
                }
            }

            impl PartialOrd<Measurement> for $t {
                fn partial_cmp(&self, other: &Measurement) -> Option<Ordering> {
                    other.partial_cmp(self).map(Ordering::reverse)
                }
            }
        )*
    };
}

impl_scalar_comparison!(i32, i64, u32, u64, f64);
