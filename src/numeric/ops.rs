// ============================================================================
// Context Arithmetic
// Rounded arithmetic and transcendental functions on BigDecimal
// ============================================================================
//
// `bigdecimal` supplies exact addition and multiplication; every operation
// here rounds the exact (or truncated-with-guard-digits) result once, to
// `precision` significant digits, half away from zero. Series evaluations run
// on a widened context and round once at the end.

use super::context::Context;
use super::decimal::{check_range, digit_count, pow10, DecimalExt};
use super::errors::{NumericError, NumericResult};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Largest leading-digit position accepted by `exp`; beyond it the result
/// exponent leaves the supported range.
const EXP_MAX_ADJUSTED: i64 = 15;

impl Context {
    // ========================================================================
    // Basic Arithmetic
    // ========================================================================

    /// Round a value to this context's precision.
    #[inline]
    pub fn round(&self, x: &BigDecimal) -> BigDecimal {
        x.round_significant(self.precision())
    }

    /// Rounded addition.
    pub fn add(&self, a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
        if a.is_zero() {
            return self.round(b);
        }
        if b.is_zero() {
            return self.round(a);
        }

        // An addend below half an ulp of the other cannot change the rounded
        // sum, and aligning it would expand the exponent gap into digits
        let limit = i64::from(self.precision()) + 2;
        let gap = a.adjusted_exponent() - b.adjusted_exponent();
        if gap > limit {
            return self.round(a);
        }
        if -gap > limit {
            return self.round(b);
        }

        self.round(&(a + b))
    }

    /// Rounded subtraction.
    pub fn sub(&self, a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
        self.add(a, &-b)
    }

    /// Rounded multiplication.
    ///
    /// # Errors
    /// Returns `Overflow` if the product leaves the supported exponent range.
    pub fn mul(&self, a: &BigDecimal, b: &BigDecimal) -> NumericResult<BigDecimal> {
        let a = check_range(a.clone())?;
        let b = check_range(b.clone())?;
        check_range(self.round(&(a * b)))
    }

    /// Rounded division.
    ///
    /// # Errors
    /// - `DivisionByZero` if `b` is zero
    /// - `Overflow` if the quotient leaves the supported exponent range
    pub fn div(&self, a: &BigDecimal, b: &BigDecimal) -> NumericResult<BigDecimal> {
        if b.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if a.is_zero() {
            return Ok(BigDecimal::zero());
        }

        let (na, sa) = a.as_bigint_and_exponent();
        let (nb, sb) = b.as_bigint_and_exponent();

        // Truncated quotient with two digits beyond precision, then rounded
        let wanted = i64::from(self.precision()) + 2;
        let shift = (wanted + digit_count(&nb) as i64 - digit_count(&na) as i64).max(0);
        let shift_digits = u32::try_from(shift).map_err(|_| NumericError::Overflow)?;
        let quotient = (na * pow10(shift_digits)) / nb;
        let scale = sa
            .checked_sub(sb)
            .and_then(|s| s.checked_add(shift))
            .ok_or(NumericError::Overflow)?;

        check_range(self.round(&BigDecimal::new(quotient, scale)))
    }

    /// Rounded square root.
    ///
    /// # Errors
    /// Returns `InvalidDomain` for negative input.
    pub fn sqrt(&self, x: &BigDecimal) -> NumericResult<BigDecimal> {
        if x.is_negative() {
            return Err(NumericError::InvalidDomain);
        }
        if x.is_zero() {
            return Ok(BigDecimal::zero());
        }

        // x = n · 10^-s; scale n up until s is even and the root has
        // two digits beyond precision
        let (n, s) = x.as_bigint_and_exponent();
        let wanted = 2 * (i64::from(self.precision()) + 2);
        let mut shift = (wanted - digit_count(&n) as i64).max(0);
        if (s + shift).rem_euclid(2) != 0 {
            shift += 1;
        }
        let shift_digits = u32::try_from(shift).map_err(|_| NumericError::Overflow)?;
        let root = (n * pow10(shift_digits)).sqrt();

        Ok(self.round(&BigDecimal::new(root, (s + shift) / 2)))
    }

    // ========================================================================
    // Powers
    // ========================================================================

    /// Integer power by repeated squaring.
    ///
    /// # Errors
    /// - `DivisionByZero` for a zero base with a negative exponent
    /// - `Overflow` if an intermediate leaves the supported exponent range
    pub fn powi(&self, x: &BigDecimal, n: i64) -> NumericResult<BigDecimal> {
        if n == 0 {
            return Ok(BigDecimal::one());
        }
        if n < 0 && x.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let mut remaining = n.unsigned_abs();
        let bits = 64 - remaining.leading_zeros();
        let work = self.widened(self.guard_digits() + bits);

        let mut result = BigDecimal::one();
        let mut base = x.clone();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = work.mul(&result, &base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = work.mul(&base, &base)?;
            }
        }

        if n < 0 {
            self.div(&BigDecimal::one(), &result)
        } else {
            Ok(self.round(&result))
        }
    }

    /// Real power `x^k`.
    ///
    /// Integer exponents use [`powi`](Self::powi); half-integer exponents go
    /// through the square root; everything else is `exp(k · ln x)`.
    ///
    /// # Errors
    /// - `InvalidDomain` for a negative base with a non-integer exponent
    /// - `DivisionByZero` for a zero base with a negative exponent
    pub fn pow(&self, x: &BigDecimal, k: &BigDecimal) -> NumericResult<BigDecimal> {
        if let Some(n) = k.to_exact_i64() {
            return self.powi(x, n);
        }

        let work = self.widened(self.guard_digits());
        let doubled = work.mul(k, &BigDecimal::from(2))?;
        if let Some(n) = doubled.to_exact_i64() {
            let root = work.sqrt(x)?;
            return Ok(self.round(&work.powi(&root, n)?));
        }

        if x.is_negative() {
            return Err(NumericError::InvalidDomain);
        }
        if x.is_zero() {
            return if k.is_negative() {
                Err(NumericError::DivisionByZero)
            } else {
                Ok(BigDecimal::zero())
            };
        }

        let exponent = work.mul(k, &work.ln(x)?)?;
        Ok(self.round(&work.exp(&exponent)?))
    }

    // ========================================================================
    // Logarithm and Exponential
    // ========================================================================
    //
    // `bigdecimal` stops at square roots, so these two are series
    // evaluations on a widened context.

    /// Natural logarithm.
    ///
    /// # Errors
    /// Returns `InvalidDomain` for zero or negative input.
    pub fn ln(&self, x: &BigDecimal) -> NumericResult<BigDecimal> {
        if !x.is_positive() {
            return Err(NumericError::InvalidDomain);
        }
        if x.is_one() {
            return Ok(BigDecimal::zero());
        }

        let work = self.widened(self.guard_digits() + 10);

        // x = f · 10^k with f in [1, 10)
        let k = x.adjusted_exponent();
        let (mantissa, scale) = x.as_bigint_and_exponent();
        let f_scale = scale.checked_add(k).ok_or(NumericError::Overflow)?;
        let f = BigDecimal::new(mantissa, f_scale);

        let mut result = work.ln_near_unit(&f)?;
        if k != 0 {
            let ln10 = work.ln_near_unit(&BigDecimal::from(10))?;
            result = work.add(&result, &work.mul(&ln10, &BigDecimal::from(k))?);
        }
        Ok(self.round(&result))
    }

    /// ln(f) for f in [1, 10]: square-root reduction, then the atanh series
    /// `ln f = 2 Σ y^(2i+1) / (2i+1)` with `y = (f-1)/(f+1)`.
    fn ln_near_unit(&self, f: &BigDecimal) -> NumericResult<BigDecimal> {
        let one = BigDecimal::one();
        let mut f = f.clone();
        let mut halvings: u32 = 0;
        loop {
            let delta = self.sub(&f, &one);
            if delta.is_zero() || delta.adjusted_exponent() < -2 {
                break;
            }
            f = self.sqrt(&f)?;
            halvings += 1;
        }

        let y = self.div(&self.sub(&f, &one), &self.add(&f, &one))?;
        let y_squared = self.mul(&y, &y)?;
        let cutoff = -(i64::from(self.precision()) + 2);

        let mut power = y.clone();
        let mut sum = y;
        let mut denominator: u64 = 1;
        loop {
            power = self.mul(&power, &y_squared)?;
            denominator += 2;
            let term = self.div(&power, &BigDecimal::from(denominator))?;
            if term.is_zero() || term.adjusted_exponent() < sum.adjusted_exponent() + cutoff {
                break;
            }
            sum = self.add(&sum, &term);
        }

        let scale = BigDecimal::new(BigInt::from(2u32) << halvings, 0);
        self.mul(&sum, &scale)
    }

    /// Exponential function.
    ///
    /// # Errors
    /// Returns `Overflow` when the argument is too large for the result's
    /// exponent to be represented.
    pub fn exp(&self, x: &BigDecimal) -> NumericResult<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::one());
        }
        let adjusted = x.adjusted_exponent();
        if adjusted > EXP_MAX_ADJUSTED {
            return Err(NumericError::Overflow);
        }

        // Halve the argument j times so |r| < 0.01, then square j times
        let halvings = if adjusted + 3 > 0 {
            ((adjusted + 3) as u64 * 3322).div_ceil(1000) as u32
        } else {
            0
        };
        let work = self.widened(self.guard_digits() + halvings / 3 + 2);
        let r = work.div(x, &BigDecimal::new(BigInt::from(1u32) << halvings, 0))?;

        let cutoff = -(i64::from(work.precision()) + 2);
        let mut sum = BigDecimal::one();
        let mut term = BigDecimal::one();
        let mut n: u64 = 0;
        loop {
            n += 1;
            term = work.div(&work.mul(&term, &r)?, &BigDecimal::from(n))?;
            if term.is_zero() || term.adjusted_exponent() < cutoff {
                break;
            }
            sum = work.add(&sum, &term);
        }

        for _ in 0..halvings {
            sum = work.mul(&sum, &sum)?;
        }
        Ok(self.round(&sum))
    }
}

// ============================================================================
// Tests
// ============================================================================
