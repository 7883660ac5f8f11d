use measurement::prelude::*;
use num_traits::ToPrimitive;
use proptest::prelude::*;

fn f(x: &BigDecimal) -> f64 {
    x.to_f64().unwrap()
}

/// Decimal literal `mantissa × 10^-scale` with trailing zeros kept,
/// e.g. (12300, 2) → "123.00".
fn literal(mantissa: i64, scale: u32) -> String {
    let scale = scale as usize;
    let digits = format!("{:0>width$}", mantissa.unsigned_abs(), width = scale + 1);
    let (whole, frac) = digits.split_at(digits.len() - scale);
    let sign = if mantissa < 0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, frac)
    }
}

fn measurement(mantissa: i64, scale: u32, uncertainty: i64) -> Measurement {
    Measurement::from_decimals(&literal(mantissa, scale), &literal(uncertainty, scale), scale)
        .unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1e-300)
}

// Property 1: Addition commutes in value and uncertainty
proptest! {
    #[test]
    fn prop_addition_commutative(
        va in -1_000_000i64..1_000_000, ua in 1i64..10_000,
        vb in -1_000_000i64..1_000_000, ub in 1i64..10_000,
        scale in 0u32..5
    ) {
        let a = measurement(va, scale, ua);
        let b = measurement(vb, scale, ub);

        let ab = (&a + &b).unwrap();
        let ba = (&b + &a).unwrap();

        prop_assert_eq!(ab.value(), ba.value());
        prop_assert!(close(f(&ab.uncertainty()), f(&ba.uncertainty())));
        prop_assert_eq!(ab.to_string(), ba.to_string());
    }
}

// Property 2: Sums and differences share the quadrature uncertainty
proptest! {
    #[test]
    fn prop_sum_difference_quadrature(
        va in -1_000_000i64..1_000_000, ua in 1i64..10_000,
        vb in -1_000_000i64..1_000_000, ub in 1i64..10_000,
        scale in 0u32..5
    ) {
        let a = measurement(va, scale, ua);
        let b = measurement(vb, scale, ub);

        let sum = (&a + &b).unwrap();
        let difference = (&a - &b).unwrap();
        prop_assert_eq!(sum.uncertainty(), difference.uncertainty());

        let fa = f(&a.uncertainty());
        let fb = f(&b.uncertainty());
        prop_assert!(close(f(&sum.uncertainty()), (fa * fa + fb * fb).sqrt()));
    }
}

// Property 3: Products combine relative uncertainties in quadrature
proptest! {
    #[test]
    fn prop_product_relative_quadrature(
        va in 1i64..1_000_000, ua in 1i64..10_000,
        vb in -1_000_000i64..-1, ub in 1i64..10_000,
        scale in 0u32..5
    ) {
        let a = measurement(va, scale, ua);
        let b = measurement(vb, scale, ub);
        let product = (&a * &b).unwrap();

        let ra = f(&a.relative_uncertainty().unwrap());
        let rb = f(&b.relative_uncertainty().unwrap());
        let relative = f(&product.relative_uncertainty().unwrap());
        prop_assert!(close(relative, (ra * ra + rb * rb).sqrt()));

        let quotient = (&a / &b).unwrap();
        let relative = f(&quotient.relative_uncertainty().unwrap());
        prop_assert!(close(relative, (ra * ra + rb * rb).sqrt()));
    }
}

// Property 4: Powers follow u = |k v^(k-1)| u_v
proptest! {
    #[test]
    fn prop_power_rule(
        v in 1i64..1_000_000, u in 1i64..10_000,
        scale in 0u32..4
    ) {
        let a = measurement(v, scale, u);
        let fv = f(&a.value());
        let fu = f(&a.uncertainty());

        let squared = a.checked_pow(2).unwrap();
        prop_assert!(close(f(&squared.uncertainty()), 2.0 * fv * fu));

        let root = a.checked_pow(0.5).unwrap();
        prop_assert!(close(f(&root.value()), fv.sqrt()));
        prop_assert!(close(f(&root.uncertainty()), 0.5 * fu / fv.sqrt()));
    }
}

// Property 5: Rendering is deterministic and always "value ± uncertainty"
proptest! {
    #[test]
    fn prop_rendering_shape(
        v in -1_000_000i64..1_000_000, u in 0i64..100_000,
        scale in 0u32..5
    ) {
        let m = measurement(v, scale, u);
        let rendered = m.to_string();

        prop_assert_eq!(&rendered, &m.to_string());
        prop_assert_eq!(rendered.matches(" ± ").count(), 1);

        let (value, uncertainty) = m.render_parts();
        prop_assert_eq!(rendered, format!("{} ± {}", value, uncertainty));
    }
}

// Property 6: Comparisons look at values only
proptest! {
    #[test]
    fn prop_comparison_ignores_uncertainty(
        va in -1_000_000i64..1_000_000, vb in -1_000_000i64..1_000_000,
        ua in 0i64..10_000, ub in 0i64..10_000
    ) {
        let a = measurement(va, 2, ua);
        let a_wide = measurement(va, 2, ub);
        let b = measurement(vb, 2, ub);

        prop_assert!(a == a_wide);
        prop_assert_eq!(a == b, va == vb);
        prop_assert_eq!(a < b, va < vb);
        prop_assert_eq!(a.partial_cmp(&b), Some(va.cmp(&vb)));
    }
}

// Property 7: Decimal places and significant digits agree in both directions
proptest! {
    #[test]
    fn prop_precision_derivation_consistent(
        v in 1i64..10_000_000,
        scale in 1u32..6
    ) {
        let text = literal(v, scale);
        let by_decimals = Measurement::from_decimals(&text, "0.1", scale).unwrap();
        let digits = by_decimals.value_significant_digits();

        let by_digits = Measurement::from_significant_digits(&text, "0.1", digits).unwrap();
        prop_assert_eq!(by_digits.value_decimals(), scale);
        prop_assert_eq!(by_digits.precision(), by_decimals.precision());
    }
}
