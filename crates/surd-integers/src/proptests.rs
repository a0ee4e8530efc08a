//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{factor, Integer, Rational, RationalPolicy, DEFAULT_MAX_DENOMINATOR};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rational() -> impl Strategy<Value = Rational> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    proptest! {
        // Integer properties

        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(&a * &(&b + &c), &a * &b + &a * &c);
        }

        #[test]
        fn gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);
            prop_assert!(g.is_positive());
            prop_assert!(a.is_multiple_of(&g));
            prop_assert!(b.is_multiple_of(&g));
        }

        #[test]
        fn div_mod_floor_identity(a in small_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let (q, r) = a.div_mod_floor(&b);
            prop_assert_eq!(&q * &b + r.clone(), a);
            prop_assert!(r.is_zero() || r.is_negative() == b.is_negative());
            prop_assert!(r.abs() < b.abs());
        }

        #[test]
        fn nth_root_floor_brackets(a in 0i64..1_000_000, n in 1u32..6) {
            let a = Integer::new(a);
            let root = a.nth_root_floor(n).unwrap();
            prop_assert!(root.pow(n) <= a);
            prop_assert!((root + Integer::one()).pow(n) > a);
        }

        #[test]
        fn factor_product_is_value(a in non_zero_int()) {
            let a = Integer::new(a);
            prop_assert_eq!(factor(&a).value(), a.abs());
        }

        #[test]
        fn exact_root_splits_value(a in 1i64..100_000, root in 1u32..5) {
            let a = Integer::new(a);
            let (outside, inside) = factor(&a).exact_root(root);
            prop_assert_eq!(outside.pow(root) * inside.clone(), a);
            prop_assert!(factor(&inside).iter().all(|(_, m)| m < root));
        }

        // Rational properties

        #[test]
        fn rational_is_canonical(n in small_int(), d in non_zero_int()) {
            let r = Rational::from_i64(n, d);
            prop_assert!(r.denominator().is_positive());
            prop_assert!(r.numerator().gcd(&r.denominator()).is_one());
            // Same value as the raw quotient.
            prop_assert_eq!(r.numerator() * &Integer::new(d), r.denominator() * &Integer::new(n));
        }

        #[test]
        fn rational_distributive(a in rational(), b in rational(), c in rational()) {
            prop_assert_eq!(&a * &(&b + &c), &a * &b + &a * &c);
        }

        #[test]
        fn rational_sub_then_add(a in rational(), b in rational()) {
            prop_assert_eq!(&(&a - &b) + &b, a);
        }

        #[test]
        fn rational_multiplicative_inverse(num in non_zero_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            let product = &a * &a.recip();
            prop_assert!(product.is_one());
        }

        #[test]
        fn rational_order_matches_difference(a in rational(), b in rational()) {
            prop_assert_eq!(a < b, (&a - &b).is_negative());
        }

        #[test]
        fn rational_gcd_divides(a in rational(), b in rational()) {
            let g = a.gcd(&b);
            if !g.is_zero() {
                prop_assert!((&a / &g).is_integer());
                prop_assert!((&b / &g).is_integer());
            }
        }

        #[test]
        fn rational_display_parses_back(a in rational()) {
            prop_assert_eq!(a.to_string().parse::<Rational>().unwrap(), a);
        }

        #[test]
        fn rational_round_is_within_half_ulp(a in rational(), places in 0u32..6) {
            let rounded = a.round(places);
            let half_ulp = Rational::new(Integer::one(), Integer::new(2) * Integer::ten_pow(places));
            prop_assert!((&rounded - &a).abs() <= half_ulp);
        }

        #[test]
        fn degraded_denominator_is_power_of_ten(n in 1i64..1000, d in 1_000_000_000_001i64..2_000_000_000_000) {
            let r = Rational::from_i64(n, d);
            let exact = Rational::with_policy(Integer::new(n), Integer::new(d), &RationalPolicy::exact()).unwrap();
            prop_assume!(exact.denominator() > Integer::from(DEFAULT_MAX_DENOMINATOR));
            prop_assert!(factor(&r.denominator()).iter().all(|(p, _)| *p == Integer::new(2) || *p == Integer::new(5)));
            // Relative error below 10^-16.
            let error = (&r - &exact).abs() / exact;
            prop_assert!(error < Rational::new(Integer::one(), Integer::ten_pow(16)));
        }
    }
}
