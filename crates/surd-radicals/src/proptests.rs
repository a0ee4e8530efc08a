//! Property-based tests for radical arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;
    use surd_integers::{factor, Integer, Rational};

    use crate::{RadicalSum, RadicalTerm};

    fn non_zero_rational() -> impl Strategy<Value = Rational> {
        (
            prop_oneof![(-50i64..=-1i64), (1i64..=50i64)],
            1i64..=50i64,
        )
            .prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    fn radicand() -> impl Strategy<Value = Rational> {
        (1i64..=500, 1i64..=60).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    // Small parts keep conjugate norms below the degrade bound.
    fn small_rational() -> impl Strategy<Value = Rational> {
        (prop_oneof![(-9i64..=-1i64), (1i64..=9i64)], 1i64..=4i64)
            .prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    // Terms whose radicand is a small prime, so they are never rational.
    fn irrational_term() -> impl Strategy<Value = RadicalTerm> {
        (
            small_rational(),
            2u32..=4,
            prop_oneof![Just(2i64), Just(3), Just(5), Just(7)],
        )
            .prop_map(|(k, root, p)| RadicalTerm::reduced(k, root, Rational::from(p)).unwrap())
    }

    // Integer coefficients keep high conjugate powers below the degrade bound.
    fn small_irrational_term() -> impl Strategy<Value = RadicalTerm> {
        (
            prop_oneof![(-3i64..=-1i64), (1i64..=3i64)],
            2u32..=4,
            prop_oneof![Just(2i64), Just(3), Just(5), Just(7)],
        )
            .prop_map(|(k, root, p)| {
                RadicalTerm::reduced(Rational::from(k), root, Rational::from(p)).unwrap()
            })
    }

    proptest! {
        #[test]
        fn reduction_is_idempotent(k in non_zero_rational(), root in 1u32..=12, c in radicand()) {
            let t = RadicalTerm::reduced(k, root, c).unwrap();
            let again = RadicalTerm::reduced(t.coefficient().clone(), t.root(), t.content().clone()).unwrap();
            prop_assert_eq!(again, t);
        }

        #[test]
        fn reduced_content_has_no_exact_power(k in non_zero_rational(), root in 2u32..=12, c in radicand()) {
            let t = RadicalTerm::reduced(k, root, c).unwrap();
            if !t.is_rational() {
                prop_assert!(!t.content().is_negative());
                for part in [t.content().numerator(), t.content().denominator()] {
                    prop_assert!(factor(&part).iter().all(|(_, m)| m < t.root()));
                }
            }
        }

        #[test]
        fn reduction_preserves_value(k in non_zero_rational(), root in 1u32..=4, c in radicand()) {
            // (k * c^(1/r))^r == k^r * c
            let t = RadicalTerm::reduced(k.clone(), root, c.clone()).unwrap();
            let lhs = t.powi(root);
            prop_assert_eq!(lhs.as_rational(), Some(&(k.pow(root) * c)));
        }

        #[test]
        fn commensurable_terms_add_coefficients(
            a in non_zero_rational(),
            b in non_zero_rational(),
            root in 2u32..=5,
            c in radicand(),
        ) {
            let x = RadicalTerm::reduced(a, root, c.clone()).unwrap();
            let y = RadicalTerm::reduced(b, root, c).unwrap();
            let sum = x.checked_add(&y).unwrap();
            let expected = x.coefficient() + y.coefficient();
            prop_assert_eq!(sum.coefficient(), &expected);
            if !expected.is_zero() {
                prop_assert_eq!(sum.content(), x.content());
            }
        }

        #[test]
        fn two_term_flip_is_inverse(first in small_rational(), second in irrational_term()) {
            let s = RadicalSum::from_terms([RadicalTerm::rational(first), second]);
            let product = &s * &s.limited_flip().unwrap();
            prop_assert!(product.as_rational().is_some_and(One::is_one));
        }

        #[test]
        fn mixed_root_flip_is_inverse(a in small_irrational_term(), b in small_irrational_term()) {
            let s = RadicalSum::from_terms([a, b]);
            if s.term_count() == 2 {
                let product = &s * &s.limited_flip().unwrap();
                prop_assert_eq!(product, RadicalSum::one());
            }
        }

        #[test]
        fn decimal_tracks_integer_square(n in 1i64..10_000) {
            let t = RadicalTerm::sqrt(Rational::from(n)).unwrap();
            let d = t.to_decimal(12);
            let squared = Rational::from(d.clone()) * Rational::from(d);
            let error = (squared - Rational::from(n)).abs();
            prop_assert!(error < Rational::new(Integer::one(), Integer::ten_pow(9)));
        }
    }
}
