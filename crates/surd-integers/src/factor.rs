//! Prime factorization by trial division.
//!
//! Radical reduction only ever factors the index and the small integers that
//! appear as radicands, so trial division is sufficient.

use num_traits::One;
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

use crate::Integer;

/// A prime factorization of the absolute value of an integer.
///
/// Factors are kept in ascending order of the prime.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PrimeFactorization {
    factors: BTreeMap<Integer, u32>,
}

/// Factors `|n|` into primes.
///
/// `0` and `±1` have the empty factorization.
///
/// # Example
///
/// ```
/// use surd_integers::{factor, Integer};
///
/// let f = factor(&Integer::new(360));
/// assert_eq!(f.multiplicity(&Integer::new(2)), 3);
/// assert_eq!(f.multiplicity(&Integer::new(3)), 2);
/// assert_eq!(f.value(), Integer::new(360));
/// ```
#[must_use]
pub fn factor(n: &Integer) -> PrimeFactorization {
    let mut remaining = n.abs();
    let mut factors = BTreeMap::new();
    if remaining <= Integer::one() {
        return PrimeFactorization { factors };
    }

    let two = Integer::new(2);
    let mut count = 0;
    while remaining.is_even() {
        remaining = remaining / &two;
        count += 1;
    }
    if count > 0 {
        factors.insert(two, count);
    }

    let mut odd_primes: Vec<u64> = Vec::new();
    let mut candidate: u64 = 3;
    while !remaining.is_one() {
        let divisor = Integer::from(candidate);
        if &divisor * &divisor > remaining {
            // No factor up to the square root: what is left is prime.
            trace!(prime = %remaining, "trial division cut off at square root");
            factors.insert(remaining, 1);
            break;
        }
        if odd_primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|p| candidate % p != 0)
        {
            odd_primes.push(candidate);
            let mut count = 0;
            while remaining.is_multiple_of(&divisor) {
                remaining = remaining / &divisor;
                count += 1;
            }
            if count > 0 {
                factors.insert(divisor, count);
            }
        }
        candidate += 2;
    }

    trace!(n = %n, distinct = factors.len(), "factored");
    PrimeFactorization { factors }
}

impl PrimeFactorization {
    /// Returns the multiplicity of `prime` (0 if absent).
    #[must_use]
    pub fn multiplicity(&self, prime: &Integer) -> u32 {
        self.factors.get(prime).copied().unwrap_or(0)
    }

    /// Iterates over `(prime, multiplicity)` in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&Integer, u32)> {
        self.factors.iter().map(|(p, &m)| (p, m))
    }

    /// Returns true for the factorization of 1.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Returns the product of the prime powers.
    #[must_use]
    pub fn value(&self) -> Integer {
        self.factors
            .iter()
            .fold(Integer::one(), |acc, (p, &m)| acc * p.pow(m))
    }

    /// Splits the value into `(outside, inside)` with
    /// `value = outside^root * inside` and `inside` free of `root`-th powers.
    ///
    /// # Panics
    ///
    /// Panics if `root` is zero.
    #[must_use]
    pub fn exact_root(&self, root: u32) -> (Integer, Integer) {
        assert!(root > 0, "zeroth root");
        let mut outside = Integer::one();
        let mut inside = Integer::one();
        for (p, &m) in &self.factors {
            outside = outside * p.pow(m / root);
            inside = inside * p.pow(m % root);
        }
        (outside, inside)
    }

    /// Takes the `root`-th root of the value if every multiplicity is
    /// divisible by `root`.
    #[must_use]
    pub fn reduce(&self, root: u32) -> Option<Self> {
        if root == 0 || self.factors.values().any(|m| m % root != 0) {
            return None;
        }
        Some(Self {
            factors: self
                .factors
                .iter()
                .map(|(p, m)| (p.clone(), m / root))
                .collect(),
        })
    }
}

impl fmt::Display for PrimeFactorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factors.is_empty() {
            return write!(f, "1");
        }
        for (i, (p, m)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " * ")?;
            }
            if m == 1 {
                write!(f, "{p}")?;
            } else {
                write!(f, "{p}^{m}")?;
            }
        }
        Ok(())
    }
}
