//! Sums of radical terms.

use num_traits::{One, Zero};
use rustc_hash::FxHasher;
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use surd_integers::{ArithmeticError, Decimal, Rational};
use tracing::debug;

use crate::term::{lcm_u32, COMPARISON_PLACES};
use crate::{RadicalError, RadicalTerm};

/// A sum of radical terms.
///
/// Terms with the same root and radicand are merged on every addition and
/// zero terms are dropped, so no two stored terms are commensurable. The
/// zero sum holds a single zero term.
///
/// Equality and hashing ignore term order.
#[derive(Clone, Debug)]
pub struct RadicalSum {
    terms: SmallVec<[RadicalTerm; 2]>,
}

impl RadicalSum {
    /// The zero sum.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            terms: smallvec![RadicalTerm::zero()],
        }
    }

    /// The unit sum.
    #[must_use]
    pub fn one() -> Self {
        Self::from(RadicalTerm::one())
    }

    /// Collects terms into a sum.
    pub fn from_terms<I: IntoIterator<Item = RadicalTerm>>(terms: I) -> Self {
        let mut sum = Self::zero();
        for term in terms {
            sum.add_term(term);
        }
        sum
    }

    /// Returns the stored terms.
    #[must_use]
    pub fn terms(&self) -> &[RadicalTerm] {
        &self.terms
    }

    /// Returns the number of stored terms (1 for zero).
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Returns true for the zero sum.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.iter().all(RadicalTerm::is_zero)
    }

    /// Returns the only term of a one-term sum.
    #[must_use]
    pub fn single_term(&self) -> Option<&RadicalTerm> {
        match self.terms.as_slice() {
            [term] => Some(term),
            _ => None,
        }
    }

    /// Returns the value if the sum is rational.
    #[must_use]
    pub fn as_rational(&self) -> Option<&Rational> {
        self.single_term().and_then(RadicalTerm::as_rational)
    }

    /// Adds a term, merging it into its commensurable bucket.
    pub fn add_term(&mut self, term: RadicalTerm) {
        if term.is_zero() {
            return;
        }
        match self
            .terms
            .iter_mut()
            .find(|existing| existing.commensurable_with(&term))
        {
            Some(existing) => {
                if let Some(merged) = existing.checked_add(&term) {
                    *existing = merged;
                }
            }
            None => self.terms.push(term),
        }
        self.terms.retain(|t| !t.is_zero());
        if self.terms.is_empty() {
            self.terms.push(RadicalTerm::zero());
        }
    }

    /// Multiplies every coefficient by a rational.
    #[must_use]
    pub fn scale(&self, factor: &Rational) -> Self {
        Self::from_terms(self.terms.iter().map(|t| t.scale(factor)))
    }

    /// Distributes the product term by term and collects like terms.
    ///
    /// # Errors
    ///
    /// Returns [`RadicalError::RootTooLarge`] if a combined root overflows.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, RadicalError> {
        let mut product = Self::zero();
        for a in &self.terms {
            for b in &other.terms {
                product.add_term(a.checked_mul(b)?);
            }
        }
        Ok(product)
    }

    /// Raises to a non-negative integer power by repeated multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`RadicalError::RootTooLarge`] if a combined root overflows.
    pub fn pow(&self, exp: u32) -> Result<Self, RadicalError> {
        let mut result = Self::one();
        for _ in 0..exp {
            result = result.checked_mul(self)?;
        }
        Ok(result)
    }

    /// Raises to an integer power; negative powers use [`limited_flip`](Self::limited_flip).
    ///
    /// # Errors
    ///
    /// As [`pow`](Self::pow) and [`limited_flip`](Self::limited_flip).
    pub fn checked_powi(&self, exp: i64) -> Result<Self, RadicalError> {
        let magnitude = u32::try_from(exp.unsigned_abs())
            .map_err(|_| ArithmeticError::Unsupported(format!("exponent {exp} is too large")))?;
        if exp < 0 {
            self.limited_flip()?.pow(magnitude)
        } else {
            self.pow(magnitude)
        }
    }

    /// Raises to a rational power.
    ///
    /// Only one-term sums take non-integral powers.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Unsupported`] for a non-integral power of a
    /// sum with several terms, otherwise as [`RadicalTerm::checked_pow`].
    pub fn checked_pow(&self, exp: &Rational) -> Result<Self, RadicalError> {
        if let Some(term) = self.single_term() {
            return Ok(Self::from(term.checked_pow(exp)?));
        }
        match exp.to_integer().and_then(|n| n.to_i64()) {
            Some(n) => self.checked_powi(n),
            None => Err(ArithmeticError::Unsupported(format!("({self})^({exp})")).into()),
        }
    }

    /// Returns the reciprocal of a sum of at most two terms.
    ///
    /// One term is inverted directly. For `t1 + t2` with
    /// `m = lcm(root1, root2)`, the conjugate
    /// `sum(t1^(m-1-b) * (-t2)^b, b = 0..m)` turns the sum into the rational
    /// `t1^m - (-t2)^m`, which is then divided out.
    ///
    /// # Errors
    ///
    /// Returns [`RadicalError::UnsupportedDenesting`] for three or more
    /// terms and [`ArithmeticError::DivisionByZero`] for the zero sum.
    pub fn limited_flip(&self) -> Result<Self, RadicalError> {
        match self.terms.as_slice() {
            [term] => Ok(Self::from(term.recip()?)),
            [first, second] => {
                let m = lcm_u32(first.root(), second.root()).ok_or(RadicalError::RootTooLarge)?;
                let negated = -second;
                let mut conjugate = Self::zero();
                for b in 0..m {
                    conjugate.add_term(first.powi(m - 1 - b).checked_mul(&negated.powi(b))?);
                }
                let norm = self.checked_mul(&conjugate)?;
                let norm = norm
                    .as_rational()
                    .ok_or(RadicalError::UnsupportedDenesting { terms: 2 })?;
                debug!(m, conjugate_terms = conjugate.term_count(), "denested two-term reciprocal");
                Ok(conjugate.scale(&norm.checked_recip()?))
            }
            terms => Err(RadicalError::UnsupportedDenesting { terms: terms.len() }),
        }
    }

    /// Divides by another sum through its [`limited_flip`](Self::limited_flip).
    ///
    /// # Errors
    ///
    /// As [`limited_flip`](Self::limited_flip) applied to `other`.
    pub fn checked_div(&self, other: &Self) -> Result<Self, RadicalError> {
        self.checked_mul(&other.limited_flip()?)
    }

    /// Decimal approximation with `places` fractional digits.
    #[must_use]
    pub fn to_decimal(&self, places: u32) -> Decimal {
        let extra = places + 4;
        self.terms
            .iter()
            .map(|t| t.to_decimal(extra))
            .fold(Decimal::default(), |acc, d| acc + d)
            .round(places)
    }
}

impl Default for RadicalSum {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<RadicalTerm> for RadicalSum {
    fn from(term: RadicalTerm) -> Self {
        Self::from_terms([term])
    }
}

impl From<Rational> for RadicalSum {
    fn from(value: Rational) -> Self {
        Self::from(RadicalTerm::rational(value))
    }
}

impl PartialEq for RadicalSum {
    fn eq(&self, other: &Self) -> bool {
        self.terms.len() == other.terms.len() && self.terms.iter().all(|t| other.terms.contains(t))
    }
}

impl Eq for RadicalSum {}

impl Hash for RadicalSum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-insensitive: per-term hashes combine commutatively.
        let combined = self.terms.iter().fold(0u64, |acc, term| {
            let mut hasher = FxHasher::default();
            term.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        state.write_u64(combined);
    }
}

impl PartialOrd for RadicalSum {
    /// Compares decimal approximations; `None` if two different sums agree
    /// to [`COMPARISON_PLACES`] digits.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self
            .to_decimal(COMPARISON_PLACES)
            .cmp(&other.to_decimal(COMPARISON_PLACES))
        {
            Ordering::Equal => None,
            ordering => Some(ordering),
        }
    }
}

impl Add<&RadicalSum> for &RadicalSum {
    type Output = RadicalSum;

    fn add(self, rhs: &RadicalSum) -> RadicalSum {
        let mut sum = self.clone();
        for term in &rhs.terms {
            sum.add_term(term.clone());
        }
        sum
    }
}

impl Add for RadicalSum {
    type Output = RadicalSum;

    fn add(self, rhs: RadicalSum) -> RadicalSum {
        &self + &rhs
    }
}

impl Add<RadicalTerm> for RadicalSum {
    type Output = RadicalSum;

    fn add(mut self, rhs: RadicalTerm) -> RadicalSum {
        self.add_term(rhs);
        self
    }
}

impl Neg for &RadicalSum {
    type Output = RadicalSum;

    fn neg(self) -> RadicalSum {
        RadicalSum {
            terms: self.terms.iter().map(|t| -t).collect(),
        }
    }
}

impl Neg for RadicalSum {
    type Output = RadicalSum;

    fn neg(self) -> RadicalSum {
        -&self
    }
}

impl Sub<&RadicalSum> for &RadicalSum {
    type Output = RadicalSum;

    fn sub(self, rhs: &RadicalSum) -> RadicalSum {
        self + &-rhs
    }
}

impl Sub for RadicalSum {
    type Output = RadicalSum;

    fn sub(self, rhs: RadicalSum) -> RadicalSum {
        &self - &rhs
    }
}

impl Mul<&RadicalSum> for &RadicalSum {
    type Output = RadicalSum;

    /// # Panics
    ///
    /// Panics if a combined root overflows `u32`; see `checked_mul`.
    fn mul(self, rhs: &RadicalSum) -> RadicalSum {
        match self.checked_mul(rhs) {
            Ok(product) => product,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Mul for RadicalSum {
    type Output = RadicalSum;

    fn mul(self, rhs: RadicalSum) -> RadicalSum {
        &self * &rhs
    }
}

impl fmt::Display for RadicalSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl One for RadicalSum {
    fn one() -> Self {
        RadicalSum::one()
    }
}

impl Zero for RadicalSum {
    fn zero() -> Self {
        RadicalSum::zero()
    }

    fn is_zero(&self) -> bool {
        RadicalSum::is_zero(self)
    }
}
