//! Single radical terms `k * c^(1/r)`.
//!
//! A term is always stored in canonical form:
//!
//! - `root == 1` implies `content == 1`, so rationals have one representation
//! - a zero coefficient or zero content is the zero term `0 * 1^(1/1)`
//! - `content` is positive; the sign of an odd root is hoisted into the
//!   coefficient
//! - `content` carries no exact `root`-th power factor, and `root` is as
//!   small as the radicand allows
//!
//! Because the form is canonical, the derived `Eq` and `Hash` are exact.

use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Mul, Neg};
use surd_integers::{factor, ArithmeticError, Decimal, Integer, Rational};
use tracing::trace;

use crate::RadicalError;

/// Fractional digits compared by the approximate `PartialOrd` impls.
pub const COMPARISON_PLACES: u32 = 40;

/// Extra digits carried through root extraction.
const GUARD_DIGITS: u32 = 8;

/// A radical term `coefficient * content^(1/root)`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RadicalTerm {
    coefficient: Rational,
    root: u32,
    content: Rational,
}

impl RadicalTerm {
    /// Builds the canonical term `coefficient * content^(1/root)`.
    ///
    /// Exact `root`-th power factors of the content's numerator and
    /// denominator move into the coefficient, and the root shrinks by every
    /// prime factor it shares with both of them.
    ///
    /// # Errors
    ///
    /// Returns [`RadicalError::InvalidRoot`] for `root == 0` and
    /// [`RadicalError::EvenRootOfNegative`] for a negative content under an
    /// even root.
    ///
    /// # Example
    ///
    /// ```
    /// use surd_integers::Rational;
    /// use surd_radicals::RadicalTerm;
    ///
    /// // 2304^(1/6) = 2 * 6^(1/3)
    /// let t = RadicalTerm::reduced(Rational::from(1), 6, Rational::from(2304)).unwrap();
    /// assert_eq!(t.coefficient(), &Rational::from(2));
    /// assert_eq!(t.root(), 3);
    /// assert_eq!(t.content(), &Rational::from(6));
    /// ```
    pub fn reduced(
        coefficient: Rational,
        root: u32,
        content: Rational,
    ) -> Result<Self, RadicalError> {
        if root == 0 {
            return Err(RadicalError::InvalidRoot(root));
        }
        if content.is_negative() && root != 1 {
            if root % 2 == 0 {
                return Err(RadicalError::EvenRootOfNegative);
            }
            return Ok(Self::assemble(-coefficient, root, -content));
        }
        Ok(Self::assemble(coefficient, root, content))
    }

    /// The principal square root of `content`.
    ///
    /// # Errors
    ///
    /// Returns [`RadicalError::EvenRootOfNegative`] for a negative content.
    pub fn sqrt(content: Rational) -> Result<Self, RadicalError> {
        Self::reduced(Rational::one(), 2, content)
    }

    /// A rational as a term.
    #[must_use]
    pub fn rational(value: Rational) -> Self {
        Self::from_parts(value, 1, Rational::one())
    }

    /// The zero term.
    #[must_use]
    pub fn zero() -> Self {
        Self::rational(Rational::zero())
    }

    /// The unit term.
    #[must_use]
    pub fn one() -> Self {
        Self::rational(Rational::one())
    }

    /// Canonical form for a valid root and a non-negative content.
    fn assemble(coefficient: Rational, root: u32, content: Rational) -> Self {
        debug_assert!(root >= 1 && !content.is_negative());
        if root == 1 {
            return Self::rational(coefficient * content);
        }
        if content.is_zero() || content.is_one() {
            return Self::from_parts(coefficient * content, 1, Rational::one());
        }
        if coefficient.is_zero() {
            return Self::zero();
        }
        Self::reduce(coefficient, root, &content)
    }

    /// Stores already canonical parts, mapping a zero coefficient to zero.
    fn from_parts(coefficient: Rational, root: u32, content: Rational) -> Self {
        if coefficient.is_zero() {
            return Self {
                coefficient,
                root: 1,
                content: Rational::one(),
            };
        }
        Self {
            coefficient,
            root,
            content,
        }
    }

    fn reduce(coefficient: Rational, root: u32, content: &Rational) -> Self {
        let mut numerator = factor(&content.numerator());
        let mut denominator = factor(&content.denominator());

        let mut new_root = 1;
        let primes = factor(&Integer::from(root))
            .iter()
            .filter_map(|(p, m)| p.to_u32().map(|p| (p, m)))
            .collect::<Vec<_>>();
        for (prime, multiplicity) in primes {
            for _ in 0..multiplicity {
                match (numerator.reduce(prime), denominator.reduce(prime)) {
                    (Some(n), Some(d)) => {
                        numerator = n;
                        denominator = d;
                    }
                    _ => new_root *= prime,
                }
            }
        }

        let (outside_numer, inside_numer) = numerator.exact_root(new_root);
        let (outside_denom, inside_denom) = denominator.exact_root(new_root);
        trace!(root, new_root, "radical reduced");

        let coefficient = coefficient * Rational::new(outside_numer, outside_denom);
        let content = Rational::new(inside_numer, inside_denom);
        if new_root == 1 || content.is_one() {
            return Self::rational(coefficient);
        }
        Self::from_parts(coefficient, new_root, content)
    }

    /// Returns the rational coefficient.
    #[must_use]
    pub fn coefficient(&self) -> &Rational {
        &self.coefficient
    }

    /// Returns the root index.
    #[must_use]
    pub fn root(&self) -> u32 {
        self.root
    }

    /// Returns the radicand.
    #[must_use]
    pub fn content(&self) -> &Rational {
        &self.content
    }

    /// Returns true for the zero term.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Returns true if the term is rational.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        self.root == 1
    }

    /// Returns the value if the term is rational.
    #[must_use]
    pub fn as_rational(&self) -> Option<&Rational> {
        self.is_rational().then_some(&self.coefficient)
    }

    /// Returns true if both terms share root and radicand, so they add.
    #[must_use]
    pub fn commensurable_with(&self, other: &Self) -> bool {
        self.root == other.root && self.content == other.content
    }

    /// Adds two commensurable terms.
    ///
    /// Returns `None` when the terms have different radicals; such a pair
    /// only has a [`RadicalSum`](crate::RadicalSum) representation.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.commensurable_with(other).then(|| {
            Self::from_parts(
                &self.coefficient + &other.coefficient,
                self.root,
                self.content.clone(),
            )
        })
    }

    /// Multiplies two terms over the least common root.
    ///
    /// # Errors
    ///
    /// Returns [`RadicalError::RootTooLarge`] if the combined root overflows.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, RadicalError> {
        let d = gcd_u32(self.root, other.root);
        let root = (self.root / d)
            .checked_mul(other.root)
            .ok_or(RadicalError::RootTooLarge)?;
        let content = self.content.pow(other.root / d) * other.content.pow(self.root / d);
        Ok(Self::assemble(
            &self.coefficient * &other.coefficient,
            root,
            content,
        ))
    }

    /// Multiplies the coefficient by a rational.
    #[must_use]
    pub fn scale(&self, factor: &Rational) -> Self {
        Self::from_parts(
            &self.coefficient * factor,
            self.root,
            self.content.clone(),
        )
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::from_parts(self.coefficient.abs(), self.root, self.content.clone())
    }

    /// Returns `1 / self` as `(1/k) * (1/c)^(1/r)`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for the zero term.
    pub fn recip(&self) -> Result<Self, RadicalError> {
        let coefficient = self.coefficient.checked_recip()?;
        if self.is_rational() {
            return Ok(Self::rational(coefficient));
        }
        Ok(Self::assemble(coefficient, self.root, self.content.recip()))
    }

    /// Divides by another term.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for a zero divisor and
    /// [`RadicalError::RootTooLarge`] if the combined root overflows.
    pub fn checked_div(&self, other: &Self) -> Result<Self, RadicalError> {
        self.checked_mul(&other.recip()?)
    }

    /// Computes `k^n * (c^n)^(1/r)`.
    #[must_use]
    pub fn powi(&self, exp: u32) -> Self {
        if self.is_rational() {
            return Self::rational(self.coefficient.pow(exp));
        }
        Self::assemble(self.coefficient.pow(exp), self.root, self.content.pow(exp))
    }

    /// Raises to an integer power; negative powers go through [`recip`](Self::recip).
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for a negative power of
    /// zero and [`ArithmeticError::Unsupported`] for exponents beyond `u32`.
    pub fn checked_powi(&self, exp: i64) -> Result<Self, RadicalError> {
        let magnitude = u32::try_from(exp.unsigned_abs())
            .map_err(|_| ArithmeticError::Unsupported(format!("exponent {exp} is too large")))?;
        if exp < 0 {
            Ok(self.recip()?.powi(magnitude))
        } else {
            Ok(self.powi(magnitude))
        }
    }

    /// Raises to a rational power `p/q`.
    ///
    /// With `e = (p/q) / root` the result is
    /// `(k^p)^(1/q) * (c^(e.numer))^(1/e.denom)`, both factors reduced.
    ///
    /// # Errors
    ///
    /// Returns [`RadicalError::EvenRootOfNegative`] for an even `q` and a
    /// negative `k^p`, [`RadicalError::RootTooLarge`] when the combined root
    /// overflows, and [`ArithmeticError::DivisionByZero`] for a negative
    /// power of zero.
    pub fn checked_pow(&self, exp: &Rational) -> Result<Self, RadicalError> {
        let too_large = || ArithmeticError::Unsupported(format!("exponent {exp} is too large"));
        if exp.is_integer() {
            return self.checked_powi(exp.numerator().to_i64().ok_or_else(too_large)?);
        }
        let p = exp.numerator().to_i64().ok_or_else(too_large)?;
        let q = exp.denominator().to_u32().ok_or(RadicalError::RootTooLarge)?;
        let e = exp / &Rational::from(Integer::from(self.root));
        let e_numer = e.numerator().to_i64().ok_or_else(too_large)?;
        let e_denom = e.denominator().to_u32().ok_or(RadicalError::RootTooLarge)?;

        let outer = Self::reduced(Rational::one(), q, self.coefficient.checked_powi(p)?)?;
        let inner = Self::reduced(Rational::one(), e_denom, self.content.checked_powi(e_numer)?)?;
        outer.checked_mul(&inner)
    }

    /// Decimal approximation with `places` fractional digits.
    ///
    /// The root of the content is approximated with enough guard digits to
    /// absorb the coefficient's numerator, then the product is rounded once.
    #[must_use]
    pub fn to_decimal(&self, places: u32) -> Decimal {
        if self.is_rational() {
            return self.coefficient.to_decimal(places);
        }
        let numer = self.coefficient.numerator();
        let guard = places + GUARD_DIGITS + numer.decimal_digits() as u32;
        // The content is positive and the root at least 2, so this cannot fail.
        let root = self
            .content
            .approx_nth_root(self.root, guard)
            .unwrap_or_default();
        Decimal::from_ratio(
            &(numer * root.numerator()),
            &(self.coefficient.denominator() * root.denominator()),
            places,
        )
    }
}

/// Greatest common divisor of root indices.
pub(crate) fn gcd_u32(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of root indices, `None` on overflow.
pub(crate) fn lcm_u32(a: u32, b: u32) -> Option<u32> {
    (a / gcd_u32(a, b)).checked_mul(b)
}

impl Default for RadicalTerm {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Rational> for RadicalTerm {
    fn from(value: Rational) -> Self {
        Self::rational(value)
    }
}

impl From<i64> for RadicalTerm {
    fn from(value: i64) -> Self {
        Self::rational(Rational::from(value))
    }
}

impl Neg for RadicalTerm {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            coefficient: -self.coefficient,
            root: self.root,
            content: self.content,
        }
    }
}

impl Neg for &RadicalTerm {
    type Output = RadicalTerm;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl Mul for &RadicalTerm {
    type Output = RadicalTerm;

    /// # Panics
    ///
    /// Panics if the combined root overflows `u32`; see `checked_mul`.
    fn mul(self, rhs: &RadicalTerm) -> RadicalTerm {
        match self.checked_mul(rhs) {
            Ok(product) => product,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Mul for RadicalTerm {
    type Output = RadicalTerm;

    fn mul(self, rhs: RadicalTerm) -> RadicalTerm {
        &self * &rhs
    }
}

impl PartialOrd for RadicalTerm {
    /// Compares decimal approximations; `None` if two different terms agree
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

impl fmt::Display for RadicalTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rational() {
            return write!(f, "{}", self.coefficient);
        }
        if self.coefficient.is_one() {
            write!(f, "({})^(1/{})", self.content, self.root)
        } else if self.coefficient == -1 {
            write!(f, "-({})^(1/{})", self.content, self.root)
        } else {
            write!(f, "{}*({})^(1/{})", self.coefficient, self.content, self.root)
        }
    }
}
