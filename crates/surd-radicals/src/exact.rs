//! A closed exact-number type over rationals, radical terms and radical sums.
//!
//! Every operation resolves the pair of operand kinds once, lifts both
//! operands to the larger kind, and demotes the result to the simplest kind
//! that holds it: a one-term sum becomes a term and a rational term becomes a
//! rational.

use num_traits::Zero;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use surd_integers::{ArithmeticError, Decimal, Rational};

use crate::term::COMPARISON_PLACES;
use crate::{RadicalError, RadicalSum, RadicalTerm};

/// The kind of an [`ExactNumber`], ordered by generality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// A rational number.
    Rational,
    /// A single radical term.
    Term,
    /// A sum of radical terms.
    Sum,
}

/// An exact real number in its simplest representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExactNumber {
    /// A rational number.
    Rational(Rational),
    /// An irrational radical term.
    Term(RadicalTerm),
    /// A sum of at least two incommensurable terms.
    Sum(RadicalSum),
}

/// Both operands of a binary operation lifted to a common kind.
enum Promoted {
    Rational(Rational, Rational),
    Term(RadicalTerm, RadicalTerm),
    Sum(RadicalSum, RadicalSum),
}

impl ExactNumber {
    /// Returns the kind tag.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Rational(_) => Kind::Rational,
            Self::Term(_) => Kind::Term,
            Self::Sum(_) => Kind::Sum,
        }
    }

    /// Demotes to the simplest representation.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Sum(sum) => {
                if let Some(term) = sum.single_term() {
                    return Self::Term(term.clone()).normalized();
                }
                Self::Sum(sum)
            }
            Self::Term(term) => {
                if let Some(value) = term.as_rational() {
                    return Self::Rational(value.clone());
                }
                Self::Term(term)
            }
            rational @ Self::Rational(_) => rational,
        }
    }

    /// Returns the value if it is rational.
    #[must_use]
    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Self::Rational(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Rational(value) => value.is_zero(),
            Self::Term(term) => term.is_zero(),
            Self::Sum(sum) => sum.is_zero(),
        }
    }

    fn into_sum(self) -> RadicalSum {
        match self {
            Self::Rational(value) => RadicalSum::from(value),
            Self::Term(term) => RadicalSum::from(term),
            Self::Sum(sum) => sum,
        }
    }

    /// Lifts both operands to the more general of their two kinds.
    fn promote(lhs: Self, rhs: Self) -> Promoted {
        match (lhs, rhs) {
            (Self::Rational(a), Self::Rational(b)) => Promoted::Rational(a, b),
            (Self::Rational(a), Self::Term(b)) => Promoted::Term(RadicalTerm::rational(a), b),
            (Self::Term(a), Self::Rational(b)) => Promoted::Term(a, RadicalTerm::rational(b)),
            (Self::Term(a), Self::Term(b)) => Promoted::Term(a, b),
            (a, b) => Promoted::Sum(a.into_sum(), b.into_sum()),
        }
    }

    /// Multiplies, reporting root overflow.
    ///
    /// # Errors
    ///
    /// Returns [`RadicalError::RootTooLarge`] if a combined root overflows.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, RadicalError> {
        let product = match Self::promote(self.clone(), other.clone()) {
            Promoted::Rational(a, b) => Self::Rational(a * b),
            Promoted::Term(a, b) => Self::Term(a.checked_mul(&b)?),
            Promoted::Sum(a, b) => Self::Sum(a.checked_mul(&b)?),
        };
        Ok(product.normalized())
    }

    /// Returns the reciprocal.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for zero and
    /// [`RadicalError::UnsupportedDenesting`] for sums of three or more terms.
    pub fn recip(&self) -> Result<Self, RadicalError> {
        let inverse = match self {
            Self::Rational(value) => Self::Rational(value.checked_recip()?),
            Self::Term(term) => Self::Term(term.recip()?),
            Self::Sum(sum) => Self::Sum(sum.limited_flip()?),
        };
        Ok(inverse.normalized())
    }

    /// Divides by another exact number.
    ///
    /// # Errors
    ///
    /// As [`recip`](Self::recip) applied to `other`, plus root overflow.
    pub fn checked_div(&self, other: &Self) -> Result<Self, RadicalError> {
        if other.is_zero() {
            return Err(ArithmeticError::DivisionByZero.into());
        }
        self.checked_mul(&other.recip()?)
    }

    /// Raises to a rational power.
    ///
    /// A rational base with a non-rational result becomes a radical term.
    ///
    /// # Errors
    ///
    /// As [`RadicalTerm::checked_pow`] and [`RadicalSum::checked_pow`].
    pub fn checked_pow(&self, exp: &Rational) -> Result<Self, RadicalError> {
        let power = match self {
            Self::Rational(value) => match value.checked_pow(exp) {
                Ok(exact) => Self::Rational(exact),
                Err(ArithmeticError::Unsupported(_)) => {
                    Self::Term(RadicalTerm::rational(value.clone()).checked_pow(exp)?)
                }
                Err(e) => return Err(e.into()),
            },
            Self::Term(term) => Self::Term(term.checked_pow(exp)?),
            Self::Sum(sum) => Self::Sum(sum.checked_pow(exp)?),
        };
        Ok(power.normalized())
    }

    /// Decimal approximation with `places` fractional digits.
    #[must_use]
    pub fn to_decimal(&self, places: u32) -> Decimal {
        match self {
            Self::Rational(value) => value.to_decimal(places),
            Self::Term(term) => term.to_decimal(places),
            Self::Sum(sum) => sum.to_decimal(places),
        }
    }
}

impl Default for ExactNumber {
    fn default() -> Self {
        Self::Rational(Rational::zero())
    }
}

impl From<Rational> for ExactNumber {
    fn from(value: Rational) -> Self {
        Self::Rational(value)
    }
}

impl From<i64> for ExactNumber {
    fn from(value: i64) -> Self {
        Self::Rational(Rational::from(value))
    }
}

impl From<RadicalTerm> for ExactNumber {
    fn from(term: RadicalTerm) -> Self {
        Self::Term(term).normalized()
    }
}

impl From<RadicalSum> for ExactNumber {
    fn from(sum: RadicalSum) -> Self {
        Self::Sum(sum).normalized()
    }
}

impl Add for ExactNumber {
    type Output = ExactNumber;

    fn add(self, rhs: ExactNumber) -> ExactNumber {
        let sum = match Self::promote(self, rhs) {
            Promoted::Rational(a, b) => Self::Rational(a + b),
            Promoted::Term(a, b) => match a.checked_add(&b) {
                Some(term) => Self::Term(term),
                None => Self::Sum(RadicalSum::from_terms([a, b])),
            },
            Promoted::Sum(a, b) => Self::Sum(a + b),
        };
        sum.normalized()
    }
}

impl Neg for ExactNumber {
    type Output = ExactNumber;

    fn neg(self) -> ExactNumber {
        match self {
            Self::Rational(value) => Self::Rational(-value),
            Self::Term(term) => Self::Term(-term),
            Self::Sum(sum) => Self::Sum(-sum),
        }
    }
}

impl Sub for ExactNumber {
    type Output = ExactNumber;

    fn sub(self, rhs: ExactNumber) -> ExactNumber {
        self + -rhs
    }
}

impl Mul for ExactNumber {
    type Output = ExactNumber;

    /// # Panics
    ///
    /// Panics if a combined root overflows `u32`; see `checked_mul`.
    fn mul(self, rhs: ExactNumber) -> ExactNumber {
        match self.checked_mul(&rhs) {
            Ok(product) => product,
            Err(e) => panic!("{e}"),
        }
    }
}

impl PartialOrd for ExactNumber {
    /// Exact for two rationals, otherwise compares decimal approximations.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if let (Self::Rational(a), Self::Rational(b)) = (self, other) {
            return Some(a.cmp(b));
        }
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

impl fmt::Display for ExactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(value) => write!(f, "{value}"),
            Self::Term(term) => write!(f, "{term}"),
            Self::Sum(sum) => write!(f, "{sum}"),
        }
    }
}
