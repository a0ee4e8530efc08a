//! Exact fractions of big integers.
//!
//! This module provides exact rational arithmetic on top of `dashu`'s
//! [`RBig`], which keeps values in lowest terms with a positive denominator.
//! Every constructor and operator then applies the [`RationalPolicy`]
//! magnitude bound.

use dashu::base::{Abs, Inverse, Signed as DashuSigned};
use dashu::float::{round::mode::HalfAway, Context, DBig};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use tracing::{debug, trace};

use crate::decimal::DEFAULT_DECIMAL_PLACES;
use crate::{ArithmeticError, Decimal, Integer, RationalPolicy};

/// Largest decimal exponent accepted when parsing `1.5e-3` style input.
pub const MAX_PARSE_EXPONENT: u32 = 10_000;

/// Radicands whose scaled integer root would exceed this many digits are
/// evaluated through `exp(ln(x) / n)` instead.
const MAX_EXACT_ROOT_DIGITS: usize = 4096;

/// Extra significant digits carried by the floating point root.
const FLOAT_ROOT_GUARD_DIGITS: usize = 4;

/// A fraction of big integers in lowest terms.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Builds `numerator / denominator` under the default policy.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        Self::reduce(numerator, denominator, &RationalPolicy::default())
    }

    /// Creates a new rational, reporting a zero denominator as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if the denominator is zero.
    pub fn try_new(numerator: Integer, denominator: Integer) -> Result<Self, ArithmeticError> {
        Self::with_policy(numerator, denominator, &RationalPolicy::default())
    }

    /// Creates a new rational reduced under a caller supplied policy.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if the denominator is zero.
    pub fn with_policy(
        numerator: Integer,
        denominator: Integer,
        policy: &RationalPolicy,
    ) -> Result<Self, ArithmeticError> {
        if denominator.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(Self::reduce(numerator, denominator, policy))
    }

    /// Lifts an integer.
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Builds a fraction of machine integers.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    fn reduce(numer: Integer, denom: Integer, policy: &RationalPolicy) -> Self {
        Self::bounded(
            RBig::from_parts_signed(numer.into_inner(), denom.into_inner()),
            policy,
        )
    }

    /// Applies the magnitude bound to an already reduced value.
    fn bounded(value: RBig, policy: &RationalPolicy) -> Self {
        let denom = Integer::from(value.denominator().clone());
        if policy.exceeds(&denom) {
            let numer = Integer::from(value.numerator().clone());
            return Self::degrade(&numer, &denom, policy.significant_digits);
        }
        Self(value)
    }

    /// Rounds `numer / denom` half-up to `digits` significant decimal digits
    /// and stores the exact ratio of the result without re-checking the bound.
    fn degrade(numer: &Integer, denom: &Integer, digits: u32) -> Self {
        if numer.is_zero() {
            return Self::zero();
        }
        let digits = digits.max(1);
        let magnitude = numer.abs();
        let mut shift = i64::from(digits)
            - (magnitude.decimal_digits() as i64 - denom.decimal_digits() as i64);
        let (mut quotient, mut remainder, mut divisor) = scaled_quotient(&magnitude, denom, shift);
        if quotient.decimal_digits() < digits as usize {
            shift += 1;
            (quotient, remainder, divisor) = scaled_quotient(&magnitude, denom, shift);
        }
        if &remainder * &Integer::new(2) >= divisor {
            quotient = quotient + Integer::one();
        }
        if numer.is_negative() {
            quotient = -quotient;
        }

        let degraded = if shift >= 0 {
            Self::reduce(quotient, Integer::ten_pow(shift as u32), &RationalPolicy::exact())
        } else {
            Self::from_integer(quotient * Integer::ten_pow(shift.unsigned_abs() as u32))
        };
        debug!(
            denominator_digits = denom.decimal_digits(),
            digits, "rational degraded to a rounded decimal"
        );
        degraded
    }

    /// The reduced numerator, carrying the sign.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Returns the denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(self.0.denominator().clone())
    }

    /// Returns true when the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.is_int()
    }

    /// Returns the numerator of an integral value.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        self.is_integer().then(|| self.numerator())
    }

    /// Returns `|self|`.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns `1 / self`.
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Returns the reciprocal, reporting zero as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if the rational is zero.
    pub fn checked_recip(&self) -> Result<Self, ArithmeticError> {
        if self.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(Self(self.0.clone().inv()))
    }

    /// Divides, reporting a zero divisor as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self, ArithmeticError> {
        Ok(self * &other.checked_recip()?)
    }

    /// Returns -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if self.is_negative() {
            -1
        } else {
            1
        }
    }

    /// Returns true below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.0.is_zero() && DashuSigned::is_positive(&self.0)
    }

    /// Raises to a machine exponent.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self::bounded(self.0.pow(exp as usize), &RationalPolicy::default())
    }

    /// Raises to a signed exponent; negative exponents invert first.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for a negative power of
    /// zero and [`ArithmeticError::Unsupported`] for exponents beyond `u32`.
    pub fn checked_powi(&self, exp: i64) -> Result<Self, ArithmeticError> {
        let magnitude = u32::try_from(exp.unsigned_abs())
            .map_err(|_| ArithmeticError::Unsupported(format!("exponent {exp} is too large")))?;
        if exp < 0 {
            Ok(self.checked_recip()?.pow(magnitude))
        } else {
            Ok(self.pow(magnitude))
        }
    }

    /// Raises to a rational exponent when the result stays rational.
    ///
    /// `x^(p/q)` succeeds only when numerator and denominator of `x` are
    /// exact `q`-th powers.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Unsupported`] when the result is not
    /// rational, and [`ArithmeticError::DivisionByZero`] for a negative power
    /// of zero.
    pub fn checked_pow(&self, exp: &Self) -> Result<Self, ArithmeticError> {
        let too_large = || ArithmeticError::Unsupported(format!("exponent {exp} is too large"));
        let p = exp.numerator().to_i64().ok_or_else(too_large)?;
        if exp.is_integer() {
            return self.checked_powi(p);
        }
        let q = exp.denominator().to_u32().ok_or_else(too_large)?;
        let not_rational = || ArithmeticError::Unsupported(format!("({self})^({exp}) is not rational"));
        let numer = self.numerator().exact_nth_root(q).ok_or_else(not_rational)?;
        let denom = self.denominator().exact_nth_root(q).ok_or_else(not_rational)?;
        Self::reduce(numer, denom, &RationalPolicy::exact()).checked_powi(p)
    }

    /// Approximates `self^(1/n)` as a terminating decimal with an error
    /// below `10^-places`.
    ///
    /// Small roots are taken exactly on scaled integers and truncated. Once
    /// the scaled radicand would grow past a few thousand digits the root is
    /// evaluated with `dashu` floats at a working precision that does not
    /// depend on `n`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Unsupported`] for `n = 0` and for even
    /// roots of negative values.
    pub fn approx_nth_root(&self, n: u32, places: u32) -> Result<Self, ArithmeticError> {
        if n == 0 {
            return Err(ArithmeticError::Unsupported("zeroth root".to_string()));
        }
        if self.is_negative() {
            if n % 2 == 0 {
                return Err(ArithmeticError::Unsupported(format!(
                    "even root of negative rational {self}"
                )));
            }
            return Ok(-self.abs().approx_nth_root(n, places)?);
        }
        if n == 1 || self.is_zero() {
            return Ok(self.clone());
        }

        let (numer, denom) = (self.numerator(), self.denominator());
        let whole_digits =
            numer.decimal_digits().saturating_sub(denom.decimal_digits()) / n as usize + 1;
        let precision = places as usize + whole_digits;
        let scaled_digits = (n as usize).saturating_mul(precision + denom.decimal_digits());
        if scaled_digits <= MAX_EXACT_ROOT_DIGITS {
            // (a/b)^(1/n) = (a * b^(n-1))^(1/n) / b
            let radicand = &numer * &denom.pow(n - 1) * Integer::ten_pow(n * places);
            let root = radicand.nth_root_floor(n)?;
            return Self::with_policy(root, denom * Integer::ten_pow(places), &RationalPolicy::exact());
        }

        trace!(root = n, precision, "evaluating root in floating point");
        let context = Context::<HalfAway>::new(precision + FLOAT_ROOT_GUARD_DIGITS);
        let radicand = context
            .div(DBig::from(numer.into_inner()).repr(), DBig::from(denom.into_inner()).repr())
            .value();
        let exponent = context.div(DBig::ONE.repr(), DBig::from(n).repr()).value();
        let root = context.powf(radicand.repr(), exponent.repr()).value();

        let significand = Integer::from(root.repr().significand().clone());
        let shift = root.repr().exponent();
        let scale = u32::try_from(shift.unsigned_abs())
            .map_err(|_| ArithmeticError::Unsupported(format!("root of {self} is out of range")))?;
        if shift >= 0 {
            Ok(Self::from_integer(significand * Integer::ten_pow(scale)))
        } else {
            Self::with_policy(significand, Integer::ten_pow(scale), &RationalPolicy::exact())
        }
    }

    /// Computes the rational gcd `gcd(a, c) / lcm(b, d)` of `a/b` and `c/d`.
    ///
    /// Both quotients `self / g` and `other / g` are integers.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }
        Self::reduce(
            self.numerator().gcd(&other.numerator()),
            self.denominator().lcm(&other.denominator()),
            &RationalPolicy::exact(),
        )
    }

    /// Rounds half-up to `places` decimal places.
    #[must_use]
    pub fn round(&self, places: u32) -> Self {
        Self::from(self.to_decimal(places))
    }

    /// Returns the decimal approximation with `places` fractional digits.
    #[must_use]
    pub fn to_decimal(&self, places: u32) -> Decimal {
        Decimal::from_ratio(&self.numerator(), &self.denominator(), places)
    }

    /// Returns the nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let extra = self
            .denominator()
            .decimal_digits()
            .saturating_sub(self.numerator().decimal_digits()) as u32;
        self.to_decimal(DEFAULT_DECIMAL_PLACES + extra).to_f64()
    }

    /// Unwraps into the underlying `RBig`.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.0
    }

    /// Borrows the underlying `RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }
}

fn scaled_quotient(magnitude: &Integer, denom: &Integer, shift: i64) -> (Integer, Integer, Integer) {
    let exp = shift.unsigned_abs() as u32;
    let (numer, divisor) = if shift >= 0 {
        (magnitude * &Integer::ten_pow(exp), denom.clone())
    } else {
        (magnitude.clone(), denom * &Integer::ten_pow(exp))
    };
    let (quotient, remainder) = numer.div_mod_floor(&divisor);
    (quotient, remainder, divisor)
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0.is_one()
    }
}

impl PartialEq<i64> for Rational {
    fn eq(&self, other: &i64) -> bool {
        self.0 == RBig::from(*other)
    }
}

impl PartialOrd<i64> for Rational {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.0.cmp(&RBig::from(*other)))
    }
}

impl PartialEq<f64> for Rational {
    fn eq(&self, other: &f64) -> bool {
        Self::try_from(*other).is_ok_and(|value| *self == value)
    }
}

impl PartialOrd<f64> for Rational {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        match Self::try_from(*other) {
            Ok(value) => Some(self.cmp(&value)),
            Err(_) if other.is_nan() => None,
            Err(_) if *other > 0.0 => Some(Ordering::Less),
            Err(_) => Some(Ordering::Greater),
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.0.numerator())
        } else {
            write!(f, "{}/{}", self.0.numerator(), self.0.denominator())
        }
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                Rational::bounded($trait::$method(self.0, rhs.0), &RationalPolicy::default())
            }
        }

        impl $trait<&Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational::bounded($trait::$method(self.0, &rhs.0), &RationalPolicy::default())
            }
        }

        impl $trait<Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                Rational::bounded($trait::$method(&self.0, rhs.0), &RationalPolicy::default())
            }
        }

        impl $trait for &Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational::bounded($trait::$method(&self.0, &rhs.0), &RationalPolicy::default())
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
// Panics on a zero divisor, like integer division; see `checked_div`.
forward_binop!(Div, div);

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl Sum for Rational {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Rational> for Rational {
    fn sum<I: Iterator<Item = &'a Rational>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self(RBig::from(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self(RBig::from(n))
    }
}

impl From<Decimal> for Rational {
    fn from(d: Decimal) -> Self {
        Self::reduce(
            d.mantissa().clone(),
            Integer::ten_pow(d.scale()),
            &RationalPolicy::exact(),
        )
    }
}

impl From<RBig> for Rational {
    fn from(value: RBig) -> Self {
        Self::bounded(value, &RationalPolicy::default())
    }
}

impl TryFrom<f64> for Rational {
    type Error = ArithmeticError;

    /// Converts the exact binary value of a finite float.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        RBig::try_from(value)
            .map(Self)
            .map_err(|_| ArithmeticError::NonFinite(value))
    }
}

impl FromStr for Rational {
    type Err = ArithmeticError;

    /// Parses `7`, `-13.33`, `1.5e-3` or `7/8` exactly.
    ///
    /// Exponents beyond [`MAX_PARSE_EXPONENT`] are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || ArithmeticError::Parse(s.to_string());

        if let Some((numer, denom)) = text.split_once('/') {
            let numer: Integer = numer.trim().parse().map_err(|_| invalid())?;
            let denom: Integer = denom.trim().parse().map_err(|_| invalid())?;
            return Self::with_policy(numer, denom, &RationalPolicy::exact());
        }

        let (body, exponent) = match text.find(['e', 'E']) {
            Some(at) => {
                let exponent: i64 = text[at + 1..].parse().map_err(|_| invalid())?;
                if exponent.unsigned_abs() > u64::from(MAX_PARSE_EXPONENT) {
                    return Err(invalid());
                }
                (&text[..at], exponent)
            }
            None => (text, 0),
        };
        let (sign, unsigned) = match body.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", body.strip_prefix('+').unwrap_or(body)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit());
        if !all_digits || (whole.is_empty() && fraction.is_empty()) {
            return Err(invalid());
        }

        let mantissa: Integer = format!("{sign}{whole}{fraction}").parse().map_err(|_| invalid())?;
        let scale = fraction.len() as i64 - exponent;
        let exp = u32::try_from(scale.unsigned_abs()).map_err(|_| invalid())?;
        if scale >= 0 {
            Self::with_policy(mantissa, Integer::ten_pow(exp), &RationalPolicy::exact())
        } else {
            Ok(Self::from_integer(mantissa * Integer::ten_pow(exp)))
        }
    }
}
