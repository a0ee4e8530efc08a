//! Linear equations over a shared, ordered variable list.

use num_traits::{One, Zero};
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use surd_integers::Rational;

use crate::{LinearError, Point};

/// Where the first nonzero entry of an equation sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Leading {
    /// The first nonzero coefficient is at this column.
    Pivot(usize),
    /// Every coefficient is zero but the value is not: `0 = c`.
    Inconsistent,
    /// Every coefficient and the value are zero: `0 = 0`.
    Trivial,
}

/// A linear equation `sum(c_i * x_i) = value`.
///
/// Coefficients are dense and aligned with `variables`. The variable list is
/// shared by every equation of a system.
///
/// Equality and hashing compare hyperplanes: `x + y = 1` equals
/// `2x + 2y = 2`.
#[derive(Clone, Debug)]
pub struct MultiDimensionalEquation {
    variables: Arc<[String]>,
    coefficients: Vec<Rational>,
    value: Rational,
}

impl MultiDimensionalEquation {
    /// Builds an equation from `name -> coefficient` pairs.
    ///
    /// Names that are absent have coefficient zero. A repeated name keeps its
    /// last coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::UnknownVariable`] for a nonzero coefficient on
    /// a name outside `variables`.
    pub fn new<K, I>(
        mapping: I,
        value: Rational,
        variables: Arc<[String]>,
    ) -> Result<Self, LinearError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Rational)>,
    {
        let lookup: FxHashMap<&str, usize> = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.as_str(), i))
            .collect();
        let mut coefficients = vec![Rational::zero(); variables.len()];
        for (name, coefficient) in mapping {
            match lookup.get(name.as_ref()) {
                Some(&i) => coefficients[i] = coefficient,
                None if coefficient.is_zero() => {}
                None => return Err(LinearError::UnknownVariable(name.as_ref().to_string())),
            }
        }
        Ok(Self {
            variables,
            coefficients,
            value,
        })
    }

    /// Builds an equation from coefficients already aligned with `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::VariableMismatch`] if the lengths differ.
    pub fn from_coefficients(
        variables: Arc<[String]>,
        coefficients: Vec<Rational>,
        value: Rational,
    ) -> Result<Self, LinearError> {
        if coefficients.len() != variables.len() {
            return Err(LinearError::VariableMismatch);
        }
        Ok(Self {
            variables,
            coefficients,
            value,
        })
    }

    /// Returns the shared variable list.
    #[must_use]
    pub fn variables(&self) -> &Arc<[String]> {
        &self.variables
    }

    /// Returns the coefficients in variable order.
    #[must_use]
    pub fn coefficients(&self) -> &[Rational] {
        &self.coefficients
    }

    /// Returns the right-hand side.
    #[must_use]
    pub fn value(&self) -> &Rational {
        &self.value
    }

    /// Returns the coefficient of a named variable, zero if absent.
    #[must_use]
    pub fn val(&self, variable: &str) -> Rational {
        self.variables
            .iter()
            .position(|v| v == variable)
            .map_or_else(Rational::zero, |i| self.coefficients[i].clone())
    }

    /// Returns the coefficient at a column.
    #[must_use]
    pub fn coefficient(&self, index: usize) -> Option<&Rational> {
        self.coefficients.get(index)
    }

    /// Returns the first nonzero column.
    ///
    /// An all-zero row returns `len` if it is inconsistent (`0 = c`) and
    /// `len + 1` if it is trivial (`0 = 0`), so sorting by this key puts
    /// inconsistent rows before trivial ones.
    #[must_use]
    pub fn first_non_zero(&self) -> usize {
        match self.leading() {
            Leading::Pivot(j) => j,
            Leading::Inconsistent => self.coefficients.len(),
            Leading::Trivial => self.coefficients.len() + 1,
        }
    }

    /// Returns the typed view of [`first_non_zero`](Self::first_non_zero).
    #[must_use]
    pub fn leading(&self) -> Leading {
        match self.coefficients.iter().position(|c| !c.is_zero()) {
            Some(j) => Leading::Pivot(j),
            None if self.value.is_zero() => Leading::Trivial,
            None => Leading::Inconsistent,
        }
    }

    /// Returns the number of nonzero coefficients.
    #[must_use]
    pub fn non_zero_count(&self) -> usize {
        self.coefficients.iter().filter(|c| !c.is_zero()).count()
    }

    /// Reprojects onto another variable list; missing entries are zero.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::UnknownVariable`] if a nonzero coefficient has
    /// no place in `variables`.
    pub fn with_variables(&self, variables: Arc<[String]>) -> Result<Self, LinearError> {
        Self::new(
            self.variables
                .iter()
                .zip(&self.coefficients)
                .map(|(v, c)| (v.as_str(), c.clone())),
            self.value.clone(),
            variables,
        )
    }

    pub(crate) fn share_variables(&mut self, variables: &Arc<[String]>) {
        debug_assert_eq!(*self.variables, **variables);
        self.variables = Arc::clone(variables);
    }

    fn same_variables(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.variables, &other.variables) || self.variables == other.variables
    }

    /// Adds two equations over the same variable list.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::VariableMismatch`] for different lists.
    pub fn checked_add(&self, other: &Self) -> Result<Self, LinearError> {
        self.linear_combination(&Rational::one(), other, &Rational::one())
    }

    /// Subtracts two equations over the same variable list.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::VariableMismatch`] for different lists.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, LinearError> {
        self.linear_combination(&Rational::one(), other, &-Rational::one())
    }

    /// Computes `a * self + b * other`.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::VariableMismatch`] for different lists.
    pub fn linear_combination(
        &self,
        a: &Rational,
        other: &Self,
        b: &Rational,
    ) -> Result<Self, LinearError> {
        if !self.same_variables(other) {
            return Err(LinearError::VariableMismatch);
        }
        let coefficients = self
            .coefficients
            .iter()
            .zip(&other.coefficients)
            .map(|(x, y)| a * x + b * y)
            .collect();
        Ok(Self {
            variables: Arc::clone(&self.variables),
            coefficients,
            value: a * &self.value + b * &other.value,
        })
    }

    /// Multiplies every entry by a scalar.
    #[must_use]
    pub fn scale(&self, factor: &Rational) -> Self {
        Self {
            variables: Arc::clone(&self.variables),
            coefficients: self.coefficients.iter().map(|c| c * factor).collect(),
            value: &self.value * factor,
        }
    }

    /// Divides every entry by a scalar.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] for a zero divisor.
    pub fn checked_div_scalar(&self, divisor: &Rational) -> Result<Self, LinearError> {
        Ok(self.scale(&divisor.checked_recip()?))
    }

    /// Divides by the rational gcd of all entries, value included.
    ///
    /// The result has integer entries with no common factor.
    #[must_use]
    pub fn primitive(&self) -> Self {
        let g = self
            .coefficients
            .iter()
            .chain(std::iter::once(&self.value))
            .fold(Rational::zero(), |g, c| g.gcd(c));
        match g.checked_recip() {
            Ok(inverse) if !g.is_one() => self.scale(&inverse),
            _ => self.clone(),
        }
    }

    /// Evaluates `sum(c_i * x_i) - value` at a point; absent variables are zero.
    #[must_use]
    pub fn residual(&self, point: &Point) -> Rational {
        let lhs: Rational = self
            .variables
            .iter()
            .zip(&self.coefficients)
            .filter(|(_, c)| !c.is_zero())
            .map(|(v, c)| c * &point.get(v))
            .sum();
        lhs - &self.value
    }

    /// Returns true if the point lies on the hyperplane.
    #[must_use]
    pub fn is_satisfied_by(&self, point: &Point) -> bool {
        self.residual(point).is_zero()
    }

    /// Scale-free key: sorted nonzero `(name, coefficient)` pairs divided by
    /// the first coefficient, and the value divided likewise.
    fn normal_form(&self) -> (Vec<(&str, Rational)>, Rational) {
        let mut pairs: Vec<(&str, &Rational)> = self
            .variables
            .iter()
            .zip(&self.coefficients)
            .filter(|(_, c)| !c.is_zero())
            .map(|(v, c)| (v.as_str(), c))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let Some(&(_, first)) = pairs.first() else {
            let value = if self.value.is_zero() {
                Rational::zero()
            } else {
                Rational::one()
            };
            return (Vec::new(), value);
        };
        let scale = first.recip();
        let normalized = pairs.iter().map(|&(v, c)| (v, c * &scale)).collect();
        (normalized, &self.value * &scale)
    }
}

impl PartialEq for MultiDimensionalEquation {
    fn eq(&self, other: &Self) -> bool {
        self.normal_form() == other.normal_form()
    }
}

impl Eq for MultiDimensionalEquation {}

impl Hash for MultiDimensionalEquation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normal_form().hash(state);
    }
}

impl fmt::Display for MultiDimensionalEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (v, c) in self.variables.iter().zip(&self.coefficients) {
            if c.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            if *c == 1 {
                write!(f, "{v}")?;
            } else {
                write!(f, "{c}{v}")?;
            }
        }
        if first {
            write!(f, "0")?;
        }
        write!(f, " = {}", self.value)
    }
}
