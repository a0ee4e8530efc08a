//! Values pinned down by a single-variable row.

use std::fmt;
use surd_integers::Rational;

/// A variable fixed by a row `coefficient * variable = rhs`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KnownValue {
    variable: String,
    rhs: Rational,
    coefficient: Rational,
}

impl KnownValue {
    /// Creates a known value; `coefficient` is nonzero by construction in
    /// [`LinearSystem::known_values`](crate::LinearSystem::known_values).
    pub(crate) fn new(variable: String, rhs: Rational, coefficient: Rational) -> Self {
        debug_assert!(coefficient != 0);
        Self {
            variable,
            rhs,
            coefficient,
        }
    }

    /// Returns the variable name.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the row's right-hand side.
    #[must_use]
    pub fn rhs(&self) -> &Rational {
        &self.rhs
    }

    /// Returns the row's only nonzero coefficient.
    #[must_use]
    pub fn coefficient(&self) -> &Rational {
        &self.coefficient
    }

    /// Returns `rhs / coefficient`.
    #[must_use]
    pub fn value(&self) -> Rational {
        &self.rhs / &self.coefficient
    }
}

impl fmt::Display for KnownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.variable, self.value())
    }
}
