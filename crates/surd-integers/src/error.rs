//! Errors raised by exact integer and rational arithmetic.

use thiserror::Error;

/// Errors that can occur in exact integer and rational arithmetic.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ArithmeticError {
    /// A zero denominator or divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// A float that has no exact rational value (NaN or infinite).
    #[error("{0} has no exact rational value")]
    NonFinite(f64),

    /// A string that is not an integer, decimal or fraction literal.
    #[error("cannot parse {0:?} as an exact number")]
    Parse(String),

    /// An operation whose result would leave the rationals.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}
