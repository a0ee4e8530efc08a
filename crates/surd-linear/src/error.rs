//! Errors raised while building and solving linear systems.

use surd_integers::ArithmeticError;
use thiserror::Error;

/// Errors that can occur in linear system construction and elimination.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LinearError {
    /// Elimination reached a row `0 = c` with `c != 0`.
    #[error("inconsistent linear system")]
    Inconsistent,

    /// Two equations or systems over different variable lists.
    #[error("equations are over different variable lists")]
    VariableMismatch,

    /// A nonzero coefficient for a name outside the variable list.
    #[error("unknown variable {0:?}")]
    UnknownVariable(String),

    /// A table row with more entries than variables plus a value.
    #[error("row {row} has {len} entries but at most {max} are allowed")]
    RowTooLong {
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Number of variables plus one.
        max: usize,
    },

    /// A system built from no equations and no variable list.
    #[error("a linear system needs at least one equation")]
    NoEquations,

    /// An error from the underlying rational arithmetic.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}
