//! Errors raised by radical arithmetic.

use surd_integers::ArithmeticError;
use thiserror::Error;

/// Errors that can occur while building or combining radicals.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RadicalError {
    /// A zeroth root.
    #[error("radical index must be at least 1, got {0}")]
    InvalidRoot(u32),

    /// An even root of a negative radicand.
    #[error("even root of a negative radicand")]
    EvenRootOfNegative,

    /// The reciprocal of a sum with more than two incommensurable terms.
    #[error("cannot denest the reciprocal of a sum of {terms} radical terms")]
    UnsupportedDenesting {
        /// Number of terms in the sum.
        terms: usize,
    },

    /// A combined radical index that does not fit in `u32`.
    #[error("radical index overflow")]
    RootTooLarge,

    /// An error from the underlying rational arithmetic.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}
