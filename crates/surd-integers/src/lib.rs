//! # surd-integers
//!
//! Arbitrary precision integer and rational arithmetic for surd.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Exact rationals with a magnitude policy (`Rational`, `RationalPolicy`)
//! - Decimal approximations for printing and ordering (`Decimal`)
//! - Prime factorization by trial division (`factor`)
//!
//! ## Exactness
//!
//! Arithmetic on `Rational` is exact until a reduced denominator exceeds
//! [`DEFAULT_MAX_DENOMINATOR`]. Such a value is rounded half-up to
//! [`DEFAULT_SIGNIFICANT_DIGITS`] significant digits, so long elimination
//! chains stay bounded. Use [`RationalPolicy::exact`] to opt out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod decimal;
pub mod error;
pub mod factor;
pub mod integer;
pub mod policy;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use decimal::{Decimal, DEFAULT_DECIMAL_PLACES};
pub use error::ArithmeticError;
pub use factor::{factor, PrimeFactorization};
pub use integer::Integer;
pub use policy::{RationalPolicy, DEFAULT_MAX_DENOMINATOR, DEFAULT_SIGNIFICANT_DIGITS};
pub use rational::{Rational, MAX_PARSE_EXPONENT};
