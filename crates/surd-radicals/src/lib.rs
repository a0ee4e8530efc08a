//! # surd-radicals
//!
//! Exact radical arithmetic over the rationals.
//!
//! This crate provides:
//! - Radical terms `k * c^(1/r)` kept in a canonical reduced form (`RadicalTerm`)
//! - Sums of radical terms with like-term collection (`RadicalSum`)
//! - Reciprocals of one- and two-term sums by conjugate denesting
//! - A closed exact-number type that always demotes to its simplest form
//!   (`ExactNumber`)
//!
//! ## Ordering
//!
//! Radicals have no cheap exact total order, so `PartialOrd` compares decimal
//! approximations at [`COMPARISON_PLACES`] fractional digits. Equality and
//! hashing are structural and exact.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod exact;
pub mod sum;
pub mod term;

#[cfg(test)]
mod proptests;

pub use error::RadicalError;
pub use exact::{ExactNumber, Kind};
pub use sum::RadicalSum;
pub use term::{RadicalTerm, COMPARISON_PLACES};
