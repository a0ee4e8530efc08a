//! # surd-linear
//!
//! Exact linear systems over named variables.
//!
//! This crate provides:
//! - Equations over a shared, ordered variable list (`MultiDimensionalEquation`)
//! - Fraction-free Gaussian elimination (`LinearSystem::solve`)
//! - Solutions as parametrized affine subspaces (`AffineSubspace`)
//! - Per-variable solved values (`KnownValue`)
//!
//! ## Algorithm
//!
//! Rows are sorted by their leading column and the first remaining row is
//! the pivot. Other rows are combined as
//! `row_k <- (p/d) * row_k - (r/d) * row_i` with `d = gcd(p, r)`, so the
//! solver never divides by a pivot. Rows are optionally kept primitive to
//! bound coefficient growth.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod equation;
pub mod error;
pub mod known;
pub mod stats;
pub mod subspace;
pub mod system;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use equation::{Leading, MultiDimensionalEquation};
pub use error::LinearError;
pub use known::KnownValue;
pub use stats::{SolveCollector, SolveStats};
pub use subspace::{AffineSubspace, LinearSubspace, Point};
pub use system::{LinearSystem, SolverConfig};
