//! # Surd
//!
//! Exact arithmetic over rationals and radicals, with a symbolic linear
//! solver on top.
//!
//! ## Features
//!
//! - **Exact Rationals**: Big-integer fractions with a configurable
//!   denominator bound
//! - **Radicals**: Terms `k * c^(1/r)` reduced by prime factorization
//! - **Radical Sums**: Two-term sums inverted by conjugate multiplication
//! - **Linear Systems**: Fraction-free elimination over named variables
//!
//! ## Quick Start
//!
//! ```rust
//! use surd::prelude::*;
//!
//! let root2 = ExactNumber::from(RadicalTerm::sqrt(Rational::from(2)).unwrap());
//! assert_eq!(root2.clone() * root2, ExactNumber::from(2));
//!
//! let mut system = LinearSystem::of(["x"], [[3, 1]]).unwrap();
//! let solution = system.solve().unwrap();
//! assert_eq!(solution.offset().get("x"), Rational::from_i64(1, 3));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use surd_integers as integers;
pub use surd_linear as linear;
pub use surd_radicals as radicals;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use surd_integers::{Decimal, Integer, Rational, RationalPolicy};
    pub use surd_linear::{
        AffineSubspace, KnownValue, LinearError, LinearSystem, MultiDimensionalEquation, Point,
        SolverConfig,
    };
    pub use surd_radicals::{ExactNumber, RadicalError, RadicalSum, RadicalTerm};
}
