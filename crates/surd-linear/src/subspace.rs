//! Points and parametrized subspaces describing solution sets.

use num_traits::Zero;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;
use std::sync::Arc;
use surd_integers::Rational;

use crate::{LinearError, LinearSystem, MultiDimensionalEquation};

/// An assignment of rational values to named variables.
///
/// Absent variables read as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    values: BTreeMap<String, Rational>,
}

impl Point {
    /// Creates an empty point.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a variable, zero if absent.
    #[must_use]
    pub fn get(&self, variable: &str) -> Rational {
        self.values.get(variable).cloned().unwrap_or_else(Rational::zero)
    }

    /// Sets the value of a variable.
    pub fn set(&mut self, variable: impl Into<String>, value: Rational) {
        self.values.insert(variable.into(), value);
    }

    /// Returns true if the variable has an explicit value.
    #[must_use]
    pub fn contains_variable(&self, variable: &str) -> bool {
        self.values.contains_key(variable)
    }

    /// Iterates over `(variable, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rational)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no variable has an explicit value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Rational)> for Point {
    fn from_iter<I: IntoIterator<Item = (K, Rational)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Add for &Point {
    type Output = Point;

    fn add(self, rhs: &Point) -> Point {
        let mut values = self.values.clone();
        for (k, v) in &rhs.values {
            let entry = values.entry(k.clone()).or_insert_with(Rational::zero);
            *entry = &*entry + v;
        }
        Point { values }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        &self + &rhs
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (k, v)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k} = {v}")?;
        }
        write!(f, ")")
    }
}

/// A linear map from free-variable values to constrained-variable values.
///
/// `matrix[i][j]` is the contribution of `free[j]` to `constrained[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearSubspace {
    constrained: Vec<String>,
    free: Vec<String>,
    matrix: Vec<Vec<Rational>>,
}

impl LinearSubspace {
    /// Creates a linear map.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` is not `constrained.len()` by `free.len()`.
    #[must_use]
    pub fn new(constrained: Vec<String>, free: Vec<String>, matrix: Vec<Vec<Rational>>) -> Self {
        assert_eq!(matrix.len(), constrained.len(), "one matrix row per constrained variable");
        assert!(
            matrix.iter().all(|row| row.len() == free.len()),
            "one matrix column per free variable"
        );
        Self {
            constrained,
            free,
            matrix,
        }
    }

    /// Returns the constrained (output) variables.
    #[must_use]
    pub fn constrained(&self) -> &[String] {
        &self.constrained
    }

    /// Returns the free (input) variables.
    #[must_use]
    pub fn free(&self) -> &[String] {
        &self.free
    }

    /// Returns the coefficient of `free[j]` in `constrained[i]`.
    #[must_use]
    pub fn coefficient(&self, i: usize, j: usize) -> Option<&Rational> {
        self.matrix.get(i).and_then(|row| row.get(j))
    }

    /// Maps free-variable values to constrained-variable values.
    ///
    /// Only the free variables of `point` are read.
    #[must_use]
    pub fn apply(&self, point: &Point) -> Point {
        let inputs: Vec<Rational> = self.free.iter().map(|u| point.get(u)).collect();
        self.constrained
            .iter()
            .zip(&self.matrix)
            .map(|(x, row)| {
                let value: Rational = row
                    .iter()
                    .zip(&inputs)
                    .filter(|(m, _)| !m.is_zero())
                    .map(|(m, u)| m * u)
                    .sum();
                (x.clone(), value)
            })
            .collect()
    }
}

/// The solution set of a consistent linear system.
///
/// Each constrained variable equals its offset plus a linear combination of
/// the free variables:
///
/// ```text
/// x_i = offset_i + sum_j(m_ij * u_j)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffineSubspace {
    variables: Arc<[String]>,
    offset: Point,
    linear: LinearSubspace,
}

impl AffineSubspace {
    /// Creates an affine subspace over a variable list.
    #[must_use]
    pub fn new(variables: Arc<[String]>, offset: Point, linear: LinearSubspace) -> Self {
        Self {
            variables,
            offset,
            linear,
        }
    }

    /// Returns every variable of the originating system.
    #[must_use]
    pub fn variables(&self) -> &Arc<[String]> {
        &self.variables
    }

    /// Returns the variables left as parameters.
    #[must_use]
    pub fn free_variables(&self) -> &[String] {
        self.linear.free()
    }

    /// Returns the variables determined by the free ones.
    #[must_use]
    pub fn constrained_variables(&self) -> &[String] {
        self.linear.constrained()
    }

    /// Returns the value of each constrained variable when all free ones are zero.
    #[must_use]
    pub fn offset(&self) -> &Point {
        &self.offset
    }

    /// Returns the linear part.
    #[must_use]
    pub fn linear_subspace(&self) -> &LinearSubspace {
        &self.linear
    }

    /// Returns the number of free variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.linear.free().len()
    }

    /// Returns true if the solution is unique.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.dimension() == 0
    }

    /// Returns the full point for given free-variable values.
    ///
    /// Free variables absent from `free_values` are zero.
    #[must_use]
    pub fn evaluate(&self, free_values: &Point) -> Point {
        let mut point = &self.offset + &self.linear.apply(free_values);
        for u in self.linear.free() {
            point.set(u.clone(), free_values.get(u));
        }
        point
    }

    /// Returns true if the point satisfies every constraint.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        let image = self.linear.apply(point);
        self.linear
            .constrained()
            .iter()
            .all(|x| point.get(x) == self.offset.get(x) + image.get(x))
    }

    /// Rewrites the subspace as one equation per constrained variable:
    /// `x_i - sum_j(m_ij * u_j) = offset_i`.
    ///
    /// # Errors
    ///
    /// Propagates construction errors from [`LinearSystem::new`].
    pub fn to_linear_system(&self) -> Result<LinearSystem, LinearError> {
        let equations = self
            .linear
            .constrained()
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let terms = std::iter::once((x.as_str(), Rational::from(1))).chain(
                    self.linear
                        .free()
                        .iter()
                        .enumerate()
                        .filter_map(|(j, u)| {
                            self.linear.coefficient(i, j).map(|m| (u.as_str(), -m))
                        }),
                );
                MultiDimensionalEquation::new(terms, self.offset.get(x), Arc::clone(&self.variables))
            })
            .collect::<Result<Vec<_>, _>>()?;
        LinearSystem::new(self.variables.iter().cloned(), equations)
    }

    /// Intersects two solution sets.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::Inconsistent`] if the intersection is empty.
    pub fn intersect(&self, other: &Self) -> Result<Self, LinearError> {
        self.to_linear_system()?
            .merge(&other.to_linear_system()?)?
            .solve()
    }
}

impl fmt::Display for AffineSubspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, x) in self.linear.constrained().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{x} = {}", self.offset.get(x))?;
            for (j, u) in self.linear.free().iter().enumerate() {
                match self.linear.coefficient(i, j) {
                    Some(m) if !m.is_zero() => write!(f, " + {m}{u}")?,
                    _ => {}
                }
            }
        }
        if !self.linear.free().is_empty() {
            if !self.linear.constrained().is_empty() {
                writeln!(f)?;
            }
            write!(f, "free: {}", self.linear.free().join(", "))?;
        }
        Ok(())
    }
}
