//! Linear systems and fraction-free Gaussian elimination.
//!
//! Elimination works in place: after [`LinearSystem::solve`] the equations
//! are in reduced row echelon form (pivots not normalized to one) and the
//! first [`rank`](LinearSystem::rank) rows are independent.

use num_traits::Zero;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use surd_integers::Rational;
use tracing::{debug, debug_span, trace};

use crate::{
    AffineSubspace, KnownValue, Leading, LinearError, LinearSubspace, MultiDimensionalEquation,
    Point, SolveCollector,
};

/// Configuration for elimination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Divide each combined row by the gcd of its entries.
    pub primitive_rows: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            primitive_rows: true,
        }
    }
}

/// Outcome of one elimination step.
enum Step {
    Pivoted,
    /// Only trivial rows remain; the payload is the number of independent rows.
    EndOfEquations(usize),
}

/// An ordered list of equations over one shared variable list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearSystem {
    variables: Arc<[String]>,
    equations: Vec<MultiDimensionalEquation>,
    rank: Option<usize>,
}

impl LinearSystem {
    /// Creates a system; every equation must be over `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::VariableMismatch`] if an equation uses another
    /// variable list.
    pub fn new<I, S>(
        variables: I,
        mut equations: Vec<MultiDimensionalEquation>,
    ) -> Result<Self, LinearError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variables: Arc<[String]> = variables.into_iter().map(Into::into).collect();
        for equation in &mut equations {
            if **equation.variables() != *variables {
                return Err(LinearError::VariableMismatch);
            }
            equation.share_variables(&variables);
        }
        Ok(Self {
            variables,
            equations,
            rank: None,
        })
    }

    /// Creates a system over the variable list of the first equation.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::NoEquations`] for an empty list and
    /// [`LinearError::VariableMismatch`] if the lists differ.
    pub fn from_equations(equations: Vec<MultiDimensionalEquation>) -> Result<Self, LinearError> {
        let variables = match equations.first() {
            Some(first) => Arc::clone(first.variables()),
            None => return Err(LinearError::NoEquations),
        };
        Self::new(variables.iter().cloned(), equations)
    }

    /// Creates a system from integer rows `[c_1, ..., c_n, value]`.
    ///
    /// Short rows are padded with zeros; a missing value is zero.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::RowTooLong`] for a row with more than
    /// `variables + 1` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use surd_integers::Rational;
    /// use surd_linear::LinearSystem;
    ///
    /// let mut system = LinearSystem::of(["x", "y"], [[1, 2, 3], [0, 2, 4]]).unwrap();
    /// let solution = system.solve().unwrap();
    /// assert_eq!(solution.offset().get("x"), Rational::from(-1));
    /// assert_eq!(solution.offset().get("y"), Rational::from(2));
    /// ```
    pub fn of<V, S, T, R>(variables: V, table: T) -> Result<Self, LinearError>
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
        T: IntoIterator<Item = R>,
        R: AsRef<[i64]>,
    {
        let variables: Arc<[String]> = variables.into_iter().map(Into::into).collect();
        let width = variables.len() + 1;
        let equations = table
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let row = row.as_ref();
                if row.len() > width {
                    return Err(LinearError::RowTooLong {
                        row: i,
                        len: row.len(),
                        max: width,
                    });
                }
                let mut entries: Vec<Rational> = row.iter().map(|&c| Rational::from(c)).collect();
                entries.resize(width, Rational::zero());
                let value = entries.pop().unwrap_or_default();
                MultiDimensionalEquation::from_coefficients(Arc::clone(&variables), entries, value)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            variables,
            equations,
            rank: None,
        })
    }

    /// Reprojects every equation onto another variable list.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::UnknownVariable`] if a nonzero coefficient has
    /// no place in `variables`.
    pub fn with_vars<I, S>(&self, variables: I) -> Result<Self, LinearError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variables: Arc<[String]> = variables.into_iter().map(Into::into).collect();
        let equations = self
            .equations
            .iter()
            .map(|e| e.with_variables(Arc::clone(&variables)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            variables,
            equations,
            rank: None,
        })
    }

    /// Concatenates two systems over the union of their variable lists.
    ///
    /// Variables of `self` come first, then the new ones of `other` in order.
    ///
    /// # Errors
    ///
    /// Propagates reprojection errors.
    pub fn merge(&self, other: &Self) -> Result<Self, LinearError> {
        let mut union: Vec<String> = self.variables.to_vec();
        for v in other.variables.iter() {
            if !union.contains(v) {
                union.push(v.clone());
            }
        }
        let mut merged = self.with_vars(union)?;
        let variables = Arc::clone(&merged.variables);
        for e in &other.equations {
            merged.equations.push(e.with_variables(Arc::clone(&variables))?);
        }
        Ok(merged)
    }

    /// Returns the shared variable list.
    #[must_use]
    pub fn variables(&self) -> &Arc<[String]> {
        &self.variables
    }

    /// Returns the equations; reduced after a successful solve.
    #[must_use]
    pub fn equations(&self) -> &[MultiDimensionalEquation] {
        &self.equations
    }

    /// Returns the number of independent equations, once solved.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    /// Stable-sorts the rows from `from` onward by leading column.
    ///
    /// Inconsistent rows sort before trivial ones.
    pub fn sort_rows(&mut self, from: usize) {
        if from < self.equations.len() {
            self.equations[from..].sort_by_key(MultiDimensionalEquation::first_non_zero);
        }
    }

    /// Solves with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::Inconsistent`] if the system has no solution.
    pub fn solve(&mut self) -> Result<AffineSubspace, LinearError> {
        self.solve_with(&SolverConfig::default(), &mut ())
    }

    /// Solves by fraction-free elimination, reporting events to `collector`.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::Inconsistent`] if the system has no solution.
    pub fn solve_with<C: SolveCollector>(
        &mut self,
        config: &SolverConfig,
        collector: &mut C,
    ) -> Result<AffineSubspace, LinearError> {
        let span = debug_span!(
            "solve",
            rows = self.equations.len(),
            variables = self.variables.len()
        );
        let _enter = span.enter();

        self.rank = None;
        if config.primitive_rows {
            for e in &mut self.equations {
                *e = e.primitive();
            }
        }

        let steps = self.equations.len().min(self.variables.len());
        let mut rank = steps;
        for i in 0..steps {
            if let Step::EndOfEquations(independent) = self.eliminate_at(i, config, collector)? {
                rank = independent;
                break;
            }
        }

        if let Some(row) = self.equations[rank..]
            .iter()
            .position(|e| e.leading() == Leading::Inconsistent)
        {
            debug!(row = rank + row, "inconsistent row after elimination");
            return Err(LinearError::Inconsistent);
        }

        debug!(rank, "elimination finished");
        self.rank = Some(rank);
        collector.finished(rank);
        Ok(self.solution(rank))
    }

    fn eliminate_at<C: SolveCollector>(
        &mut self,
        i: usize,
        config: &SolverConfig,
        collector: &mut C,
    ) -> Result<Step, LinearError> {
        self.sort_rows(i);
        collector.rows_sorted(i);

        let n = self.variables.len();
        let j = self.equations[i].first_non_zero();
        if j == n {
            debug!(row = i, "inconsistent row");
            return Err(LinearError::Inconsistent);
        }
        if j > n {
            debug!(independent = i, "end of equations");
            return Ok(Step::EndOfEquations(i));
        }

        debug!(row = i, column = j, "pivot");
        collector.pivot(i, j);
        let pivot_row = self.equations[i].clone();
        let pivot = pivot_row.coefficients()[j].clone();

        for k in 0..self.equations.len() {
            if k == i {
                continue;
            }
            let entry = self.equations[k].coefficients()[j].clone();
            if entry.is_zero() {
                continue;
            }
            let d = pivot.gcd(&entry);
            let combined =
                self.equations[k].linear_combination(&(&pivot / &d), &pivot_row, &-(&entry / &d))?;
            trace!(target_row = k, pivot_row = i, row = %combined, "combined");
            self.equations[k] = if config.primitive_rows {
                combined.primitive()
            } else {
                combined
            };
            collector.row_combined(k, i);
        }
        Ok(Step::Pivoted)
    }

    /// Reads the solution off the first `rank` reduced rows.
    fn solution(&self, rank: usize) -> AffineSubspace {
        let pivots: Vec<(usize, &MultiDimensionalEquation)> = self.equations[..rank]
            .iter()
            .filter_map(|e| match e.leading() {
                Leading::Pivot(j) => Some((j, e)),
                Leading::Inconsistent | Leading::Trivial => None,
            })
            .collect();

        let free: Vec<usize> = (0..self.variables.len())
            .filter(|c| pivots.iter().all(|(j, _)| j != c))
            .collect();

        let mut offset = Point::new();
        let mut matrix = Vec::with_capacity(pivots.len());
        for &(j, e) in &pivots {
            let coefficient = &e.coefficients()[j];
            offset.set(self.variables[j].clone(), e.value() / coefficient);
            matrix.push(
                free.iter()
                    .map(|&f| -(&e.coefficients()[f] / coefficient))
                    .collect(),
            );
        }

        let constrained = pivots
            .iter()
            .map(|&(j, _)| self.variables[j].clone())
            .collect();
        let free_names = free.iter().map(|&f| self.variables[f].clone()).collect();
        AffineSubspace::new(
            Arc::clone(&self.variables),
            offset,
            LinearSubspace::new(constrained, free_names, matrix),
        )
    }

    /// Returns the variables fixed by a row with exactly one nonzero coefficient.
    #[must_use]
    pub fn known_values(&self) -> BTreeMap<String, KnownValue> {
        self.equations
            .iter()
            .filter(|e| e.non_zero_count() == 1)
            .filter_map(|e| match e.leading() {
                Leading::Pivot(j) => {
                    let variable = self.variables[j].clone();
                    let coefficient = e.coefficients()[j].clone();
                    let known = KnownValue::new(variable.clone(), e.value().clone(), coefficient);
                    Some((variable, known))
                }
                Leading::Inconsistent | Leading::Trivial => None,
            })
            .collect()
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.equations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolveStats;

    #[test]
    fn test_of_pads_rows() {
        let system = LinearSystem::of(["x", "y", "z"], [vec![1], vec![1, 2, 3, 4]]).unwrap();
        let first = &system.equations()[0];
        let zero = Rational::zero();
        assert_eq!(first.coefficients(), &[Rational::from(1), zero.clone(), zero.clone()]);
        assert_eq!(first.value(), &zero);
        assert_eq!(system.equations()[1].value(), &Rational::from(4));
    }

    #[test]
    fn test_of_rejects_long_rows() {
        let result = LinearSystem::of(["x"], [vec![1, 2], vec![1, 2, 3]]);
        assert_eq!(
            result.unwrap_err(),
            LinearError::RowTooLong {
                row: 1,
                len: 3,
                max: 2
            }
        );
    }

    #[test]
    fn test_from_equations() {
        assert_eq!(
            LinearSystem::from_equations(Vec::new()).unwrap_err(),
            LinearError::NoEquations
        );
        let template = LinearSystem::of(["x", "y"], [[1, 1, 2]]).unwrap();
        let system = LinearSystem::from_equations(template.equations().to_vec()).unwrap();
        assert_eq!(system.variables().len(), 2);
    }

    #[test]
    fn test_new_checks_lists() {
        let template = LinearSystem::of(["x", "y"], [[1, 1, 2]]).unwrap();
        let result = LinearSystem::new(["y", "x"], template.equations().to_vec());
        assert_eq!(result.unwrap_err(), LinearError::VariableMismatch);
    }

    #[test]
    fn test_sort_rows_is_stable() {
        let mut system =
            LinearSystem::of(["x", "y"], [[0, 0, 0], [0, 1, 1], [0, 0, 5], [1, 0, 2], [0, 2, 1]])
                .unwrap();
        system.sort_rows(0);
        let keys: Vec<usize> = system
            .equations()
            .iter()
            .map(MultiDimensionalEquation::first_non_zero)
            .collect();
        assert_eq!(keys, vec![0, 1, 1, 2, 3]);
        assert_eq!(system.equations()[1].value(), &Rational::from(1));
    }

    #[test]
    fn test_stop_on_trivial_rows() {
        let mut system = LinearSystem::of(["x", "y"], [[1, 1, 2], [2, 2, 4]]).unwrap();
        let solution = system.solve().unwrap();
        assert_eq!(system.rank(), Some(1));
        assert_eq!(solution.constrained_variables(), &["x".to_string()]);
        assert_eq!(solution.free_variables(), &["y".to_string()]);
    }

    #[test]
    fn test_collector_counts() {
        let mut system = LinearSystem::of(["x", "y"], [[1, 2, 3], [3, 4, 5]]).unwrap();
        let mut stats = SolveStats::default();
        system.solve_with(&SolverConfig::default(), &mut stats).unwrap();
        assert_eq!(stats.pivots, 2);
        assert_eq!(stats.sorts, 2);
        assert_eq!(stats.row_combinations, 2);
        assert_eq!(stats.rank, Some(2));
    }

    #[test]
    fn test_without_primitive_rows() {
        let config = SolverConfig {
            primitive_rows: false,
        };
        let mut system = LinearSystem::of(["x", "y"], [[2, 4, 6], [6, 4, 2]]).unwrap();
        let solution = system.solve_with(&config, &mut ()).unwrap();
        assert_eq!(solution.offset().get("x"), Rational::from_i64(-1, 1));
        assert_eq!(solution.offset().get("y"), Rational::from_i64(2, 1));
        // Unnormalized rows keep their scale.
        assert_eq!(system.equations()[0].coefficients()[1], Rational::zero());
        assert_ne!(system.equations()[0].coefficients()[0], Rational::from(1));
    }

    #[test]
    fn test_known_values() {
        let mut system = LinearSystem::of(["x", "y", "z"], [[1, 0, 0, 3], [0, 1, 1, 2]]).unwrap();
        system.solve().unwrap();
        let known = system.known_values();
        assert_eq!(known.len(), 1);
        assert_eq!(known["x"].value(), Rational::from(3));
        assert_eq!(known["x"].to_string(), "x = 3");
    }

    #[test]
    fn test_merge_unions_variables() {
        let a = LinearSystem::of(["x", "y"], [[1, 1, 3]]).unwrap();
        let b = LinearSystem::of(["y", "z"], [[1, -1, 0]]).unwrap();
        let merged = a.merge(&b).unwrap();
        assert_eq!(&**merged.variables(), &["x", "y", "z"].map(String::from));
        assert_eq!(merged.equations().len(), 2);
        assert_eq!(merged.equations()[1].val("z"), Rational::from(-1));
    }

    #[test]
    fn test_display() {
        let system = LinearSystem::of(["x", "y"], [[1, 2, 3], [0, 2, 4]]).unwrap();
        assert_eq!(system.to_string(), "x + 2y = 3\n2y = 4");
    }
}
