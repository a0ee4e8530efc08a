//! Property-based tests for elimination.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;
    use surd_integers::Rational;

    use crate::{LinearError, LinearSystem, Point, SolverConfig};

    const NAMES: [&str; 4] = ["w", "x", "y", "z"];

    fn names(count: usize) -> impl Iterator<Item = &'static str> {
        NAMES.iter().copied().take(count)
    }

    fn table(rows: usize, cols: usize) -> impl Strategy<Value = Vec<Vec<i64>>> {
        prop::collection::vec(prop::collection::vec(-6i64..=6, cols + 1), rows)
    }

    // Systems built around a known integer solution, so they are consistent.
    fn consistent() -> impl Strategy<Value = (LinearSystem, Vec<i64>)> {
        (1usize..=4, 1usize..=4)
            .prop_flat_map(|(rows, cols)| {
                (
                    prop::collection::vec(prop::collection::vec(-6i64..=6, cols), rows),
                    prop::collection::vec(-5i64..=5, cols),
                )
            })
            .prop_map(|(matrix, solution)| {
                let rows: Vec<Vec<i64>> = matrix
                    .into_iter()
                    .map(|mut row| {
                        let value = row.iter().zip(&solution).map(|(a, b)| a * b).sum();
                        row.push(value);
                        row
                    })
                    .collect();
                let system = LinearSystem::of(names(solution.len()), rows).unwrap();
                (system, solution)
            })
    }

    proptest! {
        #[test]
        fn consistent_systems_solve((original, solution) in consistent()) {
            let mut system = original.clone();
            let subspace = system.solve().unwrap();

            let point: Point = NAMES.iter().zip(&solution).map(|(v, &s)| (*v, Rational::from(s))).collect();
            prop_assert!(subspace.contains(&point));
            for equation in original.equations() {
                prop_assert!(equation.residual(subspace.offset()).is_zero());
            }
        }

        #[test]
        fn solutions_satisfy_every_row(
            entries in (1usize..=4, 1usize..=4).prop_flat_map(|(rows, cols)| table(rows, cols))
        ) {
            let cols = entries[0].len() - 1;
            let original = LinearSystem::of(names(cols), entries).unwrap();
            let mut system = original.clone();
            match system.solve() {
                Ok(subspace) => {
                    for equation in original.equations() {
                        prop_assert!(equation.residual(subspace.offset()).is_zero());
                    }
                }
                Err(e) => prop_assert_eq!(e, LinearError::Inconsistent),
            }
        }

        #[test]
        fn primitive_rows_do_not_change_the_solution(
            entries in (1usize..=4).prop_flat_map(|rows| table(rows, 3))
        ) {
            let original = LinearSystem::of(names(3), entries).unwrap();
            let mut plain = original.clone();
            let mut reduced = original;
            let config = SolverConfig { primitive_rows: false };
            let a = plain.solve_with(&config, &mut ());
            let b = reduced.solve();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn rank_counts_pivots(entries in (1usize..=4).prop_flat_map(|rows| table(rows, 2))) {
            let mut system = LinearSystem::of(names(2), entries).unwrap();
            if let Ok(subspace) = system.solve() {
                prop_assert_eq!(system.rank(), Some(subspace.constrained_variables().len()));
                prop_assert_eq!(subspace.dimension() + subspace.constrained_variables().len(), 2);
            }
        }
    }
}
