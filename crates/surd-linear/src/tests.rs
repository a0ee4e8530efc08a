//! Integration tests for the linear solver.

#[cfg(test)]
mod integration_tests {
    use num_traits::Zero;
    use std::sync::Arc;
    use surd_integers::Rational;

    use crate::{
        LinearError, LinearSystem, MultiDimensionalEquation, Point, SolveStats, SolverConfig,
    };

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    fn vars(names: &[&str]) -> Arc<[String]> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_unique_solution() {
        let mut system = LinearSystem::of(["x", "y"], [[1, 2, 3], [0, 2, 4]]).unwrap();
        let solution = system.solve().unwrap();

        assert!(solution.is_point());
        assert_eq!(solution.offset().get("x"), q(-1, 1));
        assert_eq!(solution.offset().get("y"), q(2, 1));
        assert_eq!(system.rank(), Some(2));

        let known = system.known_values();
        assert_eq!(known["x"].value(), q(-1, 1));
        assert_eq!(known["y"].value(), q(2, 1));
    }

    #[test]
    fn test_exact_fraction() {
        let mut system = LinearSystem::of(["x"], [[3, 1]]).unwrap();
        let solution = system.solve().unwrap();
        assert_eq!(solution.offset().get("x"), q(1, 3));
        assert_eq!(system.known_values()["x"].to_string(), "x = 1/3");
    }

    #[test]
    fn test_inconsistent_parallel_rows() {
        let mut system = LinearSystem::of(["x", "y"], [[2, 4, 4], [1, 2, 3]]).unwrap();
        assert_eq!(system.solve().unwrap_err(), LinearError::Inconsistent);
    }

    #[test]
    fn test_inconsistent_from_named_equations() {
        let xy = vars(&["x", "y"]);
        let one = Rational::from(1);
        let a = MultiDimensionalEquation::new(
            [("x", one.clone()), ("y", one.clone())],
            q(1, 1),
            Arc::clone(&xy),
        )
        .unwrap();
        let b =
            MultiDimensionalEquation::new([("x", one.clone()), ("y", one)], q(2, 1), xy).unwrap();
        let mut system = LinearSystem::from_equations(vec![a, b]).unwrap();
        assert!(matches!(system.solve(), Err(LinearError::Inconsistent)));
    }

    #[test]
    fn test_inconsistent_input_row() {
        let mut system = LinearSystem::of(["x", "y"], [[1, 1, 1], [0, 0, 7]]).unwrap();
        assert_eq!(system.solve().unwrap_err(), LinearError::Inconsistent);
    }

    #[test]
    fn test_inconsistent_after_all_pivots() {
        // Three rows over two variables: the third reduces to 0 = c.
        let mut system = LinearSystem::of(["x", "y"], [[1, 0, 1], [0, 1, 1], [1, 1, 3]]).unwrap();
        assert_eq!(system.solve().unwrap_err(), LinearError::Inconsistent);
    }

    #[test]
    fn test_overdetermined_consistent() {
        let mut system = LinearSystem::of(["x", "y"], [[1, 0, 1], [0, 1, 1], [1, 1, 2]]).unwrap();
        let solution = system.solve().unwrap();
        assert_eq!(solution.offset().get("x"), q(1, 1));
        assert_eq!(solution.offset().get("y"), q(1, 1));
    }

    #[test]
    fn test_one_free_variable() {
        let mut system = LinearSystem::of(["x", "y"], [[1, 1, 3]]).unwrap();
        let solution = system.solve().unwrap();

        assert_eq!(solution.constrained_variables(), &["x".to_string()]);
        assert_eq!(solution.free_variables(), &["y".to_string()]);
        assert_eq!(solution.dimension(), 1);
        assert!(system.known_values().is_empty());

        let p = solution.evaluate(&Point::from_iter([("y", q(5, 2))]));
        assert_eq!(p.get("x"), q(1, 2));
        assert_eq!(solution.to_string(), "x = 3 + -1y\nfree: y");
    }

    #[test]
    fn test_free_variable_before_pivot() {
        // x does not appear, so it is free and y, z are pivots.
        let mut system = LinearSystem::of(["x", "y", "z"], [[0, 1, 0, 2], [0, 0, 2, 3]]).unwrap();
        let solution = system.solve().unwrap();
        assert_eq!(solution.free_variables(), &["x".to_string()]);
        assert_eq!(solution.offset().get("z"), q(3, 2));
    }

    #[test]
    fn test_residuals_vanish() {
        let table = [[2, -1, 3, 5], [1, 4, -2, 7], [3, 3, 1, 12]];
        let original = LinearSystem::of(["x", "y", "z"], table).unwrap();
        let mut system = original.clone();
        let solution = system.solve().unwrap();

        // The third row is the sum of the first two.
        assert_eq!(solution.dimension(), 1);
        for equation in original.equations() {
            assert!(equation.residual(solution.offset()).is_zero());
        }
    }

    #[test]
    fn test_residuals_vanish_on_free_family() {
        let original =
            LinearSystem::of(["a", "b", "c", "d"], [[1, 2, 0, -1, 4], [0, 1, 1, 1, 3]]).unwrap();
        let mut system = original.clone();
        let solution = system.solve().unwrap();
        assert_eq!(solution.dimension(), 2);

        for (u, v) in [(0, 0), (1, -1), (7, 3)] {
            let free = Point::from_iter(
                solution
                    .free_variables()
                    .iter()
                    .cloned()
                    .zip([q(u, 1), q(v, 2)]),
            );
            let point = solution.evaluate(&free);
            assert!(solution.contains(&point));
            for equation in original.equations() {
                assert!(equation.is_satisfied_by(&point));
            }
        }
    }

    #[test]
    fn test_rational_coefficients() {
        let xy = vars(&["x", "y"]);
        let a = MultiDimensionalEquation::new(
            [("x", q(1, 2)), ("y", q(1, 3))],
            q(1, 1),
            Arc::clone(&xy),
        )
        .unwrap();
        let b =
            MultiDimensionalEquation::new([("x", q(1, 4)), ("y", q(-1, 6))], q(0, 1), xy).unwrap();
        let mut system = LinearSystem::from_equations(vec![a, b]).unwrap();
        let solution = system.solve().unwrap();
        assert_eq!(solution.offset().get("x"), q(1, 1));
        assert_eq!(solution.offset().get("y"), q(3, 2));
    }

    #[test]
    fn test_stats_on_rank_deficient_system() {
        let mut system = LinearSystem::of(["x", "y", "z"], [[1, 1, 1, 1], [2, 2, 2, 2]]).unwrap();
        let mut stats = SolveStats::default();
        system
            .solve_with(&SolverConfig::default(), &mut stats)
            .unwrap();
        assert_eq!(stats.pivots, 1);
        assert_eq!(stats.rank, Some(1));
    }

    #[test]
    fn test_intersect() {
        let mut plane = LinearSystem::of(["x", "y", "z"], [[1, 1, 1, 6]]).unwrap();
        let mut line = LinearSystem::of(["x", "y"], [[1, -1, 0], [1, 0, 2]]).unwrap();
        let meet = plane
            .solve()
            .unwrap()
            .intersect(&line.solve().unwrap())
            .unwrap();
        assert!(meet.is_point());
        assert_eq!(meet.offset().get("z"), q(2, 1));
    }

    #[test]
    fn test_intersect_empty() {
        let mut a = LinearSystem::of(["x"], [[1, 1]]).unwrap();
        let mut b = LinearSystem::of(["x"], [[1, 2]]).unwrap();
        let result = a.solve().unwrap().intersect(&b.solve().unwrap());
        assert_eq!(result.unwrap_err(), LinearError::Inconsistent);
    }

    #[test]
    fn test_solve_twice_is_stable() {
        let mut system = LinearSystem::of(["x", "y"], [[1, 2, 3], [3, 4, 5]]).unwrap();
        let first = system.solve().unwrap();
        let second = system.solve().unwrap();
        assert_eq!(first, second);
    }
}
