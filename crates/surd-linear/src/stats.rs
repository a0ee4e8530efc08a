//! Hooks for observing elimination.

/// Receives events from [`LinearSystem::solve_with`](crate::LinearSystem::solve_with).
///
/// Every method defaults to a no-op; `()` is the collector that ignores all
/// events.
pub trait SolveCollector {
    /// Rows from `from` onward were re-sorted by leading column.
    fn rows_sorted(&mut self, _from: usize) {}

    /// Row `row` became the pivot for `column`.
    fn pivot(&mut self, _row: usize, _column: usize) {}

    /// Row `target` was combined with pivot row `pivot`.
    fn row_combined(&mut self, _target: usize, _pivot: usize) {}

    /// Elimination ended with `rank` independent rows.
    fn finished(&mut self, _rank: usize) {}
}

impl SolveCollector for () {}

/// Counts elimination events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Number of sort passes.
    pub sorts: usize,
    /// Number of pivots chosen.
    pub pivots: usize,
    /// Number of row combinations performed.
    pub row_combinations: usize,
    /// Final rank, once elimination finishes.
    pub rank: Option<usize>,
}

impl SolveCollector for SolveStats {
    fn rows_sorted(&mut self, _from: usize) {
        self.sorts += 1;
    }

    fn pivot(&mut self, _row: usize, _column: usize) {
        self.pivots += 1;
    }

    fn row_combined(&mut self, _target: usize, _pivot: usize) {
        self.row_combinations += 1;
    }

    fn finished(&mut self, rank: usize) {
        self.rank = Some(rank);
    }
}
