//! Fill command
//!
//! Runs the solver over a parsed grid and dictionary and packages the
//! outcome for presentation. No printing happens here.

use crate::core::{Grid, Word};
use crate::output::SolutionLayout;
use crate::solver::{SearchLimits, SearchStats, SolveOutcome, Solver};

/// Result of a fill attempt, ready for display or export
pub struct SolveReport {
    pub outcome: SolveOutcome,
    pub stats: SearchStats,
    /// The rendered layout, present iff a solution was found
    pub layout: Option<SolutionLayout>,
    pub variable_count: usize,
    pub dictionary_size: usize,
}

/// Solve a puzzle and build its presentation layout
#[must_use]
pub fn solve_puzzle(grid: &Grid, words: &[Word], limits: SearchLimits) -> SolveReport {
    let solver = Solver::with_limits(grid, words, limits);
    let (outcome, stats) = solver.solve_with_stats();

    let layout = match &outcome {
        SolveOutcome::Solved(solution) => Some(SolutionLayout::new(grid, solution)),
        SolveOutcome::Unsatisfiable | SolveOutcome::BudgetExhausted => None,
    };

    SolveReport {
        outcome,
        stats,
        layout,
        variable_count: grid.variables().len(),
        dictionary_size: words.len(),
    }
}
