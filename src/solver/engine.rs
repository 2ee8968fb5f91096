//! Top-level solver
//!
//! Runs the full pipeline on a parsed grid and dictionary: node consistency,
//! arc consistency, then backtracking search over whatever survives.

use super::consistency::ac3;
use super::domains::DomainStore;
use super::search::{Backtracker, SearchLimits, SearchResult, SearchStats, consistent};
use crate::core::{Grid, Variable, Word};
use log::debug;

/// How a solve attempt ended
///
/// Absence of a solution is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// One complete, consistent fill
    Solved(Solution),
    /// Propagation or exhaustive search proved there is none
    Unsatisfiable,
    /// The step budget ran out first; satisfiability is unknown
    BudgetExhausted,
}

/// A completed fill: one word per slot, in canonical slot order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    entries: Vec<(Variable, String)>,
}

impl Solution {
    /// `(slot, word)` pairs in canonical slot order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[(Variable, String)] {
        &self.entries
    }

    /// The word filled into a specific slot
    #[must_use]
    pub fn word_for(&self, variable: &Variable) -> Option<&str> {
        self.entries
            .iter()
            .find(|(var, _)| var == variable)
            .map(|(_, word)| word.as_str())
    }

    /// Number of filled slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True iff the grid had no slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Crossword filler
///
/// Borrows the grid and dictionary; each `solve` call works on fresh
/// domains.
pub struct Solver<'a> {
    grid: &'a Grid,
    words: &'a [Word],
    limits: SearchLimits,
}

impl<'a> Solver<'a> {
    /// Create a solver with unbounded search
    #[must_use]
    pub const fn new(grid: &'a Grid, words: &'a [Word]) -> Self {
        Self {
            grid,
            words,
            limits: SearchLimits::unbounded(),
        }
    }

    /// Create a solver with explicit search limits
    #[must_use]
    pub const fn with_limits(grid: &'a Grid, words: &'a [Word], limits: SearchLimits) -> Self {
        Self {
            grid,
            words,
            limits,
        }
    }

    /// Find one complete consistent fill, or report that none exists
    #[must_use]
    pub fn solve(&self) -> SolveOutcome {
        self.solve_with_stats().0
    }

    /// `solve`, also returning the work counters
    ///
    /// Propagation runs first; search starts only if no domain empties.
    ///
    /// # Panics
    /// Panics if search returns an assignment that fails the full
    /// consistency check, which would indicate a solver defect.
    #[must_use]
    pub fn solve_with_stats(&self) -> (SolveOutcome, SearchStats) {
        let mut stats = SearchStats::default();
        let mut domains = DomainStore::full(self.grid, self.words);
        let initial: usize = self.domain_total(&domains);

        domains.enforce_node_consistency(self.grid, self.words);
        if domains.any_empty() {
            debug!("node consistency emptied a domain; unsatisfiable without search");
            stats.pruned_candidates = initial - self.domain_total(&domains);
            return (SolveOutcome::Unsatisfiable, stats);
        }

        if !ac3(self.grid, self.words, &mut domains) {
            debug!("arc consistency emptied a domain; unsatisfiable without search");
            stats.pruned_candidates = initial - self.domain_total(&domains);
            return (SolveOutcome::Unsatisfiable, stats);
        }
        stats.pruned_candidates = initial - self.domain_total(&domains);

        let mut backtracker = Backtracker::new(self.grid, self.words, &domains, self.limits);
        let result = backtracker.search();
        stats.states = backtracker.stats().states;
        stats.backtracks = backtracker.stats().backtracks;

        let outcome = match result {
            SearchResult::Solved(assignment) => {
                assert!(
                    consistent(self.grid, self.words, &assignment),
                    "search produced an inconsistent assignment"
                );
                let entries = assignment
                    .iter()
                    .map(|(var, word)| {
                        (*self.grid.variable(var), self.words[word].text().to_string())
                    })
                    .collect();
                SolveOutcome::Solved(Solution { entries })
            }
            SearchResult::Exhausted => SolveOutcome::Unsatisfiable,
            SearchResult::BudgetExhausted => SolveOutcome::BudgetExhausted,
        };
        (outcome, stats)
    }

    fn domain_total(&self, domains: &DomainStore) -> usize {
        (0..self.grid.variables().len())
            .map(|var| domains.size(var))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;
    use crate::wordlists::loader::words_from_slice;

    // 1x3 across slot and 3x1 down slot crossing at the single shared cell
    // (0, 0): both words must agree on their first letter.
    const CORNER: &str = "___\n_##\n_##";

    #[test]
    fn solve_crossing_scenario() {
        let grid = Grid::parse(CORNER).unwrap();
        let words = words_from_slice(&["cat", "car", "dog"]);

        let solver = Solver::new(&grid, &words);
        let SolveOutcome::Solved(solution) = solver.solve() else {
            panic!("expected a solution");
        };

        // The crossing letters must agree and the words must differ, which
        // forces the "cat"/"car" pair in some order.
        let across = solution
            .word_for(&Variable::new(0, 0, Direction::Across, 3))
            .unwrap();
        let down = solution
            .word_for(&Variable::new(0, 0, Direction::Down, 3))
            .unwrap();
        assert_ne!(across, down);
        assert_eq!(across.as_bytes()[0], down.as_bytes()[0]);
        assert_eq!(across.as_bytes()[0], b'c');
    }

    #[test]
    fn solve_reports_unsatisfiable_crossing() {
        let grid = Grid::parse(CORNER).unwrap();
        // Distinct words never share a first letter.
        let words = words_from_slice(&["cat", "dog"]);

        let solver = Solver::new(&grid, &words);
        assert_eq!(solver.solve(), SolveOutcome::Unsatisfiable);
    }

    #[test]
    fn solve_empty_domain_skips_search() {
        let grid = Grid::parse(CORNER).unwrap();
        // No length-3 words at all.
        let words = words_from_slice(&["lighthouse", "at"]);

        let solver = Solver::new(&grid, &words);
        let (outcome, stats) = solver.solve_with_stats();
        assert_eq!(outcome, SolveOutcome::Unsatisfiable);
        assert_eq!(stats.states, 0);
    }

    #[test]
    fn solve_empty_dictionary_skips_search() {
        let grid = Grid::parse(CORNER).unwrap();
        let words: Vec<Word> = Vec::new();

        let solver = Solver::new(&grid, &words);
        let (outcome, stats) = solver.solve_with_stats();
        assert_eq!(outcome, SolveOutcome::Unsatisfiable);
        assert_eq!(stats.states, 0);
    }

    #[test]
    fn solve_ring_grid() {
        // Four length-4 slots forming a ring, each crossing two others.
        let grid = Grid::parse("____\n_##_\n_##_\n____").unwrap();
        let words = words_from_slice(&[
            "sail", "sole", "line", "else", "dogs", "cats", "tree", "salt", "lens",
        ]);

        let solver = Solver::new(&grid, &words);
        let SolveOutcome::Solved(solution) = solver.solve() else {
            panic!("expected a solution");
        };
        assert_eq!(solution.len(), 4);
    }

    #[test]
    fn solve_is_deterministic() {
        let grid = Grid::parse("____\n_##_\n_##_\n____").unwrap();
        let words = words_from_slice(&[
            "sail", "sole", "line", "else", "dogs", "cats", "tree", "salt", "lens",
        ]);

        let solver = Solver::new(&grid, &words);
        let first = solver.solve();
        let second = solver.solve();
        let third = solver.solve();
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn solve_budget_exhausted_is_distinct() {
        let grid = Grid::parse(CORNER).unwrap();
        let words = words_from_slice(&["cat", "car", "dog"]);

        let solver = Solver::with_limits(
            &grid,
            &words,
            SearchLimits {
                max_states: Some(0),
            },
        );
        assert_eq!(solver.solve(), SolveOutcome::BudgetExhausted);
    }

    #[test]
    fn solve_grid_without_slots() {
        let grid = Grid::parse("##\n##").unwrap();
        let words = words_from_slice(&["cat"]);

        let solver = Solver::new(&grid, &words);
        let SolveOutcome::Solved(solution) = solver.solve() else {
            panic!("expected the vacuous solution");
        };
        assert!(solution.is_empty());
    }

    #[test]
    fn stats_count_pruned_candidates() {
        let grid = Grid::parse(CORNER).unwrap();
        // "is" is pruned from both slots by node consistency.
        let words = words_from_slice(&["cat", "car", "dog", "is"]);

        let solver = Solver::new(&grid, &words);
        let (outcome, stats) = solver.solve_with_stats();
        assert!(matches!(outcome, SolveOutcome::Solved(_)));
        assert!(stats.pruned_candidates >= 2);
        assert!(stats.states > 0);
    }
}
