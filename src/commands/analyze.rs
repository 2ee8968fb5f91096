//! Structure analysis command
//!
//! Reports grid geometry and domain sizes after propagation, without
//! searching. Useful for judging whether a word list plausibly covers a
//! structure before committing to a full solve.

use crate::core::{Grid, Variable, Word};
use crate::solver::DomainStore;
use crate::solver::consistency::ac3;

/// Per-slot propagation summary
pub struct VariableReport {
    pub variable: Variable,
    pub degree: usize,
    pub after_node: usize,
    pub after_arc: usize,
}

/// Result of analyzing a puzzle without searching
pub struct AnalysisResult {
    pub height: usize,
    pub width: usize,
    pub variable_count: usize,
    /// Unordered crossing pairs
    pub crossing_count: usize,
    pub dictionary_size: usize,
    /// False iff propagation emptied some domain
    pub arc_consistent: bool,
    pub variables: Vec<VariableReport>,
}

/// Run propagation only and summarize the result per slot
#[must_use]
pub fn analyze_puzzle(grid: &Grid, words: &[Word]) -> AnalysisResult {
    let mut domains = DomainStore::full(grid, words);
    domains.enforce_node_consistency(grid, words);
    let after_node: Vec<usize> = (0..grid.variables().len())
        .map(|var| domains.size(var))
        .collect();

    let arc_consistent = !domains.any_empty() && ac3(grid, words, &mut domains);

    let variables = grid
        .variables()
        .iter()
        .enumerate()
        .map(|(id, &variable)| VariableReport {
            variable,
            degree: grid.degree(id),
            after_node: after_node[id],
            after_arc: domains.size(id),
        })
        .collect();

    let crossing_count = (0..grid.variables().len())
        .map(|id| grid.degree(id))
        .sum::<usize>()
        / 2;

    AnalysisResult {
        height: grid.height(),
        width: grid.width(),
        variable_count: grid.variables().len(),
        crossing_count,
        dictionary_size: words.len(),
        arc_consistent,
        variables,
    }
}
