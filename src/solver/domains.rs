//! Domain store
//!
//! Tracks the candidate words still possible for each slot. Domains are
//! initialized to the full dictionary and only ever shrink: first by node
//! consistency (length), then by arc consistency and nothing else. Candidates
//! are kept in dictionary order so every downstream iteration is
//! deterministic.

use crate::core::{Grid, VarId, Word};
use log::debug;

/// Index of a word in the caller's dictionary slice
pub type WordId = usize;

/// Per-slot candidate word sets
#[derive(Debug, Clone)]
pub struct DomainStore {
    domains: Vec<Vec<WordId>>,
}

impl DomainStore {
    /// Give every slot the entire dictionary
    #[must_use]
    pub fn full(grid: &Grid, words: &[Word]) -> Self {
        let all: Vec<WordId> = (0..words.len()).collect();
        Self {
            domains: vec![all; grid.variables().len()],
        }
    }

    /// Remove, for every slot, each candidate whose length differs from the
    /// slot's length
    ///
    /// Single pass per slot, no ordering dependency, idempotent. Afterwards
    /// every remaining candidate is length-valid, and nothing later
    /// re-widens a domain.
    pub fn enforce_node_consistency(&mut self, grid: &Grid, words: &[Word]) {
        for (var, domain) in self.domains.iter_mut().enumerate() {
            let length = grid.variable(var).length;
            let before = domain.len();
            domain.retain(|&w| words[w].len() == length);
            debug!(
                "node consistency: {} kept {} of {} candidates",
                grid.variable(var),
                domain.len(),
                before
            );
        }
    }

    /// Remaining candidates for a slot, in dictionary order
    #[inline]
    #[must_use]
    pub fn domain(&self, var: VarId) -> &[WordId] {
        &self.domains[var]
    }

    /// Number of remaining candidates for a slot
    #[inline]
    #[must_use]
    pub fn size(&self, var: VarId) -> usize {
        self.domains[var].len()
    }

    /// Whether a slot has no candidates left
    #[inline]
    #[must_use]
    pub fn is_empty(&self, var: VarId) -> bool {
        self.domains[var].is_empty()
    }

    /// Whether any slot has no candidates left
    #[must_use]
    pub fn any_empty(&self) -> bool {
        self.domains.iter().any(Vec::is_empty)
    }

    /// Keep only the candidates of `var` satisfying the predicate
    ///
    /// Returns true if any candidate was removed. Relative order of the
    /// survivors is preserved.
    pub fn retain(&mut self, var: VarId, mut keep: impl FnMut(WordId) -> bool) -> bool {
        let before = self.domains[var].len();
        self.domains[var].retain(|&w| keep(w));
        self.domains[var].len() != before
    }
}
