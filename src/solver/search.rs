//! Backtracking search
//!
//! Depth-first search over partial assignments with the classic CSP
//! heuristics: minimum-remaining-values variable selection (degree
//! tie-break) and least-constraining-value ordering. The search mutates a
//! single assignment and undoes each tentative extension on failure instead
//! of copying.

use super::domains::{DomainStore, WordId};
use crate::core::{Grid, VarId, Word};
use log::{debug, trace};
use rustc_hash::FxHashSet;

/// A partial or complete mapping from slot to word
///
/// Indexed by `VarId`; only the search engine mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    slots: Vec<Option<WordId>>,
    assigned: usize,
}

impl Assignment {
    /// An assignment with every slot unassigned
    #[must_use]
    pub fn empty(grid: &Grid) -> Self {
        Self {
            slots: vec![None; grid.variables().len()],
            assigned: 0,
        }
    }

    /// The word assigned to a slot, if any
    #[inline]
    #[must_use]
    pub fn get(&self, var: VarId) -> Option<WordId> {
        self.slots[var]
    }

    /// Tentatively assign a word to an unassigned slot
    ///
    /// # Panics
    /// Panics if the slot is already assigned
    pub fn set(&mut self, var: VarId, word: WordId) {
        assert!(self.slots[var].is_none(), "slot {var} already assigned");
        self.slots[var] = Some(word);
        self.assigned += 1;
    }

    /// Undo a tentative assignment
    ///
    /// # Panics
    /// Panics if the slot is not assigned
    pub fn unset(&mut self, var: VarId) {
        assert!(self.slots[var].is_some(), "slot {var} not assigned");
        self.slots[var] = None;
        self.assigned -= 1;
    }

    /// True iff every slot has a word
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.assigned == self.slots.len()
    }

    /// Number of assigned slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned
    }

    /// True iff no slot is assigned
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// Iterate `(slot, word)` pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (VarId, WordId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.map(|w| (var, w)))
    }
}

/// True iff the assignment maps every grid slot to a word
#[must_use]
pub fn assignment_complete(grid: &Grid, assignment: &Assignment) -> bool {
    assignment.len() == grid.variables().len()
}

/// True iff an assignment is internally consistent
///
/// Three conditions, all required: assigned words are pairwise distinct,
/// every word's length equals its slot's length, and every assigned crossing
/// pair agrees at the shared cell. Holds for partial assignments too.
#[must_use]
pub fn consistent(grid: &Grid, words: &[Word], assignment: &Assignment) -> bool {
    let mut used: FxHashSet<&str> = FxHashSet::default();

    for (var, word) in assignment.iter() {
        let word = &words[word];
        if !used.insert(word.text()) {
            return false;
        }
        if word.len() != grid.variable(var).length {
            return false;
        }
    }

    // Lengths are all valid here, so overlap offsets are in range.
    for (var, word) in assignment.iter() {
        let word = &words[word];
        for &(other, overlap) in grid.neighbors(var) {
            if let Some(neighbor_word) = assignment.get(other)
                && words[neighbor_word].byte_at(overlap.other) != word.byte_at(overlap.this)
            {
                return false;
            }
        }
    }
    true
}

/// Pick the unassigned slot to try next
///
/// Minimum remaining values; ties broken by maximum degree, then by smallest
/// slot id (the canonical order). Returns `None` when everything is
/// assigned.
#[must_use]
pub fn select_unassigned_variable(
    grid: &Grid,
    domains: &DomainStore,
    assignment: &Assignment,
) -> Option<VarId> {
    (0..grid.variables().len())
        .filter(|&var| assignment.get(var).is_none())
        .min_by_key(|&var| (domains.size(var), std::cmp::Reverse(grid.degree(var))))
}

/// Order a slot's remaining candidates, least constraining first
///
/// A candidate's cost is the number of words it would rule out across the
/// domains of *unassigned* crossing slots: for each such neighbor, the count
/// of neighbor words disagreeing at the shared cell. Every word currently in
/// a neighbor's domain is counted, with no lookahead filtering. Ascending
/// stable sort, so equal-cost candidates keep dictionary order.
#[must_use]
pub fn order_domain_values(
    grid: &Grid,
    words: &[Word],
    domains: &DomainStore,
    assignment: &Assignment,
    var: VarId,
) -> Vec<WordId> {
    let unassigned: Vec<_> = grid
        .neighbors(var)
        .iter()
        .filter(|&&(other, _)| assignment.get(other).is_none())
        .collect();

    let mut ordered: Vec<WordId> = domains.domain(var).to_vec();
    ordered.sort_by_key(|&candidate| {
        let letter_at = |offset: usize| words[candidate].byte_at(offset);
        unassigned
            .iter()
            .map(|&&(other, overlap)| {
                domains
                    .domain(other)
                    .iter()
                    .filter(|&&w| words[w].byte_at(overlap.other) != letter_at(overlap.this))
                    .count()
            })
            .sum::<usize>()
    });
    ordered
}

/// Optional bounds on the search effort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Abort after this many tentative extensions; `None` means unbounded
    pub max_states: Option<u64>,
}

impl SearchLimits {
    /// No bounds
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_states: None }
    }
}

/// Counters accumulated while solving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Tentative extensions tried
    pub states: u64,
    /// Assignments undone after a failed subtree
    pub backtracks: u64,
    /// Candidates removed by node + arc consistency before search
    pub pruned_candidates: usize,
}

/// What a search run ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// A complete, consistent assignment
    Solved(Assignment),
    /// The whole tree was explored without success
    Exhausted,
    /// The step budget ran out before the tree was explored
    BudgetExhausted,
}

/// Depth-first backtracking over the pruned domains
///
/// Holds the shared read-only state; the assignment is threaded through the
/// recursion and mutated in place.
pub struct Backtracker<'a> {
    grid: &'a Grid,
    words: &'a [Word],
    domains: &'a DomainStore,
    limits: SearchLimits,
    stats: SearchStats,
}

impl<'a> Backtracker<'a> {
    #[must_use]
    pub const fn new(
        grid: &'a Grid,
        words: &'a [Word],
        domains: &'a DomainStore,
        limits: SearchLimits,
    ) -> Self {
        Self {
            grid,
            words,
            domains,
            limits,
            stats: SearchStats {
                states: 0,
                backtracks: 0,
                pruned_candidates: 0,
            },
        }
    }

    /// Search for one complete consistent assignment
    ///
    /// Recursion depth is bounded by the slot count.
    pub fn search(&mut self) -> SearchResult {
        let mut assignment = Assignment::empty(self.grid);
        let result = self.backtrack(&mut assignment);
        debug!(
            "search finished: {} states, {} backtracks",
            self.stats.states, self.stats.backtracks
        );
        match result {
            Step::Solved => SearchResult::Solved(assignment),
            Step::Exhausted => SearchResult::Exhausted,
            Step::Budget => SearchResult::BudgetExhausted,
        }
    }

    /// Counters from the last `search` call
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    fn backtrack(&mut self, assignment: &mut Assignment) -> Step {
        if assignment.is_complete() {
            return Step::Solved;
        }

        let var = select_unassigned_variable(self.grid, self.domains, assignment)
            .expect("incomplete assignment must have an unassigned slot");

        for word in order_domain_values(self.grid, self.words, self.domains, assignment, var) {
            if let Some(max) = self.limits.max_states
                && self.stats.states >= max
            {
                return Step::Budget;
            }
            self.stats.states += 1;

            if !self.extension_consistent(assignment, var, word) {
                continue;
            }

            trace!("try {} = {}", self.grid.variable(var), self.words[word]);
            assignment.set(var, word);
            match self.backtrack(assignment) {
                Step::Exhausted => {
                    assignment.unset(var);
                    self.stats.backtracks += 1;
                }
                done => return done,
            }
        }

        Step::Exhausted
    }

    /// Whether extending the assignment with `var = word` keeps it
    /// consistent
    ///
    /// Checks only the constraints that involve `var`; equivalent to the
    /// full `consistent` check because the enclosing assignment is
    /// consistent by induction.
    fn extension_consistent(&self, assignment: &Assignment, var: VarId, word: WordId) -> bool {
        let word = &self.words[word];

        if word.len() != self.grid.variable(var).length {
            return false;
        }
        if assignment
            .iter()
            .any(|(_, used)| self.words[used].text() == word.text())
        {
            return false;
        }
        self.grid.neighbors(var).iter().all(|&(other, overlap)| {
            assignment.get(other).is_none_or(|neighbor_word| {
                self.words[neighbor_word].byte_at(overlap.other) == word.byte_at(overlap.this)
            })
        })
    }
}

enum Step {
    Solved,
    Exhausted,
    Budget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::consistency::ac3;
    use crate::wordlists::loader::words_from_slice;

    // Across slot (0,0) length 3 crossing down slot (0,1) length 3 at the
    // across word's second letter / the down word's first letter.
    const TEE: &str = "___\n#_#\n#_#";

    fn setup(dictionary: &[&str]) -> (Grid, Vec<Word>, DomainStore) {
        let grid = Grid::parse(TEE).unwrap();
        let words = words_from_slice(dictionary);
        let mut domains = DomainStore::full(&grid, &words);
        domains.enforce_node_consistency(&grid, &words);
        (grid, words, domains)
    }

    #[test]
    fn assignment_set_unset_roundtrip() {
        let grid = Grid::parse(TEE).unwrap();
        let mut assignment = Assignment::empty(&grid);

        assert!(assignment.is_empty());
        assignment.set(0, 3);
        assert_eq!(assignment.get(0), Some(3));
        assert_eq!(assignment.len(), 1);
        assert!(!assignment.is_complete());

        assignment.set(1, 4);
        assert!(assignment.is_complete());
        assert!(assignment_complete(&grid, &assignment));

        assignment.unset(0);
        assert_eq!(assignment.get(0), None);
        assert!(!assignment.is_complete());
    }

    #[test]
    #[should_panic(expected = "already assigned")]
    fn assignment_double_set_panics() {
        let grid = Grid::parse(TEE).unwrap();
        let mut assignment = Assignment::empty(&grid);
        assignment.set(0, 0);
        assignment.set(0, 1);
    }

    #[test]
    fn consistent_accepts_agreeing_assignment() {
        let (grid, words, _) = setup(&["cat", "car", "dog", "oak", "arc"]);
        let mut assignment = Assignment::empty(&grid);

        // cat[1] == 'a' == arc[0] at the shared cell.
        assignment.set(0, 0);
        assignment.set(1, 4);
        assert!(consistent(&grid, &words, &assignment));
    }

    #[test]
    fn consistent_rejects_overlap_mismatch() {
        let (grid, words, _) = setup(&["cat", "car", "dog", "oak", "arc"]);
        let mut assignment = Assignment::empty(&grid);

        // dog[1] == 'o' but arc[0] == 'a'.
        assignment.set(0, 2);
        assignment.set(1, 4);
        assert!(!consistent(&grid, &words, &assignment));
    }

    #[test]
    fn consistent_rejects_duplicate_words() {
        // Two parallel across slots, no crossing.
        let grid = Grid::parse("___\n###\n___").unwrap();
        let words = words_from_slice(&["cat", "dog"]);
        let mut assignment = Assignment::empty(&grid);

        assignment.set(0, 0);
        assignment.set(1, 0);
        assert!(!consistent(&grid, &words, &assignment));

        assignment.unset(1);
        assignment.set(1, 1);
        assert!(consistent(&grid, &words, &assignment));
    }

    #[test]
    fn consistent_rejects_length_mismatch() {
        let (grid, words, _) = setup(&["cat", "arcs"]);
        let mut assignment = Assignment::empty(&grid);

        // "arcs" is too long for a length-3 slot.
        assignment.set(1, 1);
        assert!(!consistent(&grid, &words, &assignment));
    }

    #[test]
    fn consistent_on_partial_assignment() {
        let (grid, words, _) = setup(&["cat", "car", "dog", "oak", "arc"]);
        let mut assignment = Assignment::empty(&grid);

        assert!(consistent(&grid, &words, &assignment));
        assignment.set(0, 0);
        assert!(consistent(&grid, &words, &assignment));
    }

    #[test]
    fn select_prefers_smallest_domain() {
        let (grid, _, mut domains) = setup(&["cat", "car", "dog", "oak", "arc"]);
        let assignment = Assignment::empty(&grid);

        // Shrink the down slot's domain below the across slot's.
        domains.retain(1, |w| w >= 3);
        assert_eq!(
            select_unassigned_variable(&grid, &domains, &assignment),
            Some(1)
        );
    }

    #[test]
    fn select_breaks_ties_by_degree() {
        // Slots 0 and 1 are across with one crossing each; slot 2 is the
        // down slot crossing both.
        let grid = Grid::parse("__#\n#__").unwrap();
        let words = words_from_slice(&["at", "do", "on", "up"]);
        let mut domains = DomainStore::full(&grid, &words);
        domains.enforce_node_consistency(&grid, &words);
        let assignment = Assignment::empty(&grid);

        assert_eq!(grid.degree(2), 2);
        assert_eq!(
            select_unassigned_variable(&grid, &domains, &assignment),
            Some(2)
        );
    }

    #[test]
    fn select_remaining_tie_takes_canonical_order() {
        // Both slots: same domain size, same degree.
        let (grid, _, domains) = setup(&["cat", "car", "dog"]);
        let assignment = Assignment::empty(&grid);

        assert_eq!(
            select_unassigned_variable(&grid, &domains, &assignment),
            Some(0)
        );
    }

    #[test]
    fn select_skips_assigned_slots() {
        let (grid, _, domains) = setup(&["cat", "car", "dog"]);
        let mut assignment = Assignment::empty(&grid);

        assignment.set(0, 0);
        assert_eq!(
            select_unassigned_variable(&grid, &domains, &assignment),
            Some(1)
        );

        assignment.set(1, 1);
        assert_eq!(select_unassigned_variable(&grid, &domains, &assignment), None);
    }

    #[test]
    fn order_puts_most_constraining_last() {
        let (grid, words, domains) = setup(&["cat", "car", "dog", "oak", "arc"]);
        let assignment = Assignment::empty(&grid);

        // "arc" places 'r' in the shared cell, ruling out all five down
        // candidates; every other word rules out four.
        let ordered = order_domain_values(&grid, &words, &domains, &assignment, 0);
        assert_eq!(ordered, vec![0, 1, 2, 3, 4]);
        assert_eq!(ordered.last(), Some(&4));
    }

    #[test]
    fn order_ignores_assigned_neighbors() {
        let (grid, words, domains) = setup(&["cat", "car", "dog", "oak", "arc"]);
        let mut assignment = Assignment::empty(&grid);

        // With the only neighbor assigned, every candidate costs zero and
        // dictionary order is kept.
        assignment.set(1, 4);
        let ordered = order_domain_values(&grid, &words, &domains, &assignment, 0);
        assert_eq!(ordered, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn backtracker_finds_consistent_assignment() {
        let (grid, words, mut domains) = setup(&["cat", "car", "dog", "oak", "arc"]);
        assert!(ac3(&grid, &words, &mut domains));

        let mut backtracker =
            Backtracker::new(&grid, &words, &domains, SearchLimits::unbounded());
        let SearchResult::Solved(assignment) = backtracker.search() else {
            panic!("expected a solution");
        };
        assert!(assignment.is_complete());
        assert!(consistent(&grid, &words, &assignment));
        assert!(backtracker.stats().states > 0);
    }

    #[test]
    fn backtracker_exhausts_when_unsolvable() {
        // "eel" supports itself at the crossing, so propagation passes, but
        // the two slots would have to use the same word.
        let (grid, words, mut domains) = setup(&["eel"]);
        assert!(ac3(&grid, &words, &mut domains));

        let mut backtracker =
            Backtracker::new(&grid, &words, &domains, SearchLimits::unbounded());
        assert_eq!(backtracker.search(), SearchResult::Exhausted);
        assert!(backtracker.stats().backtracks > 0);
    }

    #[test]
    fn backtracker_respects_budget() {
        let (grid, words, mut domains) = setup(&["cat", "car", "dog", "oak", "arc"]);
        assert!(ac3(&grid, &words, &mut domains));

        let mut backtracker = Backtracker::new(
            &grid,
            &words,
            &domains,
            SearchLimits {
                max_states: Some(0),
            },
        );
        assert_eq!(backtracker.search(), SearchResult::BudgetExhausted);
    }
}
