//! Arc consistency propagation (AC-3)
//!
//! `revise` prunes one domain against one crossing neighbor; `ac3` drives a
//! FIFO worklist of arcs to fixpoint. Both require node consistency to have
//! run first so every candidate actually reaches its overlap offset.

use super::domains::DomainStore;
use crate::core::{Grid, VarId, Word};
use log::trace;
use std::collections::VecDeque;

/// Make slot `x` arc consistent with slot `y`
///
/// Removes from `x`'s domain every word with no supporting word in `y`'s
/// domain at the shared cell. A word `wx` is supported iff some `wy` in
/// `y`'s domain has the same letter at the overlap. Returns whether any
/// removal occurred; a no-op returning false when the slots do not cross.
pub fn revise(grid: &Grid, words: &[Word], domains: &mut DomainStore, x: VarId, y: VarId) -> bool {
    let Some(overlap) = grid.overlap(x, y) else {
        return false;
    };

    // Letters y's domain can still place in the shared cell.
    let mut supported = [false; 256];
    for &wy in domains.domain(y) {
        supported[usize::from(words[wy].byte_at(overlap.other))] = true;
    }

    let revised = domains.retain(x, |wx| {
        supported[usize::from(words[wx].byte_at(overlap.this))]
    });
    if revised {
        trace!(
            "revise: {} -> {} candidates against {}",
            grid.variable(x),
            domains.size(x),
            grid.variable(y)
        );
    }
    revised
}

/// Enforce arc consistency starting from every overlapping ordered pair
///
/// Returns true iff no domain was emptied.
pub fn ac3(grid: &Grid, words: &[Word], domains: &mut DomainStore) -> bool {
    let arcs: Vec<(VarId, VarId)> = (0..grid.variables().len())
        .flat_map(|x| grid.neighbors(x).iter().map(move |&(y, _)| (x, y)))
        .collect();
    ac3_with(grid, words, domains, arcs)
}

/// Enforce arc consistency starting from an explicit worklist
///
/// Pops arcs FIFO; when a revision shrinks `x`'s domain, every arc `(z, x)`
/// for crossing neighbors `z` of `x` other than `y` is re-enqueued, since
/// tightening `x` may newly invalidate values in `z`. Fails immediately if a
/// revision empties a domain. Terminates because domains only shrink.
///
/// Returns true iff no domain was emptied.
pub fn ac3_with(
    grid: &Grid,
    words: &[Word],
    domains: &mut DomainStore,
    arcs: Vec<(VarId, VarId)>,
) -> bool {
    let mut queue: VecDeque<(VarId, VarId)> = arcs.into();

    while let Some((x, y)) = queue.pop_front() {
        if !revise(grid, words, domains, x, y) {
            continue;
        }
        if domains.is_empty(x) {
            trace!("ac3: emptied domain of {}", grid.variable(x));
            return false;
        }
        for &(z, _) in grid.neighbors(x) {
            if z != y {
                queue.push_back((z, x));
            }
        }
    }
    true
}
