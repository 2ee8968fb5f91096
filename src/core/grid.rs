//! Grid model
//!
//! Parses a structure description into the set of word slots and the overlap
//! relation between them. The grid is read-only after construction; the
//! solver addresses slots by `VarId` (index into the canonical variable
//! list).

use super::variable::{Direction, Variable};
use rustc_hash::FxHashMap;
use std::fmt;

/// Index of a variable in the grid's canonical slot list
pub type VarId = usize;

/// The single shared cell of two crossing slots, as letter offsets
///
/// `this` is the offset within the slot the overlap was looked up for,
/// `other` the offset within its neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub this: usize,
    pub other: usize,
}

impl Overlap {
    /// The same overlap seen from the neighbor's side
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self {
            this: self.other,
            other: self.this,
        }
    }
}

/// Error type for malformed structure descriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    Empty,
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Structure description has no rows"),
            Self::NonRectangular {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Structure is not rectangular: row {row} has {found} cells, expected {expected}"
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A parsed crossword grid: cell structure, slots, and overlaps
///
/// Overlaps are stored as a sparse adjacency list per slot, giving
/// O(degree) neighbor iteration.
#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    open: Vec<bool>,
    variables: Vec<Variable>,
    neighbors: Vec<Vec<(VarId, Overlap)>>,
}

impl Grid {
    /// Parse a structure description
    ///
    /// One line per row; `_` marks a fillable cell, any other character a
    /// blocked cell. Every maximal horizontal or vertical run of at least
    /// two fillable cells becomes a slot; single fillable cells do not.
    ///
    /// # Errors
    /// Returns `GridError` if the description has no rows or its rows have
    /// differing widths.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<Vec<bool>> = text
            .lines()
            .map(|line| line.chars().map(|c| c == '_').collect())
            .collect();

        let height = rows.len();
        if height == 0 {
            return Err(GridError::Empty);
        }

        let width = rows[0].len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::NonRectangular {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }

        let open: Vec<bool> = rows.into_iter().flatten().collect();
        let variables = scan_variables(&open, height, width);
        let neighbors = build_neighbors(&variables);

        Ok(Self {
            height,
            width,
            open,
            variables,
            neighbors,
        })
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at (row, col) is fillable
    ///
    /// # Panics
    /// Panics if the coordinate is outside the grid
    #[inline]
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        assert!(row < self.height && col < self.width, "cell out of range");
        self.open[row * self.width + col]
    }

    /// All slots, in canonical order (across by row scan, then down by
    /// column scan)
    #[inline]
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The slot with the given id
    #[inline]
    #[must_use]
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id]
    }

    /// Slots crossing the given slot, with the shared-cell offsets
    #[inline]
    #[must_use]
    pub fn neighbors(&self, id: VarId) -> &[(VarId, Overlap)] {
        &self.neighbors[id]
    }

    /// Number of slots crossing the given slot
    #[inline]
    #[must_use]
    pub fn degree(&self, id: VarId) -> usize {
        self.neighbors[id].len()
    }

    /// Shared-cell offsets of two slots, if they cross
    ///
    /// `overlap(x, y)` returns the offsets as seen from `x`'s side.
    #[must_use]
    pub fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.neighbors[x]
            .iter()
            .find(|(id, _)| *id == y)
            .map(|&(_, ov)| ov)
    }
}

/// Extract every maximal run of open cells with length >= 2
fn scan_variables(open: &[bool], height: usize, width: usize) -> Vec<Variable> {
    let mut variables = Vec::new();
    let is_open = |row: usize, col: usize| open[row * width + col];

    // Across: a slot starts at an open cell with no open cell to its left
    for row in 0..height {
        for col in 0..width {
            if !is_open(row, col) || (col > 0 && is_open(row, col - 1)) {
                continue;
            }
            let length = (col..width).take_while(|&c| is_open(row, c)).count();
            if length >= 2 {
                variables.push(Variable::new(row, col, Direction::Across, length));
            }
        }
    }

    // Down: a slot starts at an open cell with no open cell above it
    for col in 0..width {
        for row in 0..height {
            if !is_open(row, col) || (row > 0 && is_open(row - 1, col)) {
                continue;
            }
            let length = (row..height).take_while(|&r| is_open(r, col)).count();
            if length >= 2 {
                variables.push(Variable::new(row, col, Direction::Down, length));
            }
        }
    }

    variables
}

/// Build the overlap adjacency from cell occupancy
///
/// Each open cell belongs to at most one across and one down slot, so two
/// slots can share at most one cell by construction.
fn build_neighbors(variables: &[Variable]) -> Vec<Vec<(VarId, Overlap)>> {
    let mut down_at: FxHashMap<(usize, usize), (VarId, usize)> = FxHashMap::default();
    for (id, var) in variables.iter().enumerate() {
        if var.direction == Direction::Down {
            for (k, cell) in var.cells().enumerate() {
                let previous = down_at.insert(cell, (id, k));
                debug_assert!(previous.is_none(), "cell covered by two down slots");
            }
        }
    }

    let mut neighbors: Vec<Vec<(VarId, Overlap)>> = vec![Vec::new(); variables.len()];
    for (x, var) in variables.iter().enumerate() {
        if var.direction != Direction::Across {
            continue;
        }
        for (kx, cell) in var.cells().enumerate() {
            if let Some(&(y, ky)) = down_at.get(&cell) {
                let overlap = Overlap {
                    this: kx,
                    other: ky,
                };
                debug_assert_eq!(
                    variables[x].cell(overlap.this),
                    variables[y].cell(overlap.other),
                    "overlap offsets must address the same cell"
                );
                neighbors[x].push((y, overlap));
                neighbors[y].push((x, overlap.flipped()));
            }
        }
    }

    for adjacency in &mut neighbors {
        adjacency.sort_by_key(|&(id, _)| id);
    }
    neighbors
}
