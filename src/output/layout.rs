//! Solution layout
//!
//! Maps a completed fill onto grid coordinates: one glyph per cell. This is
//! the only surface handed to presentation collaborators (terminal printer,
//! file export); it consumes nothing back from them.

use crate::core::Grid;
use crate::solver::Solution;
use std::fmt;

/// One cell of the rendered layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCell {
    /// Not fillable
    Blocked,
    /// Fillable but covered by no slot (an isolated open cell)
    Empty,
    /// Filled with a letter
    Letter(char),
}

/// Read-only 2D character layout of a solved grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionLayout {
    height: usize,
    width: usize,
    cells: Vec<LayoutCell>,
}

impl SolutionLayout {
    /// Write each solution word along its slot's cells
    ///
    /// A consistent solution never writes two different letters into one
    /// cell; crossing slots simply re-write the shared letter.
    #[must_use]
    pub fn new(grid: &Grid, solution: &Solution) -> Self {
        let height = grid.height();
        let width = grid.width();

        let mut cells: Vec<LayoutCell> = (0..height * width)
            .map(|index| {
                if grid.is_open(index / width, index % width) {
                    LayoutCell::Empty
                } else {
                    LayoutCell::Blocked
                }
            })
            .collect();

        for (variable, word) in solution.entries() {
            for (k, (row, col)) in variable.cells().enumerate() {
                let letter = LayoutCell::Letter(char::from(word.as_bytes()[k]));
                debug_assert!(
                    matches!(cells[row * width + col], LayoutCell::Empty)
                        || cells[row * width + col] == letter,
                    "conflicting write at ({row}, {col})"
                );
                cells[row * width + col] = letter;
            }
        }

        Self {
            height,
            width,
            cells,
        }
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

    /// The glyph at (row, col)
    ///
    /// # Panics
    /// Panics if the coordinate is outside the grid
    #[inline]
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> LayoutCell {
        assert!(row < self.height && col < self.width, "cell out of range");
        self.cells[row * self.width + col]
    }

    /// Iterate the layout row by row
    pub fn rows(&self) -> impl Iterator<Item = &[LayoutCell]> {
        self.cells.chunks(self.width)
    }

    /// Plain-text rendering: letters, spaces for empty cells, `█` for
    /// blocked cells, one line per row
    #[must_use]
    pub fn to_text(&self) -> String {
        format!("{self}")
    }
}

impl fmt::Display for SolutionLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                match cell {
                    LayoutCell::Blocked => write!(f, "█")?,
                    LayoutCell::Empty => write!(f, " ")?,
                    LayoutCell::Letter(c) => write!(f, "{c}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
