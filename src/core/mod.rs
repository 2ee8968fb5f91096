//! Core domain types for crossword filling
//!
//! This module contains the fundamental domain types with zero external
//! state: words, slots, and the parsed grid with its overlap relation.

mod grid;
mod variable;
mod word;

pub use grid::{Grid, GridError, Overlap, VarId};
pub use variable::{Direction, Variable};
pub use word::{Word, WordError};
