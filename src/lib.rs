//! Crossfill
//!
//! A crossword grid filler: given a structure description and a word list,
//! find one assignment of words to slots where every crossing agrees. Node
//! and arc consistency prune the candidate sets before a heuristic
//! backtracking search (MRV, degree tie-break, least-constraining-value).
//!
//! # Quick Start
//!
//! ```rust
//! use crossfill::core::Grid;
//! use crossfill::solver::{SolveOutcome, Solver};
//! use crossfill::wordlists::loader::words_from_slice;
//!
//! let grid = Grid::parse("___\n_##\n_##").unwrap();
//! let words = words_from_slice(&["cat", "car", "dog"]);
//!
//! match Solver::new(&grid, &words).solve() {
//!     SolveOutcome::Solved(solution) => assert_eq!(solution.len(), 2),
//!     _ => panic!("this grid is fillable"),
//! }
//! ```

// Core domain types
pub mod core;

// Solving algorithms
pub mod solver;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
