//! Word lists for crossword filling
//!
//! Dictionaries are loaded at runtime; any line-per-word text file works.

pub mod loader;
