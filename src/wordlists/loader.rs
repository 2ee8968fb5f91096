//! Word list loading utilities
//!
//! Loads dictionaries from files or string slices. Entries are validated,
//! normalized, and deduplicated: a word can fill at most one slot, so a
//! repeated entry can never contribute a second fill.

use crate::core::Word;
use log::debug;
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Load a dictionary from a file, one candidate per line
///
/// Blank lines, invalid entries, and repeats are skipped; first occurrence
/// order is kept.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use crossfill::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/words0.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let content = fs::read_to_string(path)?;
    let words = collect_words(content.lines());
    debug!("loaded {} dictionary words", words.len());
    Ok(words)
}

/// Convert a string slice to a deduplicated Word vector
///
/// # Examples
/// ```
/// use crossfill::wordlists::loader::words_from_slice;
///
/// let words = words_from_slice(&["cat", "dog", "CAT"]);
/// assert_eq!(words.len(), 2);
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    collect_words(slice.iter().copied())
}

fn collect_words<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<Word> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    lines
        .filter_map(|line| Word::new(line.trim()).ok())
        .filter(|word| seen.insert(word.text().to_string()))
        .collect()
}
