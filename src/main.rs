//! Crossfill - CLI
//!
//! Fills a crossword structure from a word list using constraint propagation
//! and heuristic backtracking.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossfill::{
    commands::{analyze_puzzle, solve_puzzle},
    core::{Grid, Word},
    output::{print_analysis_result, print_solve_report},
    solver::SearchLimits,
    wordlists::loader::load_from_file,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "crossfill",
    about = "Crossword grid filler using arc consistency and backtracking search",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a structure from a word list
    Solve {
        /// Structure description file ('_' = open cell, anything else blocked)
        structure: PathBuf,

        /// Word list file, one candidate per line
        words: PathBuf,

        /// Write the filled grid as text to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Abort after this many search states ("budget exhausted")
        #[arg(long)]
        max_states: Option<u64>,

        /// Show per-slot words and search effort
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report slots, crossings, and domain sizes without searching
    Analyze {
        /// Structure description file
        structure: PathBuf,

        /// Word list file
        words: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            structure,
            words,
            output,
            max_states,
            verbose,
        } => run_solve_command(&structure, &words, output.as_deref(), max_states, verbose),
        Commands::Analyze { structure, words } => run_analyze_command(&structure, &words),
    }
}

fn run_solve_command(
    structure: &Path,
    words: &Path,
    output: Option<&Path>,
    max_states: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let (grid, words) = load_inputs(structure, words)?;

    let limits = SearchLimits { max_states };
    let report = solve_puzzle(&grid, &words, limits);
    print_solve_report(&report, verbose);

    if let Some(path) = output {
        if let Some(layout) = &report.layout {
            fs::write(path, layout.to_text())
                .with_context(|| format!("Failed to write solution to {}", path.display()))?;
            println!("Saved solution to {}", path.display());
        } else {
            println!("No solution to save");
        }
    }
    Ok(())
}

fn run_analyze_command(structure: &Path, words: &Path) -> Result<()> {
    let (grid, words) = load_inputs(structure, words)?;
    let result = analyze_puzzle(&grid, &words);
    print_analysis_result(&result);
    Ok(())
}

/// Parse the structure file and load the dictionary
///
/// Parsing errors abort here, before any solving begins.
fn load_inputs(structure: &Path, words: &Path) -> Result<(Grid, Vec<Word>)> {
    let text = fs::read_to_string(structure)
        .with_context(|| format!("Failed to read structure file {}", structure.display()))?;
    let grid = Grid::parse(&text)
        .with_context(|| format!("Malformed structure in {}", structure.display()))?;

    let dictionary = load_from_file(words)
        .with_context(|| format!("Failed to read word list {}", words.display()))?;

    Ok((grid, dictionary))
}
