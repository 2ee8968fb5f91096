//! Display functions for command results

use crate::commands::{AnalysisResult, SolveReport};
use crate::output::layout::LayoutCell;
use crate::solver::SolveOutcome;
use colored::Colorize;

/// Print the result of a fill attempt
pub fn print_solve_report(report: &SolveReport, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Filling {} slots from {} words",
        report.variable_count.to_string().bright_yellow().bold(),
        report.dictionary_size.to_string().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    if let Some(layout) = &report.layout {
        println!();
        for row in layout.rows() {
            for cell in row {
                match cell {
                    LayoutCell::Blocked => print!("{}", "█".dimmed()),
                    LayoutCell::Empty => print!(" "),
                    LayoutCell::Letter(c) => {
                        print!("{}", c.to_ascii_uppercase().to_string().bright_white())
                    }
                }
            }
            println!();
        }
    }

    println!();
    match &report.outcome {
        SolveOutcome::Solved(solution) => {
            println!(
                "{}",
                format!("✅ Filled {} slots", solution.len()).green().bold()
            );
            if verbose {
                for (variable, word) in solution.entries() {
                    println!("  {variable}: {}", word.to_uppercase());
                }
            }
        }
        SolveOutcome::Unsatisfiable => {
            println!("{}", "❌ No solution exists for this word list".red().bold());
        }
        SolveOutcome::BudgetExhausted => {
            println!(
                "{}",
                "⏱ Search budget exhausted before a solution was found"
                    .yellow()
                    .bold()
            );
        }
    }

    if verbose {
        println!("\n{}", "Search effort:".bright_cyan().bold());
        println!("   States tried:     {}", report.stats.states);
        println!("   Backtracks:       {}", report.stats.backtracks);
        println!("   Pruned upfront:   {}", report.stats.pruned_candidates);
    }
}

/// Print the result of structure analysis
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "STRUCTURE ANALYSIS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📐 {}", "Geometry:".bright_cyan().bold());
    println!("   Grid:        {} × {}", result.height, result.width);
    println!("   Slots:       {}", result.variable_count);
    println!("   Crossings:   {}", result.crossing_count);
    println!("   Dictionary:  {} words", result.dictionary_size);

    println!("\n🔎 {}", "Domains after propagation:".bright_cyan().bold());
    for report in &result.variables {
        let sizes = format!("{} → {}", report.after_node, report.after_arc);
        let sizes = if report.after_arc == 0 {
            sizes.red()
        } else {
            sizes.normal()
        };
        println!(
            "   {} degree {}: {sizes}",
            report.variable, report.degree
        );
    }

    println!();
    if result.arc_consistent {
        println!("{}", "✅ Arc consistent; search may succeed".green().bold());
    } else {
        println!(
            "{}",
            "❌ Propagation emptied a domain; no solution exists"
                .red()
                .bold()
        );
    }
}
