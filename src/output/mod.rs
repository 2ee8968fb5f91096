//! Terminal output formatting
//!
//! Presentation of solved grids and analysis reports.

pub mod display;
pub mod layout;

pub use display::{print_analysis_result, print_solve_report};
pub use layout::{LayoutCell, SolutionLayout};
