//! Command implementations for the Terra CLI.

pub mod check;
pub mod export;
pub mod train;

use colored::Colorize;

/// Section heading, shared by every command's console output.
pub fn banner(title: &str) {
    println!("{}", "=".repeat(60).dimmed());
    println!("{}", format!("TERRA AI - {title}").bold().cyan());
    println!("{}", "=".repeat(60).dimmed());
    println!();
}
