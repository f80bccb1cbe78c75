//! User-facing terminal output.
//!
//! Everything the user is meant to read goes to stdout through these helpers;
//! errors go to stderr. Styling is dropped automatically when the stream is
//! not a terminal (console handles the detection).

use console::style;
use std::fmt::Display;

/// Print a heading with a rule underneath
pub fn print_heading(text: &str) {
    println!();
    println!("{}", style(text).bold());
    println!("{}", style("=".repeat(text.chars().count().max(20))).blue());
}

pub fn print_section(text: &str) {
    println!();
    println!("{}", style(text).bold().underlined());
}

/// Print a "label: value" line with an aligned, colored label
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("  {:<16} {}", style(format!("{label}:")).cyan(), value);
}

pub fn print_success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

pub fn print_warning(text: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), style(text).yellow());
}

pub fn print_error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(text).red());
}
