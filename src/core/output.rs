//! Shared output formatting for the command line.
//!
//! Errors in red, headers and info in white, with a blank line around each
//! block so command output stays readable between prompts.

use colored::*;

/// Prints an error message
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Prints an informational message
///
/// # Format
/// ```text
///
/// <message>
///
/// ```
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Prints a section header
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}
