use crate::commands::open_session;
use crate::core::{error::Result, print_info, print_section_header};
use colored::*;

pub fn execute_branches() -> Result<()> {
    let session = open_session()?;

    if session.branches().is_empty() {
        print_info("No branches found. Make your first commit to create one.");
        return Ok(());
    }

    print_section_header("Branches");

    for view in session.branches() {
        // Current branch format: [*] name (working tree)
        let (marker, name) = if view.is_head() {
            ("*", view.name().blue())
        } else {
            (" ", view.name().white())
        };
        let source = if view.is_read_only() {
            "snapshot"
        } else {
            "working tree"
        };

        println!(
            "{}{}{} {} {}",
            "[".bright_black(),
            marker.white(),
            "]".bright_black(),
            name,
            format!("({source})").bright_black()
        );
    }

    println!();
    Ok(())
}
