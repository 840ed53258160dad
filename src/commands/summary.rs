use crate::commands::open_session;
use crate::core::{
    colors::get_status_color_style,
    error::Result,
    print_section_header,
    session::{RepoSummary, WorkingTreeState},
    status::SimplifiedStatus,
};
use colored::*;

pub fn execute_summary(json: bool) -> Result<()> {
    let session = open_session()?;
    let summary = session.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print_summary(summary);
    }
    Ok(())
}

fn print_summary(summary: &RepoSummary) {
    print_section_header("Summary");

    let state = match summary.state {
        WorkingTreeState::Clean => "clean".green(),
        WorkingTreeState::Dirty => "dirty".yellow(),
    };
    println!("{} {}", "Branch:".white(), summary.head.blue());
    println!("{} {}", "Working tree:".white(), state);

    for (status, count) in [
        (SimplifiedStatus::Added, summary.added),
        (SimplifiedStatus::Modified, summary.modified),
        (SimplifiedStatus::Conflicted, summary.conflicted),
    ] {
        let color_fn = get_status_color_style(status);
        println!("  {} {count}", color_fn(&format!("{status}:")));
    }

    println!(
        "{} {} local, {} remote",
        "Branches:".white(),
        summary.local_branches,
        summary.remote_branches
    );
    println!(
        "{}",
        format!(
            "Refreshed at {}",
            summary.refreshed_at.format("%Y-%m-%d %H:%M:%S")
        )
        .bright_black()
    );
    println!();
}
