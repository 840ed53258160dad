use crate::commands::{open_session, select_branch};
use crate::core::{colors::format_listing_line, error::Result, print_section_header};
use std::path::PathBuf;

pub fn execute_ls(branch: Option<String>, path: Option<PathBuf>) -> Result<()> {
    let mut session = open_session()?;
    let view = select_branch(&mut session, branch.as_deref())?;

    let location = match &path {
        Some(path) => {
            view.open_path(path)?;
            format!("{}:/{}", view.name(), path.display())
        }
        None => format!("{}:/", view.name()),
    };

    print_section_header(&location);

    let len = view.listing()?.len();
    for index in 0..len {
        let status = view.status(index)?;
        let item = view.peek_listing().get(index)?;
        println!("{}", format_listing_line(item, status));
    }

    println!();
    Ok(())
}
