use crate::commands::{open_session, select_branch};
use crate::core::error::{BrowseError, Result};
use std::path::{Path, PathBuf};

pub fn execute_show(branch: Option<String>, path: PathBuf) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BrowseError::invalid_operation(format!("'{}' does not name a file", path.display()))
        })?;
    let folder = path.parent().unwrap_or(Path::new(""));

    let mut session = open_session()?;
    let view = select_branch(&mut session, branch.as_deref())?;
    view.open_path(folder)?;
    view.select_name(&file_name)?;

    let index = view
        .peek_listing()
        .selected_index()
        .ok_or_else(|| BrowseError::entry_not_found(&file_name))?;
    let content = view.read(index)?;

    print!("{content}");
    Ok(())
}
