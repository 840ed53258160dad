pub mod branches;
pub mod ls;
pub mod show;
pub mod summary;

pub use branches::*;
pub use ls::*;
pub use show::*;
pub use summary::*;

use crate::core::{
    config::BrowserConfig,
    error::Result,
    session::RepoSession,
    view::BranchView,
};
use std::env;

/// Session for the repository containing the current directory
pub(crate) fn open_session() -> Result<RepoSession> {
    let current_dir = env::current_dir()?;
    let config = BrowserConfig::load_or_default()?;
    RepoSession::open(&current_dir, config)
}

/// The named branch, or the checked-out one
pub(crate) fn select_branch<'s>(
    session: &'s mut RepoSession,
    branch: Option<&str>,
) -> Result<&'s mut BranchView> {
    match branch {
        Some(name) => session.branch_mut(name),
        None => session.head_mut(),
    }
}
