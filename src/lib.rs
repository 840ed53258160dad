//! git-browse - browse any branch of a Git repository as a folder tree.
//!
//! The checked-out branch is read from the working directory and carries a
//! simplified change status per entry; every other branch is read from its
//! tip commit as a read-only snapshot. Both go through the same
//! [`BranchView`] navigation model.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - [`RepoSession`]: branch views for one repository
//! - [`BranchView`]: listing, selection, navigation, status and content
//! - [`SimplifiedStatus`]: the five-value change status
//! - [`EventBus`]: mutation events that invalidate cached state

pub mod commands;
pub mod core;

pub use core::{
    BranchView,
    BrowseError,
    BrowserConfig,
    DirectoryItem,
    EventBus,
    ItemKind,
    Listing,
    MutationEvent,
    PendingRequest,
    RepoSession,
    RepoSummary,
    Result,
    SimplifiedStatus,
    UserResponse,
};
