//! Requests that wait on user input before mutating the working tree.
//!
//! A view holds at most one outstanding request. The UI resolves it with a
//! [`UserResponse`]; `Declined` drops it without touching anything.

use crate::core::{
    entry::{ItemKind, Locator, PARENT_LABEL},
    error::{BrowseError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    CreateFile,
    CreateFolder,
    /// Rename the selected entry
    RenameItem,
    /// Delete the selected entry
    DeleteItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserResponse {
    Name(String),
    Confirmed,
    Declined,
}

/// Entry captured when a rename or delete request is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestTarget {
    pub locator: Locator,
    pub name: String,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outstanding {
    Create(ItemKind),
    Rename(RequestTarget),
    Delete(RequestTarget),
}

impl Outstanding {
    pub fn request(&self) -> PendingRequest {
        match self {
            Outstanding::Create(ItemKind::File) => PendingRequest::CreateFile,
            Outstanding::Create(ItemKind::Folder) => PendingRequest::CreateFolder,
            Outstanding::Rename(_) => PendingRequest::RenameItem,
            Outstanding::Delete(_) => PendingRequest::DeleteItem,
        }
    }
}

/// Reject names that would escape the current folder or clash with the parent entry
pub fn validate_item_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name == PARENT_LABEL
        || name.contains(['/', '\\']);

    if invalid {
        Err(BrowseError::invalid_operation(format!(
            "'{name}' is not a valid entry name"
        )))
    } else {
        Ok(())
    }
}
