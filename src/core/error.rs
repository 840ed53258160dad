//! Domain-specific error types for the browser core.
//!
//! [`BrowseError`] covers every failure the core can surface. Status reads never
//! produce one for backend I/O problems (those degrade to `Unchanged`), while
//! content reads/writes and navigation report theirs to the caller.
//!
//! # Error Categories
//! - **Invalid operation**: content of a folder, navigate without a folder selected
//! - **Read-only snapshot**: writes against a historical branch
//! - **Unsupported backend shape**: tree entries that are neither trees nor blobs
//! - **Invariant violations**: unexpected folder status pairings
//! - **Backend**: git2 and filesystem errors, missing repository or working tree

use crate::core::status::SimplifiedStatus;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowseError {
    // Repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Repository has no working directory")]
    NoWorkingTree,

    #[error("Branch not found: {name}")]
    BranchNotFound { name: String },

    // Navigation and content errors
    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Branch '{branch}' is a read-only snapshot")]
    ReadOnlySnapshot { branch: String },

    #[error("Entry not found: {name}")]
    EntryNotFound { name: String },

    #[error("Tree entry '{name}' targets a {kind}, which is not supported")]
    UnsupportedTreeEntry { name: String, kind: String },

    #[error("Unexpected folder item status when comparing {a} vs {b}")]
    UnexpectedStatusPair {
        a: SimplifiedStatus,
        b: SimplifiedStatus,
    },

    // Pending user requests
    #[error("Another request is already waiting for a response")]
    RequestPending,

    #[error("No request is waiting for a response")]
    NoPendingRequest,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using BrowseError
pub type Result<T> = std::result::Result<T, BrowseError>;

impl BrowseError {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    pub fn read_only_snapshot(branch: impl Into<String>) -> Self {
        Self::ReadOnlySnapshot {
            branch: branch.into(),
        }
    }

    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::EntryNotFound { name: name.into() }
    }

    pub fn branch_not_found(name: impl Into<String>) -> Self {
        Self::BranchNotFound { name: name.into() }
    }

    pub fn unsupported_tree_entry(name: impl Into<String>, kind: Option<git2::ObjectType>) -> Self {
        Self::UnsupportedTreeEntry {
            name: name.into(),
            kind: kind.map_or_else(|| "unknown object".to_string(), |k| k.to_string()),
        }
    }

    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }
}
