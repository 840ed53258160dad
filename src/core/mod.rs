//! Core functionality for git-browse.
//!
//! Status classification, the two tree backends, branch views and the session
//! that ties them to one repository.

pub mod colors;
pub mod config;
pub mod content;
pub mod dirs;
pub mod entry;
pub mod error;
pub mod events;
pub mod git;
pub mod listing;
pub mod live;
pub mod ordering;
pub mod output;
pub mod request;
pub mod session;
pub mod snapshot;
pub mod status;
pub mod view;

// === Error handling ===
pub use error::{BrowseError, Result};

// === Backend access ===
pub use git::{BranchInfo, GitRepo};
pub use status::{SimplifiedStatus, StatusSource};

// === Entries and listings ===
pub use entry::{DirectoryItem, ItemKind, Locator, PARENT_LABEL};
pub use listing::Listing;

// === Views and backends ===
pub use content::ContentAccessor;
pub use live::{live_view, WorkingTree};
pub use snapshot::{snapshot_view, SnapshotTree};
pub use view::{BranchView, TreeBackend};

// === Session ===
pub use config::BrowserConfig;
pub use events::{EventBus, MutationEvent, Subscription};
pub use request::{PendingRequest, UserResponse};
pub use session::{RepoSession, RepoSummary, WorkingTreeState};

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header};
