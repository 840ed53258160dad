//! Simplified change status and its classification from raw git state.
//!
//! The backend reports fine-grained [`RawState`] flags per path (working copy and
//! staged index flavors). This module reduces them to the five-value
//! [`SimplifiedStatus`] used for display, and aggregates the states found beneath
//! a folder into a single folder status.
//!
//! # Public API
//! - [`SimplifiedStatus`]: display status of a listing entry
//! - [`StatusSource`]: per-path raw state lookups implemented by the git backend
//! - [`classify_file`] / [`classify_folder`]: backend-backed classification
//! - [`simplify_file`] / [`aggregate_folder`]: the pure reduction rules
//!
//! # Folder Aggregation
//! Conflicted wins over anything. Unchanged and Ignored lose to anything. Every
//! other change (new, modified, renamed, type change, deleted) counts as Modified,
//! so folders never report Added even though files do.

use crate::core::error::{BrowseError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Fine-grained per-path state as reported by libgit2.
pub type RawState = git2::Status;

const NEW: RawState = RawState::WT_NEW.union(RawState::INDEX_NEW);

const CHANGED: RawState = RawState::WT_MODIFIED
    .union(RawState::INDEX_MODIFIED)
    .union(RawState::WT_RENAMED)
    .union(RawState::INDEX_RENAMED)
    .union(RawState::WT_TYPECHANGE)
    .union(RawState::INDEX_TYPECHANGE);

const DELETED: RawState = RawState::WT_DELETED.union(RawState::INDEX_DELETED);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimplifiedStatus {
    Unchanged,
    Added,
    Modified,
    Conflicted,
    Ignored,
}

impl SimplifiedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimplifiedStatus::Unchanged => "unchanged",
            SimplifiedStatus::Added => "added",
            SimplifiedStatus::Modified => "modified",
            SimplifiedStatus::Conflicted => "conflicted",
            SimplifiedStatus::Ignored => "ignored",
        }
    }

    /// Single-column marker used by listings
    pub fn marker(&self) -> &'static str {
        match self {
            SimplifiedStatus::Unchanged => " ",
            SimplifiedStatus::Added => "A",
            SimplifiedStatus::Modified => "M",
            SimplifiedStatus::Conflicted => "C",
            SimplifiedStatus::Ignored => "!",
        }
    }
}

impl fmt::Display for SimplifiedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw state lookups the classifier needs from the version-control backend.
///
/// Paths are absolute working-tree paths.
pub trait StatusSource {
    fn raw_status(&self, path: &Path) -> Result<RawState>;

    /// All states at or beneath `prefix`, untracked files included
    fn raw_statuses(&self, prefix: &Path) -> Result<Vec<(PathBuf, RawState)>>;
}

/// Map a single file's raw state to its display status
pub fn simplify_file(state: RawState) -> SimplifiedStatus {
    if state.is_conflicted() {
        SimplifiedStatus::Conflicted
    } else if state.is_ignored() {
        SimplifiedStatus::Ignored
    } else if state.intersects(NEW) {
        SimplifiedStatus::Added
    } else if state.intersects(CHANGED) {
        SimplifiedStatus::Modified
    } else {
        // deleted, unreadable and unmodified entries
        SimplifiedStatus::Unchanged
    }
}

/// Map a descendant's raw state to its folder-level contribution
fn simplify_for_folder(state: RawState) -> SimplifiedStatus {
    if state.is_conflicted() {
        SimplifiedStatus::Conflicted
    } else if state.is_ignored() {
        SimplifiedStatus::Unchanged
    } else if state.intersects(NEW | CHANGED | DELETED) {
        SimplifiedStatus::Modified
    } else {
        SimplifiedStatus::Unchanged
    }
}

/// Priority used when reducing folder statuses: conflicted first, unchanged last
pub fn folder_priority(a: SimplifiedStatus, b: SimplifiedStatus) -> Result<Ordering> {
    use SimplifiedStatus::*;

    match (a, b) {
        (Conflicted, Conflicted) => Ok(Ordering::Equal),
        (Conflicted, _) => Ok(Ordering::Greater),
        (_, Conflicted) => Ok(Ordering::Less),

        (Unchanged | Ignored, Unchanged | Ignored) => Ok(Ordering::Equal),
        (Unchanged | Ignored, _) => Ok(Ordering::Less),
        (_, Unchanged | Ignored) => Ok(Ordering::Greater),

        (Modified, Modified) => Ok(Ordering::Equal),

        _ => Err(BrowseError::UnexpectedStatusPair { a, b }),
    }
}

/// Reduce every raw state found beneath a folder to the folder's status
pub fn aggregate_folder<I>(states: I) -> Result<SimplifiedStatus>
where
    I: IntoIterator<Item = RawState>,
{
    let mut best = SimplifiedStatus::Unchanged;

    for status in states.into_iter().map(simplify_for_folder) {
        if folder_priority(status, best)? == Ordering::Greater {
            best = status;
        }
        if best == SimplifiedStatus::Conflicted {
            break;
        }
    }

    Ok(best)
}

/// Classify a single working-tree file.
///
/// Backend failures degrade to `Unchanged`.
pub fn classify_file(source: &dyn StatusSource, path: &Path) -> SimplifiedStatus {
    match source.raw_status(path) {
        Ok(state) => simplify_file(state),
        Err(e) => {
            log::debug!("Status of '{}' unavailable: {e}", path.display());
            SimplifiedStatus::Unchanged
        }
    }
}

/// Classify a working-tree folder from everything beneath it.
///
/// Backend failures degrade to `Unchanged`; only an aggregation invariant
/// violation is reported as an error.
pub fn classify_folder(source: &dyn StatusSource, path: &Path) -> Result<SimplifiedStatus> {
    match source.raw_statuses(path) {
        Ok(entries) => aggregate_folder(entries.into_iter().map(|(_, state)| state)),
        Err(e) => {
            log::debug!("Folder status of '{}' unavailable: {e}", path.display());
            Ok(SimplifiedStatus::Unchanged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// In-memory status source keyed by absolute path
    #[derive(Default)]
    struct FakeSource {
        states: BTreeMap<PathBuf, RawState>,
        failing: bool,
    }

    impl FakeSource {
        fn with(entries: &[(&str, RawState)]) -> Self {
            Self {
                states: entries
                    .iter()
                    .map(|(p, s)| (PathBuf::from(p), *s))
                    .collect(),
                failing: false,
            }
        }
    }

    impl StatusSource for FakeSource {
        fn raw_status(&self, path: &Path) -> Result<RawState> {
            if self.failing {
                return Err(BrowseError::Io(std::io::Error::other("backend down")));
            }
            Ok(self.states.get(path).copied().unwrap_or(RawState::CURRENT))
        }

        fn raw_statuses(&self, prefix: &Path) -> Result<Vec<(PathBuf, RawState)>> {
            if self.failing {
                return Err(BrowseError::Io(std::io::Error::other("backend down")));
            }
            Ok(self
                .states
                .iter()
                .filter(|(p, _)| p.starts_with(prefix))
                .map(|(p, s)| (p.clone(), *s))
                .collect())
        }
    }

    #[test]
    fn test_simplify_file_mapping() {
        assert_eq!(simplify_file(RawState::WT_NEW), SimplifiedStatus::Added);
        assert_eq!(simplify_file(RawState::INDEX_NEW), SimplifiedStatus::Added);
        assert_eq!(simplify_file(RawState::WT_MODIFIED), SimplifiedStatus::Modified);
        assert_eq!(simplify_file(RawState::INDEX_MODIFIED), SimplifiedStatus::Modified);
        assert_eq!(simplify_file(RawState::INDEX_RENAMED), SimplifiedStatus::Modified);
        assert_eq!(simplify_file(RawState::WT_TYPECHANGE), SimplifiedStatus::Modified);
        assert_eq!(simplify_file(RawState::CONFLICTED), SimplifiedStatus::Conflicted);
        assert_eq!(simplify_file(RawState::IGNORED), SimplifiedStatus::Ignored);
        assert_eq!(simplify_file(RawState::CURRENT), SimplifiedStatus::Unchanged);
        assert_eq!(simplify_file(RawState::WT_DELETED), SimplifiedStatus::Unchanged);
        assert_eq!(simplify_file(RawState::INDEX_DELETED), SimplifiedStatus::Unchanged);
        assert_eq!(simplify_file(RawState::WT_UNREADABLE), SimplifiedStatus::Unchanged);
    }

    #[test]
    fn test_staged_new_with_later_edit_is_added() {
        let state = RawState::INDEX_NEW | RawState::WT_MODIFIED;
        assert_eq!(simplify_file(state), SimplifiedStatus::Added);
    }

    #[test]
    fn test_folder_conflict_wins() -> Result<()> {
        let states = [RawState::WT_NEW, RawState::CONFLICTED, RawState::CURRENT];
        assert_eq!(aggregate_folder(states)?, SimplifiedStatus::Conflicted);
        Ok(())
    }

    #[test]
    fn test_folder_changes_reduce_to_modified() -> Result<()> {
        for state in [
            RawState::WT_NEW,
            RawState::INDEX_NEW,
            RawState::WT_MODIFIED,
            RawState::INDEX_RENAMED,
            RawState::WT_TYPECHANGE,
            RawState::WT_DELETED,
            RawState::INDEX_DELETED,
        ] {
            assert_eq!(
                aggregate_folder([RawState::CURRENT, state])?,
                SimplifiedStatus::Modified,
                "state {state:?}"
            );
        }
        Ok(())
    }

    #[test]
    fn test_folder_ignored_collapses_to_unchanged() -> Result<()> {
        let states = [RawState::IGNORED, RawState::CURRENT];
        assert_eq!(aggregate_folder(states)?, SimplifiedStatus::Unchanged);
        Ok(())
    }

    #[test]
    fn test_empty_folder_is_unchanged() -> Result<()> {
        assert_eq!(aggregate_folder([])?, SimplifiedStatus::Unchanged);
        Ok(())
    }

    #[test]
    fn test_folder_priority_pairs() -> Result<()> {
        use SimplifiedStatus::*;
        assert_eq!(folder_priority(Conflicted, Modified)?, Ordering::Greater);
        assert_eq!(folder_priority(Unchanged, Modified)?, Ordering::Less);
        assert_eq!(folder_priority(Ignored, Conflicted)?, Ordering::Less);
        assert_eq!(folder_priority(Modified, Modified)?, Ordering::Equal);
        assert!(matches!(
            folder_priority(Added, Modified),
            Err(BrowseError::UnexpectedStatusPair { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_classify_folder_only_counts_descendants() -> Result<()> {
        let source = FakeSource::with(&[
            ("/repo/src/main.rs", RawState::WT_MODIFIED),
            ("/repo/docs/guide.md", RawState::CONFLICTED),
        ]);
        assert_eq!(
            classify_folder(&source, Path::new("/repo/src"))?,
            SimplifiedStatus::Modified
        );
        assert_eq!(
            classify_folder(&source, Path::new("/repo/docs"))?,
            SimplifiedStatus::Conflicted
        );
        assert_eq!(
            classify_folder(&source, Path::new("/repo/empty"))?,
            SimplifiedStatus::Unchanged
        );
        Ok(())
    }

    #[test]
    fn test_backend_failure_degrades_to_unchanged() -> Result<()> {
        let mut source = FakeSource::with(&[("/repo/a.txt", RawState::WT_NEW)]);
        source.failing = true;
        assert_eq!(
            classify_file(&source, Path::new("/repo/a.txt")),
            SimplifiedStatus::Unchanged
        );
        assert_eq!(
            classify_folder(&source, Path::new("/repo"))?,
            SimplifiedStatus::Unchanged
        );
        Ok(())
    }

    #[test]
    fn test_classification_is_idempotent() -> Result<()> {
        let source = FakeSource::with(&[("/repo/lib/a.rs", RawState::INDEX_NEW)]);
        let path = Path::new("/repo/lib/a.rs");
        assert_eq!(classify_file(&source, path), classify_file(&source, path));
        let folder = Path::new("/repo/lib");
        assert_eq!(
            classify_folder(&source, folder)?,
            classify_folder(&source, folder)?
        );
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!(SimplifiedStatus::Conflicted.to_string(), "conflicted");
        assert_eq!(SimplifiedStatus::Added.marker(), "A");
    }
}
