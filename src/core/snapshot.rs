//! Commit-tree backend for branches other than the checked-out one.
//!
//! Snapshots are immutable: every mutating call fails with `ReadOnlySnapshot`,
//! and status is a working-tree concept, so every entry reports `Unchanged`.

use crate::core::{
    content::{decode_text, ContentAccessor},
    entry::{DirectoryItem, ItemKind, Locator},
    error::{BrowseError, Result},
    git::{BranchInfo, GitRepo},
    status::SimplifiedStatus,
    view::{BranchView, TreeBackend},
};
use git2::Oid;
use std::path::PathBuf;
use std::rc::Rc;

pub struct SnapshotTree {
    repo: Rc<GitRepo>,
    branch: String,
    root: Oid,
}

impl SnapshotTree {
    pub fn new(repo: Rc<GitRepo>, branch: impl Into<String>, root: Oid) -> Self {
        Self {
            repo,
            branch: branch.into(),
            root,
        }
    }

    fn object_of(locator: &Locator) -> Result<Oid> {
        match locator {
            Locator::Tree { id, .. } => Ok(*id),
            Locator::Path(_) => Err(BrowseError::invalid_operation(
                "snapshot entries are addressed by object id",
            )),
        }
    }

    fn read_only(&self) -> BrowseError {
        BrowseError::read_only_snapshot(&self.branch)
    }
}

impl ContentAccessor for SnapshotTree {
    fn read_content(&self, item: &DirectoryItem) -> Result<String> {
        let blob = Self::object_of(item.locator())?;
        Ok(decode_text(&self.repo.read_blob(blob)?))
    }

    fn write_content(&self, _item: &DirectoryItem, _text: &str) -> Result<()> {
        Err(self.read_only())
    }
}

impl TreeBackend for SnapshotTree {
    fn root(&self) -> Locator {
        Locator::Tree {
            id: self.root,
            path: PathBuf::new(),
        }
    }

    fn list_children(&self, locator: &Locator) -> Result<Vec<DirectoryItem>> {
        let tree = Self::object_of(locator)?;
        self.repo
            .tree_children(tree)?
            .iter()
            .map(|entry| DirectoryItem::from_tree_entry(entry, locator))
            .collect()
    }

    fn classify(&self, _item: &DirectoryItem) -> Result<SimplifiedStatus> {
        Ok(SimplifiedStatus::Unchanged)
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn create_item(&self, _folder: &Locator, _name: &str, _kind: ItemKind) -> Result<()> {
        Err(self.read_only())
    }

    fn rename_item(&self, _target: &Locator, _new_name: &str) -> Result<()> {
        Err(self.read_only())
    }

    fn delete_item(&self, _target: &Locator, _kind: ItemKind) -> Result<()> {
        Err(self.read_only())
    }
}

/// Read-only view of a branch's tip commit
pub fn snapshot_view(branch: &BranchInfo, repo: Rc<GitRepo>) -> Result<BranchView> {
    let backend = SnapshotTree::new(repo, &branch.name, branch.tree_id);
    BranchView::new(&branch.name, branch.is_head, Box::new(backend), None)
}
