//! Listing entries shared by the working-tree and snapshot backends.
//!
//! A [`DirectoryItem`] is built from a filesystem record, from a tree entry of a
//! commit, or synthesized as the `[ .. ]` entry that leads back to the parent
//! folder. Status and content are not computed here; each item only carries the
//! memo slots the owning view fills on first read.

use crate::core::{
    error::{BrowseError, Result},
    git::RawTreeEntry,
    status::SimplifiedStatus,
};
use git2::{ObjectType, Oid};
use serde::Serialize;
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

/// Label of the synthetic entry that navigates one level up
pub const PARENT_LABEL: &str = "[ .. ]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

/// Where a listing or an item lives in its backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Absolute path in the working tree
    Path(PathBuf),
    /// Object handle plus the path relative to the snapshot root
    Tree { id: Oid, path: PathBuf },
}

impl Locator {
    pub fn path(&self) -> &Path {
        match self {
            Locator::Path(path) => path,
            Locator::Tree { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrigin {
    FileSystem,
    Tree,
    VirtualParent,
}

/// Lazily computed value with an explicit stale state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Memo<T> {
    #[default]
    Stale,
    Fresh(T),
}

impl<T> Memo<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Memo::Stale => None,
            Memo::Fresh(value) => Some(value),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Memo::Stale)
    }

    pub fn invalidate(&mut self) {
        *self = Memo::Stale;
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryItem {
    name: String,
    kind: ItemKind,
    locator: Locator,
    origin: ItemOrigin,
    // Locator of the listing holding this item; a handle, not an owner
    parent: Locator,
    pub(crate) status: Memo<SimplifiedStatus>,
    pub(crate) content: Memo<String>,
}

impl DirectoryItem {
    fn new(name: String, kind: ItemKind, locator: Locator, origin: ItemOrigin, parent: &Locator) -> Self {
        Self {
            name,
            kind,
            locator,
            origin,
            parent: parent.clone(),
            status: Memo::Stale,
            content: Memo::Stale,
        }
    }

    /// Adapt a working-tree directory record.
    ///
    /// Symlinks are not followed, so a link to a directory lists as a file.
    pub fn from_fs_entry(entry: &DirEntry, parent: &Locator) -> Result<Self> {
        let kind = if entry.file_type()?.is_dir() {
            ItemKind::Folder
        } else {
            ItemKind::File
        };

        Ok(Self::new(
            entry.file_name().to_string_lossy().into_owned(),
            kind,
            Locator::Path(entry.path()),
            ItemOrigin::FileSystem,
            parent,
        ))
    }

    /// Adapt a direct child of a snapshot tree; submodules and other targets are rejected
    pub fn from_tree_entry(entry: &RawTreeEntry, parent: &Locator) -> Result<Self> {
        let kind = match entry.kind {
            Some(ObjectType::Tree) => ItemKind::Folder,
            Some(ObjectType::Blob) => ItemKind::File,
            other => return Err(BrowseError::unsupported_tree_entry(&entry.name, other)),
        };

        Ok(Self::new(
            entry.name.clone(),
            kind,
            Locator::Tree {
                id: entry.id,
                path: parent.path().join(&entry.name),
            },
            ItemOrigin::Tree,
            parent,
        ))
    }

    /// The `[ .. ]` entry of a listing at `parent`, leading to `target`
    pub fn virtual_parent(target: Locator, parent: &Locator) -> Self {
        Self::new(
            PARENT_LABEL.to_string(),
            ItemKind::Folder,
            target,
            ItemOrigin::VirtualParent,
            parent,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn origin(&self) -> ItemOrigin {
        self.origin
    }

    pub fn is_virtual(&self) -> bool {
        self.origin == ItemOrigin::VirtualParent
    }

    pub fn parent(&self) -> &Locator {
        &self.parent
    }

    pub fn cached_status(&self) -> Option<SimplifiedStatus> {
        self.status.get().copied()
    }

    pub fn cached_content(&self) -> Option<&str> {
        self.content.get().map(String::as_str)
    }

    /// Mark status and content stale
    pub fn invalidate(&mut self) {
        self.status.invalidate();
        self.content.invalidate();
    }
}
