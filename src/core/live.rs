//! Working-tree backend for the checked-out branch.
//!
//! Listings come straight from the filesystem, status from the repository's
//! working-tree state, and every successful mutation publishes
//! `WorkingTreeModified` on the bus.

use crate::core::{
    config::BrowserConfig,
    content::{decode_text, ContentAccessor},
    entry::{DirectoryItem, ItemKind, Locator},
    error::{BrowseError, Result},
    events::{EventBus, MutationEvent},
    git::GitRepo,
    status::{classify_file, classify_folder, SimplifiedStatus},
    view::{BranchView, TreeBackend},
};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub struct WorkingTree {
    repo: Rc<GitRepo>,
    root: PathBuf,
    config: BrowserConfig,
    bus: EventBus,
}

impl WorkingTree {
    pub fn new(repo: Rc<GitRepo>, config: &BrowserConfig, bus: EventBus) -> Result<Self> {
        let root = repo.workdir()?.to_path_buf();
        Ok(Self {
            repo,
            root,
            config: config.clone(),
            bus,
        })
    }

    fn path_of(locator: &Locator) -> Result<&Path> {
        match locator {
            Locator::Path(path) => Ok(path),
            Locator::Tree { .. } => Err(BrowseError::invalid_operation(
                "working tree entries are addressed by path",
            )),
        }
    }

    fn modified(&self) {
        self.bus.publish(MutationEvent::WorkingTreeModified);
    }
}

impl ContentAccessor for WorkingTree {
    fn read_content(&self, item: &DirectoryItem) -> Result<String> {
        let path = Self::path_of(item.locator())?;
        Ok(decode_text(&fs::read(path)?))
    }

    fn write_content(&self, item: &DirectoryItem, text: &str) -> Result<()> {
        let path = Self::path_of(item.locator())?;
        fs::write(path, text)?;
        log::debug!("Wrote {} bytes to '{}'", text.len(), path.display());
        self.modified();
        Ok(())
    }
}

impl TreeBackend for WorkingTree {
    fn root(&self) -> Locator {
        Locator::Path(self.root.clone())
    }

    fn list_children(&self, locator: &Locator) -> Result<Vec<DirectoryItem>> {
        let folder = Self::path_of(locator)?;
        let mut items = Vec::new();

        for entry in fs::read_dir(folder)? {
            // Entries can vanish between the directory read and the stat
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry in '{}': {e}", folder.display());
                    continue;
                }
            };
            if self.config.is_hidden(&entry.file_name().to_string_lossy()) {
                continue;
            }
            match DirectoryItem::from_fs_entry(&entry, locator) {
                Ok(item) => items.push(item),
                Err(e) => log::debug!("Skipping '{}': {e}", entry.path().display()),
            }
        }

        log::debug!("Listed {} entries in '{}'", items.len(), folder.display());
        Ok(items)
    }

    fn classify(&self, item: &DirectoryItem) -> Result<SimplifiedStatus> {
        let path = Self::path_of(item.locator())?;
        match item.kind() {
            ItemKind::File => Ok(classify_file(&*self.repo, path)),
            ItemKind::Folder => classify_folder(&*self.repo, path),
        }
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn create_item(&self, folder: &Locator, name: &str, kind: ItemKind) -> Result<()> {
        let path = Self::path_of(folder)?.join(name);
        match kind {
            ItemKind::Folder => fs::create_dir(&path)?,
            ItemKind::File => {
                OpenOptions::new().write(true).create_new(true).open(&path)?;
            }
        }
        log::debug!("Created {kind:?} '{}'", path.display());
        self.modified();
        Ok(())
    }

    fn rename_item(&self, target: &Locator, new_name: &str) -> Result<()> {
        let old_path = Self::path_of(target)?;
        let new_path = old_path.with_file_name(new_name);
        // fs::rename silently replaces files on unix
        if fs::symlink_metadata(&new_path).is_ok() {
            return Err(BrowseError::invalid_operation(format!(
                "'{new_name}' already exists"
            )));
        }
        fs::rename(old_path, &new_path)?;
        self.modified();
        Ok(())
    }

    fn delete_item(&self, target: &Locator, kind: ItemKind) -> Result<()> {
        let path = Self::path_of(target)?;
        match kind {
            ItemKind::Folder => fs::remove_dir_all(path)?,
            ItemKind::File => fs::remove_file(path)?,
        }
        self.modified();
        Ok(())
    }
}

/// View of the checked-out branch, subscribed to working-tree mutations
pub fn live_view(
    name: &str,
    repo: Rc<GitRepo>,
    config: &BrowserConfig,
    bus: &EventBus,
) -> Result<BranchView> {
    let backend = WorkingTree::new(repo, config, bus.clone())?;
    BranchView::new(name, true, Box::new(backend), Some(bus.subscribe()))
}
