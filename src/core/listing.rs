//! Ordered contents of one folder.
//!
//! Folders come before files, names compare byte-wise, and every non-root
//! listing starts with the virtual `[ .. ]` entry. The listing also owns the
//! selection index.

use crate::core::{
    entry::{DirectoryItem, Locator},
    error::{BrowseError, Result},
    ordering::compare_entries,
};

/// One ordered folder listing with its selection.
///
/// The listing owns its items. A non-root listing starts with the `[ .. ]` entry.
#[derive(Debug, Clone)]
pub struct Listing {
    locator: Locator,
    items: Vec<DirectoryItem>,
    selected: Option<usize>,
}

impl Listing {
    /// Order `children` and prepend the parent entry when `up` is given
    pub fn build(locator: Locator, mut children: Vec<DirectoryItem>, up: Option<Locator>) -> Self {
        children.sort_by(compare_entries);
        if let Some(target) = up {
            children.insert(0, DirectoryItem::virtual_parent(target, &locator));
        }

        Self {
            locator,
            items: children,
            selected: None,
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn items(&self) -> &[DirectoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(DirectoryItem::name).collect()
    }

    pub fn has_parent_entry(&self) -> bool {
        self.items.first().is_some_and(DirectoryItem::is_virtual)
    }

    pub fn get(&self, index: usize) -> Result<&DirectoryItem> {
        self.items
            .get(index)
            .ok_or_else(|| BrowseError::entry_not_found(format!("#{index}")))
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Result<&mut DirectoryItem> {
        self.items
            .get_mut(index)
            .ok_or_else(|| BrowseError::entry_not_found(format!("#{index}")))
    }

    /// Index of the real (non-virtual) entry called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| !item.is_virtual() && item.name() == name)
    }

    pub fn parent_position(&self) -> Option<usize> {
        self.has_parent_entry().then_some(0)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&DirectoryItem> {
        self.selected.and_then(|index| self.items.get(index))
    }

    pub(crate) fn set_selected(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(index) = index {
            self.get(index)?;
        }
        self.selected = index;
        Ok(())
    }
}
