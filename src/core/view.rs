//! Navigable view over one branch.
//!
//! A [`BranchView`] keeps the current folder listing, the selection, and the
//! trail of folders leading back to the root. The backend behind it is either
//! the live working tree or an immutable commit tree; both sit behind
//! [`TreeBackend`] so navigation, ordering and caching behave the same.
//!
//! # Invalidation
//! A view subscribed to the mutation bus drains it before every access. Any
//! event marks the listing stale, and the next access reloads it, preserving
//! the selection by name. Reloading recreates every entry, which drops cached
//! status and content along with it.

use crate::core::{
    content::{load_content, store_content, ContentAccessor},
    entry::{DirectoryItem, ItemKind, Locator, Memo},
    error::{BrowseError, Result},
    events::Subscription,
    listing::Listing,
    request::{validate_item_name, Outstanding, PendingRequest, RequestTarget, UserResponse},
    status::SimplifiedStatus,
};
use std::path::{Component, Path};

/// Storage a branch view reads from.
///
/// Read-only backends fail every mutating call with `ReadOnlySnapshot`.
pub trait TreeBackend: ContentAccessor {
    fn root(&self) -> Locator;

    /// Direct children of the folder at `locator`, in any order
    fn list_children(&self, locator: &Locator) -> Result<Vec<DirectoryItem>>;

    fn classify(&self, item: &DirectoryItem) -> Result<SimplifiedStatus>;

    fn is_read_only(&self) -> bool;

    fn create_item(&self, folder: &Locator, name: &str, kind: ItemKind) -> Result<()>;

    fn rename_item(&self, target: &Locator, new_name: &str) -> Result<()>;

    fn delete_item(&self, target: &Locator, kind: ItemKind) -> Result<()>;
}

pub struct BranchView {
    name: String,
    is_head: bool,
    backend: Box<dyn TreeBackend>,
    // Ancestors of the current folder, root first
    trail: Vec<Locator>,
    listing: Listing,
    subscription: Option<Subscription>,
    stale: bool,
    pending: Option<Outstanding>,
}

impl BranchView {
    /// Create a view positioned at the backend's root folder
    pub fn new(
        name: impl Into<String>,
        is_head: bool,
        backend: Box<dyn TreeBackend>,
        subscription: Option<Subscription>,
    ) -> Result<Self> {
        let root = backend.root();
        let listing = Listing::build(root.clone(), backend.list_children(&root)?, None);

        Ok(Self {
            name: name.into(),
            is_head,
            backend,
            trail: Vec::new(),
            listing,
            subscription,
            stale: false,
            pending: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_head(&self) -> bool {
        self.is_head
    }

    pub fn is_read_only(&self) -> bool {
        self.backend.is_read_only()
    }

    pub fn is_at_root(&self) -> bool {
        self.trail.is_empty()
    }

    pub fn current_locator(&self) -> &Locator {
        self.listing.locator()
    }

    /// Current listing after applying any pending invalidation
    pub fn listing(&mut self) -> Result<&Listing> {
        self.sync()?;
        Ok(&self.listing)
    }

    /// Current listing as last loaded, without checking for invalidation
    pub fn peek_listing(&self) -> &Listing {
        &self.listing
    }

    /// Content of the selected file, if a file is selected and has been read
    pub fn selected_content(&self) -> Option<&str> {
        self.listing
            .selected_item()
            .filter(|item| item.is_file())
            .and_then(DirectoryItem::cached_content)
    }

    pub fn open_root(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.enter_root()
    }

    fn enter_root(&mut self) -> Result<()> {
        self.trail.clear();
        let root = self.backend.root();
        self.listing = self.load(&root)?;
        self.discard_events();
        self.stale = false;
        log::debug!("Opened root of branch '{}'", self.name);
        Ok(())
    }

    /// Enter the selected folder, or go up when the parent entry is selected.
    ///
    /// Fails with `RequestPending` while a request awaits its response, since
    /// the request targets the current folder.
    pub fn navigate(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.sync()?;

        let (target, upward) = match self.listing.selected_item() {
            Some(item) if item.is_folder() => (item.locator().clone(), item.is_virtual()),
            _ => {
                return Err(BrowseError::invalid_operation(
                    "navigate requires a selected folder",
                ))
            }
        };

        let popped = if upward {
            self.trail.pop()
        } else {
            self.trail.push(self.listing.locator().clone());
            None
        };

        match self.load(&target) {
            Ok(listing) => {
                log::debug!(
                    "Branch '{}' navigated to '{}'",
                    self.name,
                    target.path().display()
                );
                self.listing = listing;
                Ok(())
            }
            Err(e) => {
                match popped {
                    Some(parent) => self.trail.push(parent),
                    None => {
                        self.trail.pop();
                    }
                }
                Err(e)
            }
        }
    }

    /// Select an entry by index; selecting a file reads its content
    pub fn select_item(&mut self, index: Option<usize>) -> Result<()> {
        self.sync()?;
        self.apply_selection(index)
    }

    pub fn select_name(&mut self, name: &str) -> Result<()> {
        self.sync()?;
        let index = self
            .listing
            .position(name)
            .ok_or_else(|| BrowseError::entry_not_found(name))?;
        self.apply_selection(Some(index))
    }

    /// Select the `[ .. ]` entry
    pub fn select_parent(&mut self) -> Result<()> {
        self.sync()?;
        let index = self
            .listing
            .parent_position()
            .ok_or_else(|| BrowseError::invalid_operation("the root folder has no parent"))?;
        self.apply_selection(Some(index))
    }

    /// Re-read the current folder from the backend
    pub fn reload(&mut self, preserve_selection: bool) -> Result<()> {
        let previous = self
            .listing
            .selected_item()
            .map(|item| (item.name().to_string(), item.is_virtual()));
        self.discard_events();

        let locator = self.listing.locator().clone();
        let listing = match self.load(&locator) {
            Ok(listing) => listing,
            Err(BrowseError::Io(e))
                if e.kind() == std::io::ErrorKind::NotFound && !self.trail.is_empty() =>
            {
                log::warn!(
                    "Folder '{}' disappeared, returning to root",
                    locator.path().display()
                );
                return self.enter_root();
            }
            Err(e) => return Err(e),
        };
        self.listing = listing;
        self.stale = false;

        if preserve_selection {
            let index = previous.and_then(|(name, is_virtual)| {
                if is_virtual {
                    self.listing.parent_position()
                } else {
                    self.listing.position(&name)
                }
            });
            // A failed re-read must not make the listing itself unusable
            if let Err(e) = self.apply_selection(index) {
                log::warn!(
                    "Clearing selection in '{}' after failed read: {e}",
                    locator.path().display()
                );
            }
        }
        Ok(())
    }

    /// Simplified status of an entry, computed on first read
    pub fn status(&mut self, index: usize) -> Result<SimplifiedStatus> {
        self.sync()?;
        let backend = self.backend.as_ref();
        let item = self.listing.get_mut(index)?;

        if item.is_virtual() {
            return Ok(SimplifiedStatus::Unchanged);
        }
        if let Some(status) = item.cached_status() {
            return Ok(status);
        }

        log::debug!("Computing status of '{}'", item.name());
        let status = backend.classify(item)?;
        item.status = Memo::Fresh(status);
        Ok(status)
    }

    pub fn read(&mut self, index: usize) -> Result<String> {
        self.sync()?;
        let backend = self.backend.as_ref();
        let item = self.listing.get_mut(index)?;
        load_content(backend, item).map(str::to_string)
    }

    pub fn write(&mut self, index: usize, text: &str) -> Result<()> {
        self.sync()?;
        let backend = self.backend.as_ref();
        let item = self.listing.get_mut(index)?;
        store_content(backend, item, text)
    }

    /// Walk from the root along `path`, relative to the branch root
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        self.ensure_idle()?;
        self.enter_root()?;

        for component in path.components() {
            match component {
                Component::Normal(name) => {
                    let name = name.to_string_lossy();
                    self.select_name(&name)?;
                    if self.listing.selected_item().is_some_and(DirectoryItem::is_file) {
                        return Err(BrowseError::invalid_operation(format!(
                            "'{name}' is not a folder"
                        )));
                    }
                }
                Component::ParentDir => self.select_parent()?,
                Component::CurDir | Component::RootDir | Component::Prefix(_) => continue,
            }
            self.navigate()?;
        }
        Ok(())
    }

    pub fn pending_request(&self) -> Option<PendingRequest> {
        self.pending.as_ref().map(Outstanding::request)
    }

    /// Start a mutation that needs user input; only one may be outstanding
    pub fn request(&mut self, request: PendingRequest) -> Result<()> {
        if self.backend.is_read_only() {
            return Err(BrowseError::read_only_snapshot(&self.name));
        }
        if self.pending.is_some() {
            return Err(BrowseError::RequestPending);
        }
        self.sync()?;

        let outstanding = match request {
            PendingRequest::CreateFile => Outstanding::Create(ItemKind::File),
            PendingRequest::CreateFolder => Outstanding::Create(ItemKind::Folder),
            PendingRequest::RenameItem => Outstanding::Rename(self.selected_target()?),
            PendingRequest::DeleteItem => Outstanding::Delete(self.selected_target()?),
        };
        log::debug!("Branch '{}' waiting on {request:?}", self.name);
        self.pending = Some(outstanding);
        Ok(())
    }

    /// Resolve the outstanding request
    pub fn respond(&mut self, response: UserResponse) -> Result<()> {
        let outstanding = self.pending.take().ok_or(BrowseError::NoPendingRequest)?;
        let request = outstanding.request();

        match (outstanding, response) {
            (_, UserResponse::Declined) => {
                log::debug!("{request:?} declined");
                Ok(())
            }
            (Outstanding::Create(kind), UserResponse::Name(name)) => self.create_entry(kind, &name),
            (Outstanding::Rename(target), UserResponse::Name(name)) => {
                self.rename_entry(&target, &name)
            }
            (Outstanding::Delete(target), UserResponse::Confirmed) => self.delete_entry(&target),
            (outstanding, response) => {
                self.pending = Some(outstanding);
                Err(BrowseError::invalid_operation(format!(
                    "{response:?} does not answer {request:?}"
                )))
            }
        }
    }

    fn selected_target(&self) -> Result<RequestTarget> {
        self.listing
            .selected_item()
            .filter(|item| !item.is_virtual())
            .map(|item| RequestTarget {
                locator: item.locator().clone(),
                name: item.name().to_string(),
                kind: item.kind(),
            })
            .ok_or_else(|| BrowseError::invalid_operation("no entry is selected"))
    }

    fn create_entry(&mut self, kind: ItemKind, name: &str) -> Result<()> {
        validate_item_name(name)?;
        self.backend.create_item(self.listing.locator(), name, kind)?;
        self.reload(false)?;
        let index = self.listing.position(name);
        self.apply_selection(index)
    }

    fn rename_entry(&mut self, target: &RequestTarget, new_name: &str) -> Result<()> {
        validate_item_name(new_name)?;
        self.backend.rename_item(&target.locator, new_name)?;
        log::debug!("Renamed '{}' to '{new_name}'", target.name);
        self.reload(false)?;
        let index = self.listing.position(new_name);
        self.apply_selection(index)
    }

    fn delete_entry(&mut self, target: &RequestTarget) -> Result<()> {
        self.backend.delete_item(&target.locator, target.kind)?;
        log::debug!("Deleted '{}'", target.name);
        self.reload(false)
    }

    fn load(&self, locator: &Locator) -> Result<Listing> {
        let children = self.backend.list_children(locator)?;
        Ok(Listing::build(
            locator.clone(),
            children,
            self.trail.last().cloned(),
        ))
    }

    // The selection only moves once the new file's content has been read
    fn apply_selection(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(index) = index {
            let backend = self.backend.as_ref();
            let item = self.listing.get_mut(index)?;
            if item.is_file() {
                load_content(backend, item)?;
            }
        }
        self.listing.set_selected(index)
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.pending {
            Some(_) => Err(BrowseError::RequestPending),
            None => Ok(()),
        }
    }

    fn sync(&mut self) -> Result<()> {
        if let Some(subscription) = &self.subscription {
            let events = subscription.drain();
            if !events.is_empty() {
                log::debug!("Branch '{}' invalidated by {events:?}", self.name);
                self.stale = true;
            }
        }
        if self.stale {
            self.reload(true)?;
        }
        Ok(())
    }

    fn discard_events(&self) {
        if let Some(subscription) = &self.subscription {
            subscription.drain();
        }
    }
}
