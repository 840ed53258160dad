//! Text content of file entries.
//!
//! Backends implement [`ContentAccessor`] for the raw read and write; the
//! helpers here add the rules shared by both: folders have no content, reads
//! are memoized on the item, and a write leaves the item's status and content
//! stale so the next read goes back to the backend.

use crate::core::{
    entry::{DirectoryItem, Memo},
    error::{BrowseError, Result},
};

pub trait ContentAccessor {
    /// Read the full text of a file entry, bypassing any cache
    fn read_content(&self, item: &DirectoryItem) -> Result<String>;

    /// Replace the full text of a file entry
    fn write_content(&self, item: &DirectoryItem, text: &str) -> Result<()>;
}

/// Decode backend bytes as UTF-8, replacing invalid sequences with U+FFFD
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn ensure_file(item: &DirectoryItem) -> Result<()> {
    if item.is_file() {
        Ok(())
    } else {
        Err(BrowseError::invalid_operation(format!(
            "cannot get content of folder '{}'",
            item.name()
        )))
    }
}

/// Content of `item`, read once and cached until invalidated
pub fn load_content<'i, A: ContentAccessor + ?Sized>(
    accessor: &A,
    item: &'i mut DirectoryItem,
) -> Result<&'i str> {
    ensure_file(item)?;
    if item.content.is_stale() {
        log::debug!("Reading content of '{}'", item.name());
        let text = accessor.read_content(item)?;
        item.content = Memo::Fresh(text);
    }
    Ok(item.cached_content().unwrap_or_default())
}

/// Overwrite `item` and mark its cached status and content stale
pub fn store_content<A: ContentAccessor + ?Sized>(
    accessor: &A,
    item: &mut DirectoryItem,
    text: &str,
) -> Result<()> {
    ensure_file(item)?;
    accessor.write_content(item, text)?;
    item.invalidate();
    Ok(())
}
