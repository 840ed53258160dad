//! Colour mapping for simplified statuses.
//!
//! Every listing line and the summary pick their colour here, so a status looks
//! the same wherever it is printed.
//!
//! # Color Scheme
//! - **Added**: green
//! - **Modified**: yellow
//! - **Conflicted**: red bold
//! - **Ignored**: bright black (muted)
//! - **Unchanged**: plain white

use crate::core::{
    entry::{DirectoryItem, ItemKind},
    status::SimplifiedStatus,
};
use colored::*;

/// Returns a closure that applies the colour of `status` to any text
pub fn get_status_color_style(status: SimplifiedStatus) -> Box<dyn Fn(&str) -> ColoredString> {
    match status {
        SimplifiedStatus::Unchanged => Box::new(|text: &str| text.white()),
        SimplifiedStatus::Added => Box::new(|text: &str| text.green()),
        SimplifiedStatus::Modified => Box::new(|text: &str| text.yellow()),
        SimplifiedStatus::Conflicted => Box::new(|text: &str| text.red().bold()),
        SimplifiedStatus::Ignored => Box::new(|text: &str| text.bright_black()),
    }
}

pub fn get_colored_marker(status: SimplifiedStatus) -> ColoredString {
    get_status_color_style(status)(status.marker())
}

/// One listing line: status marker, then the name, folders suffixed with `/`
pub fn format_listing_line(item: &DirectoryItem, status: SimplifiedStatus) -> String {
    let color_fn = get_status_color_style(status);
    let name = match item.kind() {
        _ if item.is_virtual() => item.name().bright_black(),
        ItemKind::Folder => color_fn(&format!("{}/", item.name())).bold(),
        ItemKind::File => color_fn(item.name()),
    };
    format!("{} {name}", get_colored_marker(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::Locator;
    use std::path::PathBuf;

    #[test]
    fn test_marker_contains_status_letter() {
        assert!(get_colored_marker(SimplifiedStatus::Modified)
            .to_string()
            .contains('M'));
        assert!(get_colored_marker(SimplifiedStatus::Added)
            .to_string()
            .contains('A'));
    }

    #[test]
    fn test_parent_entry_line() {
        let parent = DirectoryItem::virtual_parent(
            Locator::Path(PathBuf::from("/repo")),
            &Locator::Path(PathBuf::from("/repo/sub")),
        );
        let line = format_listing_line(&parent, SimplifiedStatus::Unchanged);
        assert!(line.contains("[ .. ]"));
        assert!(!line.contains("[ .. ]/"));
    }

    #[test]
    fn test_status_color_style_consistency() {
        let statuses = [
            SimplifiedStatus::Unchanged,
            SimplifiedStatus::Added,
            SimplifiedStatus::Modified,
            SimplifiedStatus::Conflicted,
            SimplifiedStatus::Ignored,
        ];

        for status in statuses {
            let color_fn = get_status_color_style(status);
            assert_eq!(color_fn("test").to_string(), color_fn("test").to_string());
        }
    }
}
