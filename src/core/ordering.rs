//! Display order of branches and directory entries.
//!
//! Branches: `develop` first, `main` and `master` last, everything else by name
//! in between. Entries: folders before files, then case-sensitive by name.

use crate::core::entry::{DirectoryItem, ItemKind};
use std::cmp::Ordering;

const FIRST_BRANCHES: &[&str] = &["develop"];
const LAST_BRANCHES: &[&str] = &["main", "master"];

fn branch_rank(name: &str) -> u8 {
    if FIRST_BRANCHES.contains(&name) {
        0
    } else if LAST_BRANCHES.contains(&name) {
        2
    } else {
        1
    }
}

/// Total order over branch names; ties in rank fall back to the name
pub fn compare_branches(a: &str, b: &str) -> Ordering {
    branch_rank(a)
        .cmp(&branch_rank(b))
        .then_with(|| a.cmp(b))
}

/// Folders before files, then byte-wise name comparison
pub fn compare_entries(a: &DirectoryItem, b: &DirectoryItem) -> Ordering {
    let kind_rank = |kind: ItemKind| match kind {
        ItemKind::Folder => 0,
        ItemKind::File => 1,
    };

    kind_rank(a.kind())
        .cmp(&kind_rank(b.kind()))
        .then_with(|| a.name().cmp(b.name()))
}
