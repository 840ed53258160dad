//! Assertion helpers for command output

#![allow(dead_code)]

use predicates::prelude::*;

pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

/// A listing line for `name` with the given status marker
pub fn has_listing_line(marker: &str, name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{marker} {name}"))
}
