//! Shared test utilities for git-browse
//!
//! Integration tests run against real git repositories created in temporary
//! directories with the `git` executable.

pub mod assertions;
pub mod fixtures;
pub mod repository;
