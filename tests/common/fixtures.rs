//! Predefined repository scenarios shared by the integration tests

#![allow(dead_code)]

use super::repository::*;
use git_browse::core::error::Result;

/// Scenario: committed tree with nested folders and mixed-case names
///
/// ```text
/// A/inner.txt
/// b/deep/leaf.txt
/// a.txt
/// z.txt
/// ```
pub fn create_nested_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "A/inner.txt", "inner\n")?;
    create_file(&repo.path, "b/deep/leaf.txt", "leaf\n")?;
    create_file(&repo.path, "a.txt", "alpha\n")?;
    create_file(&repo.path, "z.txt", "zulu\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Scenario: nested repository plus a `feature` branch whose tip differs
/// from `main`, with `main` checked out
pub fn create_repo_with_feature_branch() -> Result<TestRepo> {
    let repo = create_nested_repo()?;

    git(&repo.path, &["checkout", "-b", "feature"])?;
    create_file(&repo.path, "feature.txt", "feature work\n")?;
    create_file(&repo.path, "a.txt", "alpha on feature\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Feature commit")?;
    git_checkout(&repo.path, "main")?;

    Ok(repo)
}

/// Scenario: nested repository mid-merge, with `b/deep/leaf.txt` edited on
/// both `main` and `other` so the merge into `main` conflicts
pub fn create_conflicted_repo() -> Result<TestRepo> {
    let repo = create_nested_repo()?;

    git(&repo.path, &["checkout", "-b", "other"])?;
    create_file(&repo.path, "b/deep/leaf.txt", "leaf on other\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Edit leaf on other")?;

    git_checkout(&repo.path, "main")?;
    create_file(&repo.path, "b/deep/leaf.txt", "leaf on main\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Edit leaf on main")?;

    // Fails with a conflict and leaves the merge in progress
    git(&repo.path, &["merge", "other"])?;

    Ok(repo)
}
