//! Git repository access for the browser core.
//!
//! [`GitRepo`] wraps a `git2::Repository` and exposes exactly what the core reads
//! from the version-control backend: raw per-path status, branch tips, direct
//! children of a tree object, and blob bytes. It never walks trees recursively
//! and never writes to the object database.
//!
//! # Public API
//! - [`GitRepo`]: backend handle, also the [`StatusSource`] used for live status
//! - [`BranchInfo`]: name, head flag and root tree of a branch
//! - [`RawTreeEntry`]: one direct child of a tree object

use crate::core::{
    error::{BrowseError, Result},
    status::{RawState, StatusSource},
};
use git2::{BranchType, ObjectType, Oid, Repository, StatusOptions};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: String,
    pub is_head: bool,
    pub is_remote: bool,
    pub tree_id: Oid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTreeEntry {
    pub name: String,
    pub id: Oid,
    pub kind: Option<ObjectType>,
}

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    pub fn workdir(&self) -> Result<&Path> {
        self.repo.workdir().ok_or(BrowseError::NoWorkingTree)
    }

    /// Local branches, plus remote-tracking ones when requested
    pub fn branches(&self, include_remote: bool) -> Result<Vec<BranchInfo>> {
        let filter = if include_remote {
            None
        } else {
            Some(BranchType::Local)
        };

        let mut branches = Vec::new();
        for branch in self.repo.branches(filter)? {
            let (branch, branch_type) = branch?;
            let Some(name) = branch.name()? else {
                log::warn!("Skipping branch with non UTF-8 name");
                continue;
            };
            // Symbolic remote refs such as origin/HEAD duplicate a real branch
            if branch.get().symbolic_target().is_some() {
                continue;
            }

            branches.push(BranchInfo {
                name: name.to_string(),
                is_head: branch.is_head(),
                is_remote: branch_type == BranchType::Remote,
                tree_id: branch.get().peel_to_tree()?.id(),
            });
        }

        log::debug!("Found {} branches", branches.len());
        Ok(branches)
    }

    /// Short name of the branch HEAD points at, even before its first commit
    pub fn head_name(&self) -> Result<String> {
        let head = self.repo.find_reference("HEAD")?;
        Ok(match head.symbolic_target() {
            Some(target) => target
                .strip_prefix("refs/heads/")
                .unwrap_or(target)
                .to_string(),
            None => "HEAD".to_string(),
        })
    }

    pub fn remote_branch_count(&self) -> Result<usize> {
        let mut count = 0;
        for branch in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = branch?;
            if branch.get().symbolic_target().is_none() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Direct children of a tree object, in object database order
    pub fn tree_children(&self, tree_id: Oid) -> Result<Vec<RawTreeEntry>> {
        let tree = self.repo.find_tree(tree_id)?;
        tree.iter()
            .map(|entry| {
                let name = entry.name().ok_or_else(|| {
                    BrowseError::invalid_operation("tree entry name is not valid UTF-8")
                })?;
                Ok(RawTreeEntry {
                    name: name.to_string(),
                    id: entry.id(),
                    kind: entry.kind(),
                })
            })
            .collect()
    }

    pub fn read_blob(&self, blob_id: Oid) -> Result<Vec<u8>> {
        let blob = self.repo.find_blob(blob_id)?;
        Ok(blob.content().to_vec())
    }

    fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = self.workdir()?;
        path.strip_prefix(workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                BrowseError::invalid_operation(format!(
                    "'{}' is outside the working tree",
                    path.display()
                ))
            })
    }
}

impl StatusSource for GitRepo {
    fn raw_status(&self, path: &Path) -> Result<RawState> {
        let relative = self.relative_path(path)?;
        Ok(self.repo.status_file(&relative)?)
    }

    fn raw_statuses(&self, prefix: &Path) -> Result<Vec<(PathBuf, RawState)>> {
        let workdir = self.workdir()?.to_path_buf();
        let relative = self.relative_path(prefix)?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(false)
            .renames_index_to_workdir(false);
        // libgit2 reads pathspecs as globs and drops the folder-prefix match
        // for any pattern with a wildcard, so such folders scan everything and
        // rely on the prefix filter below
        if !relative.as_os_str().is_empty() && is_literal_pathspec(&relative) {
            opts.pathspec(relative.as_path());
        }

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut entries = Vec::new();
        for entry in statuses.iter() {
            let Some(path) = entry.path() else {
                log::debug!("Skipping status entry with non UTF-8 path");
                continue;
            };
            let path = Path::new(path);
            if path.starts_with(&relative) {
                entries.push((workdir.join(path), entry.status()));
            }
        }

        Ok(entries)
    }
}

fn is_literal_pathspec(path: &Path) -> bool {
    !path
        .to_string_lossy()
        .contains(['*', '?', '[', ']', '\\'])
}
