//! One open repository: its branch views, the mutation bus they share, and a
//! summary of the working tree.
//!
//! The session subscribes to the bus like any view. `refresh` applies what it
//! has received: branch creation and working-tree cleans rebuild every view,
//! and any event recomputes the summary.

use crate::core::{
    config::BrowserConfig,
    error::{BrowseError, Result},
    events::{EventBus, MutationEvent, Subscription},
    git::GitRepo,
    live::live_view,
    ordering::compare_branches,
    snapshot::snapshot_view,
    status::{simplify_file, SimplifiedStatus, StatusSource},
    view::BranchView,
};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkingTreeState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoSummary {
    pub head: String,
    pub state: WorkingTreeState,
    pub added: usize,
    pub modified: usize,
    pub conflicted: usize,
    pub local_branches: usize,
    pub remote_branches: usize,
    pub refreshed_at: DateTime<Local>,
}

impl RepoSummary {
    fn collect(repo: &GitRepo) -> Result<Self> {
        let mut summary = RepoSummary {
            head: repo.head_name()?,
            state: WorkingTreeState::Clean,
            added: 0,
            modified: 0,
            conflicted: 0,
            local_branches: repo.branches(false)?.len(),
            remote_branches: repo.remote_branch_count()?,
            refreshed_at: Local::now(),
        };

        // Bare repositories have nothing to count
        let Ok(workdir) = repo.workdir() else {
            return Ok(summary);
        };
        let entries = repo.raw_statuses(workdir)?;
        if !entries.is_empty() {
            summary.state = WorkingTreeState::Dirty;
        }
        for (_, state) in entries {
            match simplify_file(state) {
                SimplifiedStatus::Added => summary.added += 1,
                SimplifiedStatus::Modified => summary.modified += 1,
                SimplifiedStatus::Conflicted => summary.conflicted += 1,
                SimplifiedStatus::Unchanged | SimplifiedStatus::Ignored => {}
            }
        }
        Ok(summary)
    }
}

pub struct RepoSession {
    repo: Rc<GitRepo>,
    config: BrowserConfig,
    bus: EventBus,
    subscription: Subscription,
    views: Vec<BranchView>,
    summary: RepoSummary,
}

impl RepoSession {
    /// Discover the repository containing `path` and open a view per branch
    pub fn open<P: AsRef<Path>>(path: P, config: BrowserConfig) -> Result<Self> {
        let repo = GitRepo::open(path.as_ref()).map_err(|_| BrowseError::NotInGitRepo)?;
        let repo = Rc::new(repo);
        let bus = EventBus::new();
        let subscription = bus.subscribe();

        let views = build_views(&repo, &config, &bus)?;
        let summary = RepoSummary::collect(&repo)?;
        log::debug!("Opened session with {} branches", views.len());

        Ok(Self {
            repo,
            config,
            bus,
            subscription,
            views,
            summary,
        })
    }

    /// Branch views in display order
    pub fn branches(&self) -> &[BranchView] {
        &self.views
    }

    pub fn branch_names(&self) -> Vec<&str> {
        self.views.iter().map(BranchView::name).collect()
    }

    pub fn branch(&self, name: &str) -> Result<&BranchView> {
        self.views
            .iter()
            .find(|view| view.name() == name)
            .ok_or_else(|| BrowseError::branch_not_found(name))
    }

    pub fn branch_mut(&mut self, name: &str) -> Result<&mut BranchView> {
        self.views
            .iter_mut()
            .find(|view| view.name() == name)
            .ok_or_else(|| BrowseError::branch_not_found(name))
    }

    /// View of the checked-out branch
    pub fn head_mut(&mut self) -> Result<&mut BranchView> {
        self.views
            .iter_mut()
            .find(|view| view.is_head())
            .ok_or_else(|| BrowseError::branch_not_found("HEAD"))
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn summary(&self) -> &RepoSummary {
        &self.summary
    }

    /// Apply events received since the last refresh.
    ///
    /// Returns whether anything changed.
    pub fn refresh(&mut self) -> Result<bool> {
        let events = self.subscription.drain();
        if events.is_empty() {
            return Ok(false);
        }

        let rebuild = events.iter().any(|event| {
            matches!(
                event,
                MutationEvent::BranchCreated { .. } | MutationEvent::WorkingTreeCleaned
            )
        });
        if rebuild {
            log::debug!("Rebuilding branch views after {events:?}");
            // Old views unsubscribe as they drop
            self.views = build_views(&self.repo, &self.config, &self.bus)?;
        }
        self.summary = RepoSummary::collect(&self.repo)?;
        Ok(true)
    }
}

fn build_views(
    repo: &Rc<GitRepo>,
    config: &BrowserConfig,
    bus: &EventBus,
) -> Result<Vec<BranchView>> {
    let has_workdir = repo.workdir().is_ok();
    let mut views = Vec::new();

    for branch in repo.branches(config.include_remote_branches)? {
        let view = if branch.is_head && has_workdir {
            live_view(&branch.name, Rc::clone(repo), config, bus)?
        } else {
            snapshot_view(&branch, Rc::clone(repo))?
        };
        views.push(view);
    }

    // An unborn or detached HEAD still has a working tree to browse
    if has_workdir && !views.iter().any(BranchView::is_head) {
        let name = repo.head_name()?;
        views.push(live_view(&name, Rc::clone(repo), config, bus)?);
    }

    views.sort_by(|a, b| compare_branches(a.name(), b.name()));
    Ok(views)
}
