//! Per-line action dispatch.
//!
//! Each resolved line maps to exactly one outcome: a clone, a worktree add,
//! a benign skip, or an error. Idempotence comes from inspecting the
//! filesystem and remote state on every run, never from a saved ledger, so
//! re-running against an already-materialized tree yields skips throughout.

use super::context::{FallbackContext, RemoteRegistry};
use super::identity::RemoteIdentity;
use super::line::RepoLine;
use super::plan::Plan;
use crate::git::GitCommand;
use crate::output::Output;
use crate::utils::is_dir_empty;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// The classified result of one dispatched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A full clone was created at `path`.
    Cloned { path: PathBuf },
    /// A single-branch clone was created at `path`.
    BranchCloned { path: PathBuf },
    /// A worktree was attached at `path`.
    WorktreeAdded { path: PathBuf },
    /// The desired end state already exists, or the destination is occupied;
    /// nothing was done.
    Skipped { reason: String },
}

/// Decides and executes the action for each line.
///
/// Owns the run-lifetime state (fallback context and remote registry) so the
/// run loop stays a thin iteration shell.
pub struct Dispatcher<'a> {
    git: &'a GitCommand,
    plan: &'a Plan,
    registry: RemoteRegistry,
    ctx: FallbackContext,
    /// Identity and working directory of the enclosing repository; worktree
    /// lines that still point at it anchor here without any clone.
    home: (RemoteIdentity, PathBuf),
    /// Directory in which managed clones and worktrees are created.
    base_dir: PathBuf,
    /// Remote name used inside managed clones for fetch/push/upstream.
    remote_name: String,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        git: &'a GitCommand,
        plan: &'a Plan,
        ctx: FallbackContext,
        base_dir: PathBuf,
        remote_name: String,
    ) -> Self {
        let home = (ctx.identity().clone(), ctx.path().to_path_buf());
        Self {
            git,
            plan,
            registry: RemoteRegistry::new(),
            ctx,
            home,
            base_dir,
            remote_name,
        }
    }

    /// Identity that `@branch` lines currently resolve against.
    pub fn fallback_identity(&self) -> &RemoteIdentity {
        self.ctx.identity()
    }

    pub fn dispatch(&mut self, line: &RepoLine, output: &mut dyn Output) -> Result<Outcome> {
        match line {
            RepoLine::FullClone {
                remote,
                target_dir,
                all_branches,
            } => self.dispatch_clone(remote, None, target_dir.as_deref(), *all_branches, output),
            RepoLine::BranchClone {
                remote,
                branch,
                target_dir,
                all_branches,
            } => self.dispatch_clone(
                remote,
                Some(branch),
                target_dir.as_deref(),
                *all_branches,
                output,
            ),
            RepoLine::Worktree {
                remote,
                branch,
                target_dir,
                clone_instead,
            } => {
                if *clone_instead {
                    // '-n' opts this branch into a clone of the fallback repo
                    self.dispatch_clone(remote, Some(branch), target_dir.as_deref(), false, output)
                } else {
                    self.dispatch_worktree(remote, branch, target_dir.as_deref(), output)
                }
            }
        }
    }

    // ── clone lines ─────────────────────────────────────────────────────

    fn dispatch_clone(
        &mut self,
        remote: &RemoteIdentity,
        branch: Option<&str>,
        target_dir: Option<&str>,
        all_branches: bool,
        output: &mut dyn Output,
    ) -> Result<Outcome> {
        let name = clone_destination_name(
            remote,
            branch,
            target_dir,
            self.registry.contains(remote),
            self.plan.has_full_clone(remote),
        );
        let dest = self.base_dir.join(&name);

        if dest.exists() {
            if self.git.is_work_tree(&dest)? {
                match self.work_tree_identity(&dest)? {
                    Some(existing) if existing == *remote => {
                        // Already present: adopt it as the fallback anchor.
                        self.registry.register(remote.clone(), dest.clone());
                        self.ctx.advance(remote.clone(), dest.clone());
                        return Ok(Outcome::Skipped {
                            reason: format!("'{}' already cloned", dest.display()),
                        });
                    }
                    _ => {
                        output.warning(&format!(
                            "'{}' holds a working copy of a different remote; leaving it alone",
                            dest.display()
                        ));
                        return Ok(Outcome::Skipped {
                            reason: format!("'{}' belongs to another remote", dest.display()),
                        });
                    }
                }
            }
            if !is_dir_empty(&dest)? {
                output.warning(&format!(
                    "'{}' exists and is not a working copy; leaving it alone",
                    dest.display()
                ));
                return Ok(Outcome::Skipped {
                    reason: format!("'{}' is occupied", dest.display()),
                });
            }
            // An empty directory is fine to clone into.
        }

        let outcome = match branch {
            Some(branch) => {
                if self
                    .git
                    .remote_branch_exists(None, remote.url(), branch)?
                {
                    output.step(&format!(
                        "cloning branch '{branch}' of {} into '{}'",
                        remote,
                        dest.display()
                    ));
                    self.git
                        .clone(remote.url(), &dest, Some(branch), !all_branches)?;
                } else {
                    // Create-on-demand: the branch does not exist upstream yet.
                    output.step(&format!(
                        "branch '{branch}' not on {}; creating and publishing it",
                        remote
                    ));
                    self.git.clone(remote.url(), &dest, None, !all_branches)?;
                    self.git.checkout_new_branch(&dest, branch)?;
                    self.git
                        .push_set_upstream(&dest, &self.remote_name, branch)?;
                }
                Outcome::BranchCloned { path: dest.clone() }
            }
            None => {
                output.step(&format!("cloning {} into '{}'", remote, dest.display()));
                self.git.clone(remote.url(), &dest, None, !all_branches)?;
                Outcome::Cloned { path: dest.clone() }
            }
        };

        self.registry.register(remote.clone(), dest.clone());
        self.ctx.advance(remote.clone(), dest);
        Ok(outcome)
    }

    // ── worktree lines ──────────────────────────────────────────────────

    fn dispatch_worktree(
        &mut self,
        remote: &RemoteIdentity,
        branch: &str,
        target_dir: Option<&str>,
        output: &mut dyn Output,
    ) -> Result<Outcome> {
        let base = self.resolve_worktree_base(remote, output)?;

        if let Some(existing) = self.git.find_worktree_for_branch(&base, branch)? {
            return Ok(Outcome::Skipped {
                reason: format!(
                    "branch '{branch}' already checked out at '{}'",
                    existing.display()
                ),
            });
        }

        let base_name = base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| remote.repo_name().to_string());
        let name = target_dir
            .map(String::from)
            .unwrap_or_else(|| format!("{base_name}-{branch}"));
        let dest = self.base_dir.join(&name);

        if dest.exists() {
            if self.git.is_work_tree(&dest)? {
                if self.git.current_branch(&dest)?.as_deref() == Some(branch) {
                    // Desired end state already in place.
                    self.ctx.advance(remote.clone(), base);
                    return Ok(Outcome::Skipped {
                        reason: format!("worktree already exists at '{}'", dest.display()),
                    });
                }
                output.warning(&format!(
                    "'{}' is checked out on a different branch; leaving it alone",
                    dest.display()
                ));
                return Ok(Outcome::Skipped {
                    reason: format!("'{}' is on another branch", dest.display()),
                });
            }
            if !is_dir_empty(&dest)? {
                output.warning(&format!(
                    "'{}' exists and is not a working copy; leaving it alone",
                    dest.display()
                ));
                return Ok(Outcome::Skipped {
                    reason: format!("'{}' is occupied", dest.display()),
                });
            }
        }

        // Refresh remote refs before deciding where the branch comes from,
        // so existence checks are not answered from stale state.
        self.git.fetch(&base, &self.remote_name)?;

        if self.git.local_branch_exists(&base, branch)? {
            output.step(&format!(
                "adding worktree for local branch '{branch}' at '{}'",
                dest.display()
            ));
            self.git.worktree_add(&base, &dest, branch)?;
            if self
                .git
                .remote_branch_exists(Some(&base), &self.remote_name, branch)?
            {
                self.git.set_upstream(&dest, &self.remote_name, branch)?;
            } else {
                self.git
                    .push_set_upstream(&dest, &self.remote_name, branch)?;
            }
        } else if self
            .git
            .remote_branch_exists(Some(&base), &self.remote_name, branch)?
        {
            self.git.fetch_branch(&base, &self.remote_name, branch)?;
            let tracking_ref = format!("refs/remotes/{}/{branch}", self.remote_name);
            if self.git.show_ref_exists(&base, &tracking_ref)? {
                output.step(&format!(
                    "adding tracking worktree for remote branch '{branch}' at '{}'",
                    dest.display()
                ));
                self.git.worktree_add_track(
                    &base,
                    &dest,
                    branch,
                    &format!("{}/{branch}", self.remote_name),
                )?;
            } else {
                // Single-branch base that could not materialize the ref:
                // branch off the default branch instead.
                let start = self.default_start_point(&base)?;
                output.step(&format!(
                    "remote ref for '{branch}' unavailable; branching from {}",
                    start.as_deref().unwrap_or("HEAD")
                ));
                self.git
                    .worktree_add_new_branch(&base, &dest, branch, start.as_deref())?;
                self.git.set_upstream(&dest, &self.remote_name, branch)?;
            }
        } else {
            let start = self.default_start_point(&base)?;
            output.step(&format!(
                "creating new branch '{branch}' from {} at '{}'",
                start.as_deref().unwrap_or("HEAD"),
                dest.display()
            ));
            self.git
                .worktree_add_new_branch(&base, &dest, branch, start.as_deref())?;
            self.git
                .push_set_upstream(&dest, &self.remote_name, branch)?;
        }

        // The base, not the new worktree, stays the anchor for subsequent
        // '@branch' lines on this remote.
        self.ctx.advance(remote.clone(), base);
        Ok(Outcome::WorktreeAdded { path: dest })
    }

    /// Resolve the base local directory for `remote`.
    ///
    /// The enclosing repository anchors on its own working directory; other
    /// remotes on their registered clone. An unregistered remote with a
    /// planned full clone is materialized on demand; without one, a worktree
    /// referencing it is an internal precondition violation.
    fn resolve_worktree_base(
        &mut self,
        remote: &RemoteIdentity,
        output: &mut dyn Output,
    ) -> Result<PathBuf> {
        if *remote == self.home.0 {
            return Ok(self.home.1.clone());
        }
        if let Some(path) = self.registry.get(remote) {
            return Ok(path.to_path_buf());
        }
        if self.plan.has_full_clone(remote) {
            let name = self
                .plan
                .preferred_base_name(remote)
                .unwrap_or_else(|| remote.repo_name())
                .to_string();
            let dest = self.base_dir.join(&name);
            if !dest.exists() {
                output.step(&format!(
                    "materializing base clone of {} at '{}'",
                    remote,
                    dest.display()
                ));
                self.git.clone(remote.url(), &dest, None, true)?;
            }
            self.registry.register(remote.clone(), dest.clone());
            self.ctx.advance(remote.clone(), dest.clone());
            return Ok(dest);
        }
        anyhow::bail!(
            "worktree references remote '{}' that was never cloned",
            remote
        )
    }

    /// Start point for brand-new branches: the remote default branch when its
    /// tracking ref is available, else None (meaning HEAD of the base).
    fn default_start_point(&self, base: &Path) -> Result<Option<String>> {
        if let Some(default) = self.git.default_branch(base, &self.remote_name)? {
            let tracking_ref = format!("refs/remotes/{}/{default}", self.remote_name);
            if self.git.show_ref_exists(base, &tracking_ref)? {
                return Ok(Some(format!("{}/{default}", self.remote_name)));
            }
        }
        Ok(None)
    }

    /// Identity of the working copy at `dir`, derived from its configured
    /// remote (preferring `origin`). None when no remote is configured or the
    /// URL cannot be normalized.
    fn work_tree_identity(&self, dir: &Path) -> Result<Option<RemoteIdentity>> {
        let remotes = self.git.remote_list(dir)?;
        let name = if remotes.iter().any(|r| r == "origin") {
            "origin"
        } else {
            match remotes.first() {
                Some(first) => first.as_str(),
                None => return Ok(None),
            }
        };
        let url = self.git.remote_get_url(dir, name)?;
        Ok(RemoteIdentity::parse(&url).ok())
    }
}

/// Destination directory name for a clone line.
///
/// An explicit target always wins. A branch clone takes `<repo>-<branch>`
/// when the remote is already registered elsewhere or a full clone of it is
/// planned; otherwise the first reference to a repo gets the clean `<repo>`
/// name. Full clones always use `<repo>`.
pub fn clone_destination_name(
    remote: &RemoteIdentity,
    branch: Option<&str>,
    target_dir: Option<&str>,
    already_registered: bool,
    planned_full_clone: bool,
) -> String {
    if let Some(dir) = target_dir {
        return dir.to_string();
    }
    match branch {
        Some(branch) if already_registered || planned_full_clone => {
            format!("{}-{branch}", remote.repo_name())
        }
        _ => remote.repo_name().to_string(),
    }
}
