use super::GitCommand;
use anyhow::Result;
use std::path::{Path, PathBuf};

impl GitCommand {
    /// Attach a worktree at `path` for an existing local `branch`.
    pub fn worktree_add(&self, dir: &Path, path: &Path, branch: &str) -> Result<()> {
        let mut args: Vec<&str> = vec!["worktree", "add"];
        if self.quiet {
            args.push("--quiet");
        }
        let path_str = path.to_string_lossy();
        args.push(&path_str);
        args.push(branch);

        self.run_checked(Some(dir), &args, "Git worktree add")?;
        Ok(())
    }

    /// Attach a worktree at `path`, creating `new_branch` from `start_point`
    /// (or from HEAD when no start point is given).
    pub fn worktree_add_new_branch(
        &self,
        dir: &Path,
        path: &Path,
        new_branch: &str,
        start_point: Option<&str>,
    ) -> Result<()> {
        let mut args: Vec<&str> = vec!["worktree", "add"];
        if self.quiet {
            args.push("--quiet");
        }
        let path_str = path.to_string_lossy();
        args.push(&path_str);
        args.push("-b");
        args.push(new_branch);
        if let Some(start) = start_point {
            args.push(start);
        }

        self.run_checked(Some(dir), &args, "Git worktree add")?;
        Ok(())
    }

    /// Attach a worktree at `path`, creating a local `branch` that tracks
    /// `remote_ref` (e.g. `origin/feature`).
    pub fn worktree_add_track(
        &self,
        dir: &Path,
        path: &Path,
        branch: &str,
        remote_ref: &str,
    ) -> Result<()> {
        let mut args: Vec<&str> = vec!["worktree", "add"];
        if self.quiet {
            args.push("--quiet");
        }
        args.push("--track");
        args.push("-b");
        args.push(branch);
        let path_str = path.to_string_lossy();
        args.push(&path_str);
        args.push(remote_ref);

        self.run_checked(Some(dir), &args, "Git worktree add")?;
        Ok(())
    }

    pub fn worktree_list_porcelain(&self, dir: &Path) -> Result<String> {
        self.run_checked(
            Some(dir),
            &["worktree", "list", "--porcelain"],
            "Git worktree list",
        )
    }

    /// Find the worktree path for a given branch name.
    /// Returns None if no worktree attached to `dir` is checked out on it.
    pub fn find_worktree_for_branch(
        &self,
        dir: &Path,
        branch_name: &str,
    ) -> Result<Option<PathBuf>> {
        let porcelain_output = self.worktree_list_porcelain(dir)?;

        let mut current_path: Option<PathBuf> = None;

        for line in porcelain_output.lines() {
            if let Some(worktree_path) = line.strip_prefix("worktree ") {
                current_path = Some(PathBuf::from(worktree_path));
            } else if let Some(branch_ref) = line.strip_prefix("branch ") {
                if let Some(branch) = branch_ref.strip_prefix("refs/heads/") {
                    if branch == branch_name {
                        return Ok(current_path.take());
                    }
                }
                current_path = None;
            } else if line.is_empty() {
                current_path = None;
            }
        }

        Ok(None)
    }
}
