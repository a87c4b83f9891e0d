use super::GitCommand;
use anyhow::Result;
use std::path::Path;

impl GitCommand {
    /// Whether `refs/heads/<branch>` exists in the repository at `dir`.
    pub fn local_branch_exists(&self, dir: &Path, branch: &str) -> Result<bool> {
        let ref_name = format!("refs/heads/{branch}");
        let out = self.run(
            Some(dir),
            &["show-ref", "--verify", "--quiet", &ref_name],
        )?;
        Ok(out.success)
    }

    /// Whether an arbitrary fully-qualified ref exists in `dir`.
    pub fn show_ref_exists(&self, dir: &Path, ref_name: &str) -> Result<bool> {
        let out = self.run(
            Some(dir),
            &["show-ref", "--verify", "--quiet", ref_name],
        )?;
        Ok(out.success)
    }

    /// Create and check out a new branch in the working tree at `dir`.
    pub fn checkout_new_branch(&self, dir: &Path, branch: &str) -> Result<()> {
        let mut args: Vec<&str> = vec!["checkout"];
        if self.quiet {
            args.push("--quiet");
        }
        args.push("-b");
        args.push(branch);

        self.run_checked(Some(dir), &args, "Git checkout -b")?;
        Ok(())
    }

    /// Short name of the branch checked out at `dir`, or None on detached HEAD.
    pub fn current_branch(&self, dir: &Path) -> Result<Option<String>> {
        let out = self.run(Some(dir), &["symbolic-ref", "--short", "HEAD"])?;
        if !out.success {
            return Ok(None);
        }
        let branch = out.stdout.trim().to_string();
        Ok(if branch.is_empty() { None } else { Some(branch) })
    }

    /// The default branch of `remote` as recorded in `dir`'s
    /// `refs/remotes/<remote>/HEAD`, or None if that symref is not set up
    /// (common for single-branch clones).
    pub fn default_branch(&self, dir: &Path, remote: &str) -> Result<Option<String>> {
        let symref = format!("refs/remotes/{remote}/HEAD");
        let out = self.run(Some(dir), &["symbolic-ref", &symref])?;
        if !out.success {
            return Ok(None);
        }
        let prefix = format!("refs/remotes/{remote}/");
        Ok(out
            .stdout
            .trim()
            .strip_prefix(&prefix)
            .filter(|b| !b.is_empty())
            .map(String::from))
    }
}
