use super::GitCommand;
use anyhow::Result;
use std::path::Path;

impl GitCommand {
    /// Clone `url` into `target_dir`.
    ///
    /// With `branch` set, only that branch is checked out. `single_branch`
    /// restricts the fetch refspec to the cloned branch, which is the default
    /// policy for managed clones.
    pub fn clone(
        &self,
        url: &str,
        target_dir: &Path,
        branch: Option<&str>,
        single_branch: bool,
    ) -> Result<()> {
        let mut args: Vec<&str> = vec!["clone"];

        if self.quiet {
            args.push("--quiet");
        }
        if single_branch {
            args.push("--single-branch");
        }
        if let Some(branch) = branch {
            args.push("--branch");
            args.push(branch);
        }

        args.push(url);
        let dest = target_dir.to_string_lossy();
        args.push(&dest);

        self.run_checked(None, &args, "Git clone")?;
        Ok(())
    }

    /// Whether `dir` is the working directory of a (non-bare) git repository.
    pub fn is_work_tree(&self, dir: &Path) -> Result<bool> {
        let out = self.run(Some(dir), &["rev-parse", "--is-inside-work-tree"])?;
        // In a bare repo root, git exits 0 but prints "false" to stdout,
        // so the actual output must be checked, not just the exit code.
        Ok(out.success && out.stdout.trim() == "true")
    }

    /// Get the root of the working tree containing `dir`.
    pub fn toplevel(&self, dir: &Path) -> Result<std::path::PathBuf> {
        let stdout = self.run_checked(
            Some(dir),
            &["rev-parse", "--show-toplevel"],
            "Git rev-parse --show-toplevel",
        )?;
        Ok(std::path::PathBuf::from(stdout.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_is_work_tree_on_plain_directory() {
        let temp = tempdir().unwrap();
        let git = GitCommand::new(true, Duration::from_secs(30));
        assert!(!git.is_work_tree(temp.path()).unwrap());
    }
}
