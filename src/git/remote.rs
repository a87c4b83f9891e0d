use super::GitCommand;
use anyhow::Result;
use std::path::Path;

impl GitCommand {
    /// Fetch `remote` inside the repository at `dir`.
    pub fn fetch(&self, dir: &Path, remote: &str) -> Result<()> {
        let mut args: Vec<&str> = vec!["fetch"];
        if self.quiet {
            args.push("--quiet");
        }
        args.push(remote);

        self.run_checked(Some(dir), &args, "Git fetch")?;
        Ok(())
    }

    /// Fetch one specific branch into the remote-tracking namespace.
    ///
    /// Works even when the clone's fetch refspec is restricted to a single
    /// branch, which is why the refspec is passed explicitly.
    pub fn fetch_branch(&self, dir: &Path, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!("+refs/heads/{branch}:refs/remotes/{remote}/{branch}");
        let mut args: Vec<&str> = vec!["fetch"];
        if self.quiet {
            args.push("--quiet");
        }
        args.push(remote);
        args.push(&refspec);

        self.run_checked(Some(dir), &args, "Git fetch with refspec")?;
        Ok(())
    }

    /// Check whether `branch` exists on `remote` (a remote name or URL).
    ///
    /// Queries the remote directly via ls-remote, so the answer is not limited
    /// by the local fetch refspec.
    pub fn remote_branch_exists(
        &self,
        dir: Option<&Path>,
        remote: &str,
        branch: &str,
    ) -> Result<bool> {
        let ref_name = format!("refs/heads/{branch}");
        let stdout = self.run_checked(
            dir,
            &["ls-remote", "--heads", remote, &ref_name],
            "Git ls-remote",
        )?;
        Ok(!stdout.trim().is_empty())
    }

    /// Push `branch` to `remote` and set up upstream tracking.
    pub fn push_set_upstream(&self, dir: &Path, remote: &str, branch: &str) -> Result<()> {
        let mut args: Vec<&str> = vec!["push", "--no-verify", "--set-upstream"];
        if self.quiet {
            args.push("--quiet");
        }
        args.push(remote);
        args.push(branch);

        self.run_checked(Some(dir), &args, "Git push")?;
        Ok(())
    }

    /// Point the branch checked out at `dir` at `remote`/`branch`.
    pub fn set_upstream(&self, dir: &Path, remote: &str, branch: &str) -> Result<()> {
        let upstream = format!("--set-upstream-to={remote}/{branch}");
        self.run_checked(Some(dir), &["branch", &upstream], "Git set upstream")?;
        Ok(())
    }

    /// List all configured remotes of the repository at `dir`.
    pub fn remote_list(&self, dir: &Path) -> Result<Vec<String>> {
        let stdout = self.run_checked(Some(dir), &["remote"], "Git remote")?;
        Ok(stdout
            .lines()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }

    /// Get the URL of a remote configured in `dir`.
    pub fn remote_get_url(&self, dir: &Path, remote: &str) -> Result<String> {
        let stdout = self.run_checked(
            Some(dir),
            &["remote", "get-url", remote],
            "Git remote get-url",
        )?;
        Ok(stdout.trim().to_string())
    }
}
