use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

use crate::log_debug;

mod branch;
mod clone;
mod config;
mod remote;
mod worktree;

/// Synchronous, fallible service over the `git` command line tool.
///
/// Every invocation runs under `timeout`; a hung network operation is killed
/// and surfaces as an ordinary error instead of stalling the whole run.
/// A zero timeout disables the guard.
pub struct GitCommand {
    pub(crate) quiet: bool,
    pub(crate) timeout: Duration,
}

/// Captured result of one git invocation.
pub(crate) struct GitOutput {
    pub(crate) success: bool,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

impl GitCommand {
    pub fn new(quiet: bool, timeout: Duration) -> Self {
        Self { quiet, timeout }
    }

    /// Run git with `args`, optionally inside `dir`, capturing output.
    pub(crate) fn run(&self, dir: Option<&Path>, args: &[&str]) -> Result<GitOutput> {
        let mut cmd = Command::new("git");
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        cmd.args(args);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log_debug!("running: git {}", args.join(" "));

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to execute git {}", args.first().unwrap_or(&"")))?;

        // Drain both pipes on separate threads so a chatty subprocess cannot
        // fill a pipe buffer and deadlock against wait_timeout below.
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_handle = thread::spawn(move || read_stream(stdout_pipe));
        let stderr_handle = thread::spawn(move || read_stream(stderr_pipe));

        let status = if self.timeout.is_zero() {
            child.wait().context("Failed to wait for git process")?
        } else {
            match child
                .wait_timeout(self.timeout)
                .context("Failed to wait for git process")?
            {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Killing the child closes the pipes, so the reader
                    // threads terminate promptly.
                    let _ = stdout_handle.join();
                    let _ = stderr_handle.join();
                    anyhow::bail!(
                        "git {} timed out after {}s",
                        args.first().unwrap_or(&""),
                        self.timeout.as_secs()
                    );
                }
            }
        };

        let stdout = stdout_handle
            .join()
            .unwrap_or_else(|_| Ok(String::new()))
            .context("Failed to read git stdout")?;
        let stderr = stderr_handle
            .join()
            .unwrap_or_else(|_| Ok(String::new()))
            .context("Failed to read git stderr")?;

        Ok(GitOutput {
            success: status.success(),
            stdout,
            stderr,
        })
    }

    /// Run git and bail with stderr when the invocation fails.
    pub(crate) fn run_checked(
        &self,
        dir: Option<&Path>,
        args: &[&str],
        what: &str,
    ) -> Result<String> {
        let out = self.run(dir, args)?;
        if !out.success {
            anyhow::bail!("{} failed: {}", what, out.stderr.trim());
        }
        Ok(out.stdout)
    }
}

fn read_stream(stream: Option<impl Read>) -> Result<String> {
    let mut buf = Vec::new();
    if let Some(mut reader) = stream {
        reader
            .read_to_end(&mut buf)
            .context("Failed to read process output")?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_command_new() {
        let git = GitCommand::new(true, Duration::from_secs(5));
        assert!(git.quiet);
        assert_eq!(git.timeout, Duration::from_secs(5));

        let git = GitCommand::new(false, Duration::ZERO);
        assert!(!git.quiet);
        assert!(git.timeout.is_zero());
    }

    #[test]
    fn test_run_captures_output() {
        let git = GitCommand::new(true, Duration::from_secs(30));
        let out = git.run(None, &["--version"]).unwrap();
        assert!(out.success);
        assert!(out.stdout.starts_with("git version"));
    }

    #[test]
    fn test_run_checked_reports_stderr() {
        let git = GitCommand::new(true, Duration::from_secs(30));
        let err = git
            .run_checked(None, &["no-such-subcommand"], "Git no-such-subcommand")
            .unwrap_err();
        assert!(err.to_string().contains("failed"));
    }
}
