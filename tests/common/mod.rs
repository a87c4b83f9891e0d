//! Shared fixtures: local bare remotes and an enclosing repository, so the
//! tests exercise real git end to end without touching the network.

// Not every test binary uses every helper.
#![allow(dead_code)]

use grove::git::GitCommand;
use grove::output::TestOutput;
use grove::repolist::{runner, Dispatcher, FallbackContext, Plan, RunCounters};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(dir)
        .args(args)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

/// Create a bare remote at `<root>/<name>.git`, seeded with one commit on
/// `main` plus the given extra branches.
pub fn make_remote(root: &Path, name: &str, branches: &[&str]) -> PathBuf {
    let bare = root.join(format!("{name}.git"));
    git(root, &["init", "--bare", "-b", "main", bare.to_str().unwrap()]);

    let seed = root.join(format!("{name}-seed"));
    fs::create_dir(&seed).unwrap();
    git(&seed, &["init", "-b", "main"]);
    git(&seed, &["config", "user.email", "dev@example.com"]);
    git(&seed, &["config", "user.name", "Dev"]);
    fs::write(seed.join("README.md"), format!("# {name}\n")).unwrap();
    git(&seed, &["add", "."]);
    git(&seed, &["commit", "-m", "initial commit"]);
    git(&seed, &["remote", "add", "origin", bare.to_str().unwrap()]);
    git(&seed, &["push", "--quiet", "origin", "main"]);
    for branch in branches {
        git(&seed, &["branch", branch]);
        git(&seed, &["push", "--quiet", "origin", branch]);
    }
    fs::remove_dir_all(&seed).unwrap();
    bare
}

/// Clone `remote` as the enclosing repository at `<root>/work/<name>`. Managed
/// clones and worktrees land as its siblings under `<root>/work`.
pub fn make_enclosing(root: &Path, remote: &Path, name: &str) -> PathBuf {
    let work = root.join("work");
    fs::create_dir_all(&work).unwrap();
    let dest = work.join(name);
    git(
        &work,
        &[
            "clone",
            "--quiet",
            &format!("file://{}", remote.display()),
            dest.to_str().unwrap(),
        ],
    );
    git(&dest, &["config", "user.email", "dev@example.com"]);
    git(&dest, &["config", "user.name", "Dev"]);
    dest
}

/// Run the engine over `content` from inside `enclosing`.
pub fn apply(content: &str, enclosing: &Path) -> (RunCounters, TestOutput) {
    let git = GitCommand::new(true, Duration::from_secs(120));
    let ctx = FallbackContext::discover(&git, enclosing).unwrap();
    let base_dir = ctx.path().parent().unwrap().to_path_buf();
    let plan = Plan::build(content);
    let mut dispatcher = Dispatcher::new(&git, &plan, ctx, base_dir, "origin".to_string());
    let mut output = TestOutput::new();
    let counters = runner::run(content, &mut dispatcher, &mut output).unwrap();
    (counters, output)
}

pub fn current_branch(dir: &Path) -> String {
    let out = Command::new("git")
        .current_dir(dir)
        .args(["symbolic-ref", "--short", "HEAD"])
        .output()
        .unwrap();
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

pub fn remote_has_branch(bare: &Path, branch: &str) -> bool {
    let out = Command::new("git")
        .args([
            "ls-remote",
            "--heads",
            bare.to_str().unwrap(),
            &format!("refs/heads/{branch}"),
        ])
        .output()
        .unwrap();
    !String::from_utf8_lossy(&out.stdout).trim().is_empty()
}
