//! Pre-scan of the repo-list file.
//!
//! The plan is built once, before any cloning begins, so that placement
//! decisions for single-branch clones never need execution-time lookahead:
//! if a full clone of the same remote appears anywhere in the file, the bare
//! directory name stays reserved for it.

use super::identity::RemoteIdentity;
use super::line::{self, RepoLine};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Whether any line in the file requests a full clone of this remote.
    pub has_full_clone: bool,
    /// Directory name a clone of this remote would use; first write wins.
    pub preferred_base_name: String,
}

/// Advisory, read-only during execution.
#[derive(Debug, Default, Clone)]
pub struct Plan {
    entries: HashMap<RemoteIdentity, PlanEntry>,
}

impl Plan {
    /// Scan every line of the file. `@branch` lines carry no remote of their
    /// own and contribute nothing; malformed lines are reported at execution
    /// time, not here.
    pub fn build(content: &str) -> Self {
        let mut entries: HashMap<RemoteIdentity, PlanEntry> = HashMap::new();

        for raw in content.lines() {
            let Some(text) = line::normalize(raw) else {
                continue;
            };
            if text.starts_with('@') {
                continue;
            }
            let Ok(resolved) = line::resolve(&text, None) else {
                continue;
            };

            let (remote, target_dir, is_full) = match resolved.line {
                RepoLine::FullClone {
                    remote, target_dir, ..
                } => (remote, target_dir, true),
                RepoLine::BranchClone {
                    remote, target_dir, ..
                } => (remote, target_dir, false),
                RepoLine::Worktree { .. } => continue,
            };

            let name = target_dir.unwrap_or_else(|| remote.repo_name().to_string());
            let entry = entries.entry(remote).or_insert_with(|| PlanEntry {
                has_full_clone: false,
                preferred_base_name: name,
            });
            entry.has_full_clone |= is_full;
        }

        Self { entries }
    }

    pub fn get(&self, remote: &RemoteIdentity) -> Option<&PlanEntry> {
        self.entries.get(remote)
    }

    pub fn has_full_clone(&self, remote: &RemoteIdentity) -> bool {
        self.entries
            .get(remote)
            .map(|e| e.has_full_clone)
            .unwrap_or(false)
    }

    pub fn preferred_base_name(&self, remote: &RemoteIdentity) -> Option<&str> {
        self.entries
            .get(remote)
            .map(|e| e.preferred_base_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(spec: &str) -> RemoteIdentity {
        RemoteIdentity::parse(spec).unwrap()
    }

    #[test]
    fn test_full_clone_recorded_across_spellings() {
        let plan = Plan::build("E/F@branch\nhttps://github.com/E/F.git\n");
        let remote = id("E/F");
        assert!(plan.has_full_clone(&remote));
        assert_eq!(plan.preferred_base_name(&remote), Some("F"));
    }

    #[test]
    fn test_branch_only_remote_has_no_full_clone() {
        let plan = Plan::build("A/B@dev\n");
        assert!(!plan.has_full_clone(&id("A/B")));
        assert_eq!(plan.preferred_base_name(&id("A/B")), Some("B"));
    }

    #[test]
    fn test_preferred_base_name_first_write_wins() {
        let plan = Plan::build("A/B@dev custom\nA/B\n");
        let remote = id("A/B");
        assert!(plan.has_full_clone(&remote));
        assert_eq!(plan.preferred_base_name(&remote), Some("custom"));
    }

    #[test]
    fn test_worktree_and_comment_lines_ignored() {
        let plan = Plan::build("# header\n@dev\n\nA/B\n");
        assert!(plan.has_full_clone(&id("A/B")));
        assert_eq!(plan.get(&id("X/Y")), None);
    }
}
