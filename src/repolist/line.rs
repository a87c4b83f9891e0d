//! Line grammar: normalization and resolution into typed repo-list actions.

use super::identity::RemoteIdentity;
use super::ParseError;

/// One resolved repo-list instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoLine {
    /// `owner/repo [dir] [-a]` — clone the repository.
    FullClone {
        remote: RemoteIdentity,
        target_dir: Option<String>,
        all_branches: bool,
    },
    /// `owner/repo@branch [dir]` — clone one branch.
    BranchClone {
        remote: RemoteIdentity,
        branch: String,
        target_dir: Option<String>,
        all_branches: bool,
    },
    /// `@branch [dir] [-n]` — worktree off the fallback repository
    /// (or a single-branch clone of it when `clone_instead` is set).
    Worktree {
        remote: RemoteIdentity,
        branch: String,
        target_dir: Option<String>,
        clone_instead: bool,
    },
}

/// A resolved line plus any non-fatal diagnostics produced while parsing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub line: RepoLine,
    pub warnings: Vec<String>,
}

/// Normalize one physical line.
///
/// Returns None for blank lines and comment lines. Inline comments (a `#`
/// preceded by whitespace) are stripped, as are trailing carriage returns.
pub fn normalize(raw: &str) -> Option<String> {
    let mut cut = raw.len();
    let mut prev_is_space = true; // start-of-line counts as a boundary
    for (i, c) in raw.char_indices() {
        if c == '#' && prev_is_space {
            cut = i;
            break;
        }
        prev_is_space = c.is_whitespace();
    }
    let text = raw[..cut].trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Resolve a normalized line against the current fallback identity.
///
/// `fallback` is only consulted for `@branch` lines; passing None makes those
/// fail with [`ParseError::MissingFallback`].
pub fn resolve(text: &str, fallback: Option<&RemoteIdentity>) -> Result<Resolved, ParseError> {
    let mut tokens = text.split_whitespace();
    let head = tokens
        .next()
        .ok_or_else(|| ParseError::InvalidSpec(text.to_string()))?;

    let mut target_dir: Option<String> = None;
    let mut all_branches = false;
    let mut no_worktree = false;
    let mut warnings = Vec::new();

    for tok in tokens {
        match tok {
            "-a" | "--all-branches" => all_branches = true,
            "-n" | "--no-worktree" => no_worktree = true,
            flag if flag.starts_with('-') => {
                warnings.push(format!("ignoring unknown option '{flag}'"));
            }
            positional => {
                if let Some(first) = &target_dir {
                    return Err(ParseError::MultipleTargetDirs {
                        first: first.clone(),
                        second: positional.to_string(),
                    });
                }
                target_dir = Some(positional.to_string());
            }
        }
    }

    let line = if let Some(branch) = head.strip_prefix('@') {
        if branch.is_empty() {
            return Err(ParseError::EmptyBranch);
        }
        let remote = fallback
            .cloned()
            .ok_or_else(|| ParseError::MissingFallback(branch.to_string()))?;
        if all_branches {
            warnings.push("'-a' has no effect on a worktree line".to_string());
        }
        RepoLine::Worktree {
            remote,
            branch: branch.to_string(),
            target_dir,
            clone_instead: no_worktree,
        }
    } else {
        if no_worktree {
            warnings.push("'-n' has no effect on a clone line".to_string());
        }
        // A branch ref is the text after the last '@', but only when a
        // repo separator ('/' or ':') appears before it. This keeps the
        // user part of 'git@host:owner/repo' from being taken for a ref.
        let ref_split = head
            .rfind('@')
            .filter(|&i| i > 0 && head[..i].contains(['/', ':']));

        match ref_split {
            Some(at) => {
                let branch = &head[at + 1..];
                if branch.is_empty() {
                    return Err(ParseError::EmptyBranch);
                }
                RepoLine::BranchClone {
                    remote: RemoteIdentity::parse(&head[..at])?,
                    branch: branch.to_string(),
                    target_dir,
                    all_branches,
                }
            }
            None => RepoLine::FullClone {
                remote: RemoteIdentity::parse(head)?,
                target_dir,
                all_branches,
            },
        }
    };

    Ok(Resolved { line, warnings })
}
