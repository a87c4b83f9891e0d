//! The repo-list engine: parsing, planning, fallback resolution and dispatch.
//!
//! A repo-list file holds one instruction per line:
//!
//! ```text
//! owner/repo [target_dir] [-a|--all-branches]          # full clone
//! owner/repo@branch [target_dir]                       # single-branch clone
//! https://host/owner/repo[@branch] [target_dir]        # same, explicit host
//! @branch [target_dir] [-n|--no-worktree]              # worktree off fallback
//! ```
//!
//! Lines are processed strictly in file order. Explicit repo lines move the
//! "fallback repo" context forward; `@branch` lines anchor worktrees on it.

pub mod context;
pub mod dispatch;
pub mod identity;
pub mod line;
pub mod plan;
pub mod runner;

pub use context::{FallbackContext, RemoteRegistry};
pub use dispatch::{Dispatcher, Outcome};
pub use identity::RemoteIdentity;
pub use line::{normalize, resolve, RepoLine, Resolved};
pub use plan::Plan;
pub use runner::RunCounters;

use thiserror::Error;

/// A line that could not be turned into an action.
///
/// Parse errors abort the offending line only; the run loop counts them and
/// moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid repository spec '{0}'")]
    InvalidSpec(String),

    #[error("multiple target directories on one line: '{first}' and '{second}'")]
    MultipleTargetDirs { first: String, second: String },

    #[error("'@{0}' has no fallback repository to resolve against")]
    MissingFallback(String),

    #[error("empty branch name")]
    EmptyBranch,
}
