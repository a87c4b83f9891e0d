//! Run-lifetime mutable state: the fallback context and the remote registry.

use super::identity::RemoteIdentity;
use crate::git::GitCommand;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The repository that unqualified `@branch` lines resolve against.
///
/// Threaded explicitly through the run loop; advanced only after a dispatched
/// action successfully establishes or confirms a local path for an identity.
/// A failed line never moves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackContext {
    identity: RemoteIdentity,
    path: PathBuf,
}

impl FallbackContext {
    pub fn new(identity: RemoteIdentity, path: PathBuf) -> Self {
        Self { identity, path }
    }

    /// Initialize from the enclosing repository at `dir`: its own remote
    /// (preferring one literally named `origin`, else the first configured
    /// one) and its own working directory.
    ///
    /// Failing here is a setup-level fatal error; nothing can proceed without
    /// an initial fallback.
    pub fn discover(git: &GitCommand, dir: &Path) -> Result<Self> {
        let remotes = git
            .remote_list(dir)
            .context("Failed to list remotes of the enclosing repository")?;

        let name = if remotes.iter().any(|r| r == "origin") {
            "origin".to_string()
        } else {
            remotes
                .first()
                .cloned()
                .context("No Git remote configured for the enclosing repository")?
        };

        let url = git.remote_get_url(dir, &name)?;
        let identity = RemoteIdentity::parse(&url).map_err(|e| {
            anyhow::anyhow!("Cannot normalize remote '{name}' of the enclosing repository: {e}")
        })?;
        let path = git.toplevel(dir)?;

        Ok(Self { identity, path })
    }

    pub fn identity(&self) -> &RemoteIdentity {
        &self.identity
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite both fields atomically.
    pub fn advance(&mut self, identity: RemoteIdentity, path: PathBuf) {
        self.identity = identity;
        self.path = path;
    }
}

/// Where each remote is known to live locally. Append-only: once a remote
/// maps to a path, later lines reuse it rather than re-deriving it.
#[derive(Debug, Default, Clone)]
pub struct RemoteRegistry {
    paths: HashMap<RemoteIdentity, PathBuf>,
}

impl RemoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where `identity` lives. The first recorded path sticks.
    pub fn register(&mut self, identity: RemoteIdentity, path: PathBuf) {
        self.paths.entry(identity).or_insert(path);
    }

    pub fn get(&self, identity: &RemoteIdentity) -> Option<&Path> {
        self.paths.get(identity).map(PathBuf::as_path)
    }

    pub fn contains(&self, identity: &RemoteIdentity) -> bool {
        self.paths.contains_key(identity)
    }
}
