//! Git config-based settings for grove.
//!
//! Settings are loaded from git's layered config system (local → global)
//! with built-in defaults as fallback.
//!
//! # Config Keys
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `grove.remote` | `"origin"` | Remote name used inside managed clones |
//! | `grove.timeout` | `600` | Per-git-operation timeout in seconds (0 disables) |
//!
//! # Example
//!
//! ```bash
//! # Use a different remote name for this repository's clones
//! git config grove.remote upstream
//!
//! # Allow slow mirrors ten minutes per operation, globally
//! git config --global grove.timeout 600
//! ```

use crate::git::GitCommand;
use anyhow::Result;
use std::path::Path;

/// Default values for settings.
pub mod defaults {
    /// Default value for the remote setting.
    pub const REMOTE: &str = "origin";

    /// Default value for the timeout setting, in seconds.
    pub const TIMEOUT_SECS: u64 = 600;
}

/// Git config keys for grove settings.
pub mod keys {
    /// Config key for the remote setting.
    pub const REMOTE: &str = "grove.remote";

    /// Config key for the timeout setting.
    pub const TIMEOUT: &str = "grove.timeout";
}

/// User-configurable settings.
///
/// Settings are loaded from git config with the following priority:
/// 1. Repository-local config (`git config grove.x`)
/// 2. Global config (`git config --global grove.x`)
/// 3. Built-in defaults
#[derive(Debug, Clone)]
pub struct GroveSettings {
    /// Remote name used inside managed clones for fetch/push/upstream.
    pub remote: String,

    /// Per-git-operation timeout in seconds. Zero disables the guard.
    pub timeout_secs: u64,
}

impl Default for GroveSettings {
    fn default() -> Self {
        Self {
            remote: defaults::REMOTE.to_string(),
            timeout_secs: defaults::TIMEOUT_SECS,
        }
    }
}

impl GroveSettings {
    /// Load settings from git config (local + global) as seen from `dir`.
    pub fn load(git: &GitCommand, dir: &Path) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(value) = git.config_get(dir, keys::REMOTE)? {
            if !value.is_empty() {
                settings.remote = value;
            }
        }

        if let Some(value) = git.config_get(dir, keys::TIMEOUT)? {
            settings.timeout_secs = parse_secs(&value, defaults::TIMEOUT_SECS);
        }

        Ok(settings)
    }
}

/// Parse a seconds value from git config, falling back on malformed input.
fn parse_secs(value: &str, default: u64) -> u64 {
    value.trim().parse().unwrap_or(default)
}
