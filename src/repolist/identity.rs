//! Canonical remote identity.
//!
//! Every place that compares remotes (the planner, the registry, the fallback
//! context, the already-cloned check) goes through this one normalization, so
//! two spellings of the same remote can never be treated as different repos.

use super::ParseError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use url::Url;

/// scp-like SSH syntax: `git@github.com:owner/repo.git`
fn scp_like() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z0-9._-]+)@([A-Za-z0-9._-]+):(.+)$").unwrap())
}

/// A remote repository in canonical form.
///
/// The canonical spelling is `https://<host>/<owner>/<repo>` with no `.git`
/// suffix and no trailing slash. Local remotes keep their `file://` form
/// (including any `.git` suffix, since stripping it would change the actual
/// path on disk).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteIdentity {
    url: String,
}

impl RemoteIdentity {
    /// Normalize any supported remote spelling.
    ///
    /// Accepted forms:
    /// - `https://host/owner/repo[.git][/]` (and `http://`)
    /// - `ssh://[git@]host/owner/repo[.git]`
    /// - `git@host:owner/repo[.git]` (scp-like)
    /// - `owner/repo` shorthand, resolved against github.com
    /// - `file:///path` or an absolute `/path` (local remotes)
    pub fn parse(spec: &str) -> Result<Self, ParseError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(ParseError::InvalidSpec(spec.to_string()));
        }

        if spec.starts_with("https://") || spec.starts_with("http://") {
            let parsed =
                Url::parse(spec).map_err(|_| ParseError::InvalidSpec(spec.to_string()))?;
            let host = parsed
                .host_str()
                .ok_or_else(|| ParseError::InvalidSpec(spec.to_string()))?;
            let path = trim_repo_path(parsed.path());
            if path.is_empty() {
                return Err(ParseError::InvalidSpec(spec.to_string()));
            }
            return Ok(Self {
                url: format!("https://{host}/{path}"),
            });
        }

        if let Some(rest) = spec.strip_prefix("ssh://") {
            let rest = rest.strip_prefix("git@").unwrap_or(rest);
            let (host, path) = rest
                .split_once('/')
                .ok_or_else(|| ParseError::InvalidSpec(spec.to_string()))?;
            return Self::from_host_path(spec, host, path);
        }

        if let Some(rest) = spec.strip_prefix("file://") {
            return Self::parse_local(rest);
        }
        if spec.starts_with('/') {
            return Self::parse_local(spec);
        }

        if let Some(caps) = scp_like().captures(spec) {
            let host = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let path = caps.get(3).map(|m| m.as_str()).unwrap_or("");
            return Self::from_host_path(spec, host, path);
        }

        // Bare owner/repo shorthand
        if spec.contains('/')
            && !spec.contains(char::is_whitespace)
            && !spec.starts_with('-')
            && !spec.contains(':')
        {
            let path = trim_repo_path(spec);
            if path.split('/').count() >= 2 && !path.split('/').any(str::is_empty) {
                return Ok(Self {
                    url: format!("https://github.com/{path}"),
                });
            }
        }

        Err(ParseError::InvalidSpec(spec.to_string()))
    }

    fn from_host_path(spec: &str, host: &str, path: &str) -> Result<Self, ParseError> {
        let path = trim_repo_path(path);
        if host.is_empty() || path.is_empty() {
            return Err(ParseError::InvalidSpec(spec.to_string()));
        }
        Ok(Self {
            url: format!("https://{}/{path}", host.to_ascii_lowercase()),
        })
    }

    fn parse_local(path: &str) -> Result<Self, ParseError> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ParseError::InvalidSpec(path.to_string()));
        }
        Ok(Self {
            url: format!("file://{trimmed}"),
        })
    }

    /// The canonical URL, also usable as a clone source.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The repository's base name: the last path segment, `.git` trimmed.
    /// This is the default directory name for a full clone.
    pub fn repo_name(&self) -> &str {
        let last = self.url.rsplit('/').next().unwrap_or(&self.url);
        last.strip_suffix(".git").unwrap_or(last)
    }
}

impl fmt::Display for RemoteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Strip leading/trailing slashes and a `.git` suffix from a repo path.
fn trim_repo_path(path: &str) -> &str {
    let path = path.trim_matches('/');
    path.strip_suffix(".git").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_spellings_normalize_identically() {
        let spellings = [
            "SATVILab/projr",
            "https://github.com/SATVILab/projr",
            "https://github.com/SATVILab/projr.git",
            "https://github.com/SATVILab/projr/",
            "git@github.com:SATVILab/projr.git",
            "git@github.com:SATVILab/projr",
            "ssh://git@github.com/SATVILab/projr.git",
        ];
        let first = RemoteIdentity::parse(spellings[0]).unwrap();
        for s in &spellings[1..] {
            assert_eq!(RemoteIdentity::parse(s).unwrap(), first, "spelling: {s}");
        }
        assert_eq!(first.url(), "https://github.com/SATVILab/projr");
    }

    #[test]
    fn test_host_is_lowercased() {
        let a = RemoteIdentity::parse("https://GitHub.com/owner/repo").unwrap();
        let b = RemoteIdentity::parse("git@github.com:owner/repo.git").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_other_hosts() {
        let id = RemoteIdentity::parse("https://gitlab.example.org/group/sub/repo.git").unwrap();
        assert_eq!(id.url(), "https://gitlab.example.org/group/sub/repo");
        assert_eq!(id.repo_name(), "repo");
    }

    #[test]
    fn test_repo_name() {
        let id = RemoteIdentity::parse("SATVILab/projr").unwrap();
        assert_eq!(id.repo_name(), "projr");
    }

    #[test]
    fn test_local_remote_keeps_path() {
        let a = RemoteIdentity::parse("/tmp/remotes/projr.git").unwrap();
        let b = RemoteIdentity::parse("file:///tmp/remotes/projr.git").unwrap();
        assert_eq!(a, b);
        // The .git suffix is part of the on-disk path and must survive
        assert_eq!(a.url(), "file:///tmp/remotes/projr.git");
        assert_eq!(a.repo_name(), "projr");
    }

    #[test]
    fn test_invalid_specs() {
        for bad in ["", "justaname", "-oops/repo", "https://", "owner//repo"] {
            assert!(
                RemoteIdentity::parse(bad).is_err(),
                "expected failure for '{bad}'"
            );
        }
    }
}
