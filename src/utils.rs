use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub fn get_current_directory() -> Result<PathBuf> {
    env::current_dir().context("Failed to get current directory")
}

/// True when `path` is a directory containing no entries at all.
pub fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory: {}", path.display()))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_dir_empty() {
        let temp_dir = tempdir().unwrap();
        assert!(is_dir_empty(temp_dir.path()).unwrap());

        fs::write(temp_dir.path().join("file"), "x").unwrap();
        assert!(!is_dir_empty(temp_dir.path()).unwrap());

        // A file is not an empty directory
        assert!(!is_dir_empty(&temp_dir.path().join("file")).unwrap());
    }

    #[test]
    fn test_current_directory() {
        let current = get_current_directory().unwrap();
        assert!(current.is_absolute());
    }
}
