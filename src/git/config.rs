use super::GitCommand;
use anyhow::Result;
use std::path::Path;

impl GitCommand {
    /// Get a git config value from the repository at `dir`
    /// (respects local + global config).
    pub fn config_get(&self, dir: &Path, key: &str) -> Result<Option<String>> {
        let out = self.run(Some(dir), &["config", "--get", key])?;
        if out.success {
            Ok(Some(out.stdout.trim().to_string()))
        } else {
            // Exit code 1 means the key was not found, which is not an error
            Ok(None)
        }
    }
}
