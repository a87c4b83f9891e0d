//! Test output implementation for verifying command output in tests.
//!
//! This captures all output as structured data for easy assertions.

use super::{Output, OutputConfig};

/// Represents a single output entry captured during testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEntry {
    Info(String),
    Warning(String),
    Error(String),
    Step(String),
    Result(String),
    Detail { key: String, value: String },
}

/// Test output implementation that captures all output for assertions.
///
/// # Example
///
/// ```ignore
/// let mut output = TestOutput::new();
/// some_command(&mut output)?;
///
/// assert!(output.has_info("already cloned"));
/// assert!(!output.has_errors());
/// ```
#[derive(Debug, Default)]
pub struct TestOutput {
    config: OutputConfig,
    entries: Vec<OutputEntry>,
}

impl TestOutput {
    /// Create a new test output with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a test output in verbose mode.
    pub fn verbose() -> Self {
        Self {
            config: OutputConfig::new(false, true),
            entries: Vec::new(),
        }
    }

    /// Get all captured output entries.
    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    /// Clear all captured entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get all info messages.
    pub fn infos(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                OutputEntry::Info(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Get all warning messages.
    pub fn warnings(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                OutputEntry::Warning(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Get all error messages.
    pub fn errors(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                OutputEntry::Error(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Check if any info message contains the given substring.
    pub fn has_info(&self, substring: &str) -> bool {
        self.infos().iter().any(|s| s.contains(substring))
    }

    /// Check if any warning message contains the given substring.
    pub fn has_warning(&self, substring: &str) -> bool {
        self.warnings().iter().any(|s| s.contains(substring))
    }

    /// Check if any error message contains the given substring.
    pub fn has_error(&self, substring: &str) -> bool {
        self.errors().iter().any(|s| s.contains(substring))
    }

    /// Check if any errors were output.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, OutputEntry::Error(_)))
    }

    /// Check if any warnings were output.
    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, OutputEntry::Warning(_)))
    }
}

impl Output for TestOutput {
    fn info(&mut self, msg: &str) {
        // Respect quiet mode to match CLI behavior
        if !self.config.quiet {
            self.entries.push(OutputEntry::Info(msg.to_string()));
        }
    }

    fn warning(&mut self, msg: &str) {
        // Warnings are always captured (not affected by quiet mode)
        self.entries.push(OutputEntry::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        // Errors are always captured (not affected by quiet mode)
        self.entries.push(OutputEntry::Error(msg.to_string()));
    }

    fn step(&mut self, msg: &str) {
        if self.config.verbose {
            self.entries.push(OutputEntry::Step(msg.to_string()));
        }
    }

    fn result(&mut self, msg: &str) {
        if !self.config.quiet {
            self.entries.push(OutputEntry::Result(msg.to_string()));
        }
    }

    fn detail(&mut self, key: &str, value: &str) {
        if !self.config.quiet {
            self.entries.push(OutputEntry::Detail {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    fn is_verbose(&self) -> bool {
        self.config.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_info() {
        let mut output = TestOutput::new();
        output.info("Hello world");
        assert_eq!(output.infos(), vec!["Hello world"]);
        assert!(output.has_info("world"));
    }

    #[test]
    fn test_captures_warnings_and_errors() {
        let mut output = TestOutput::new();
        output.warning("Something is fishy");
        output.error("Something went wrong");

        assert!(output.has_warnings());
        assert!(output.has_errors());
        assert!(output.has_warning("fishy"));
        assert!(output.has_error("wrong"));
    }

    #[test]
    fn test_steps_only_captured_in_verbose() {
        let mut output = TestOutput::new();
        output.step("Should not appear");
        assert!(output.entries().is_empty());

        let mut verbose = TestOutput::verbose();
        verbose.step("Should appear");
        assert_eq!(
            verbose.entries(),
            &[OutputEntry::Step("Should appear".to_string())]
        );
    }

    #[test]
    fn test_clear() {
        let mut output = TestOutput::new();
        output.info("Message");
        output.clear();
        assert!(output.entries().is_empty());
    }
}
