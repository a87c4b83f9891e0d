//! Output abstraction layer for separating IO from business logic.
//!
//! Commands accept `&mut dyn Output` and use its methods instead of direct
//! `println!` or `eprintln!` calls, so the run loop and dispatcher can be
//! exercised in tests with a capturing implementation.

mod cli;
mod test;

pub use cli::CliOutput;
pub use test::{OutputEntry, TestOutput};

/// Configuration for output behavior.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Suppress most output when true.
    pub quiet: bool,
    /// Enable debug/verbose output when true.
    pub verbose: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }
}

/// Trait for abstracting output operations.
///
/// Implementors should respect `quiet` and `verbose` modes where appropriate.
pub trait Output {
    /// Display an informational message.
    /// Respects quiet mode.
    fn info(&mut self, msg: &str);

    /// Display a warning message to stderr.
    /// Always shown (not affected by quiet mode).
    fn warning(&mut self, msg: &str);

    /// Display an error message to stderr.
    /// Always shown (not affected by quiet mode).
    fn error(&mut self, msg: &str);

    /// Display an intermediate step message.
    /// Only shown in verbose mode; use for step-by-step progress.
    fn step(&mut self, msg: &str);

    /// Display a final result message.
    /// The primary output shown in default mode, 1-2 lines at the end of a run.
    fn result(&mut self, msg: &str);

    /// Display a key-value detail.
    /// Renders as "  key: value" in CLI. Respects quiet mode.
    fn detail(&mut self, key: &str, value: &str);

    /// Check if quiet mode is enabled.
    fn is_quiet(&self) -> bool;

    /// Check if verbose mode is enabled.
    fn is_verbose(&self) -> bool;
}
