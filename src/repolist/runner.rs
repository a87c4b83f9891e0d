//! Sequential execution of a repo-list file.

use super::dispatch::{Dispatcher, Outcome};
use super::line;
use crate::output::Output;
use anyhow::Result;

/// Tallies for the end-of-run summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunCounters {
    pub processed: usize,
    pub cloned_full: usize,
    pub cloned_single_branch: usize,
    pub worktrees_added: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl RunCounters {
    pub fn actions_taken(&self) -> usize {
        self.cloned_full + self.cloned_single_branch + self.worktrees_added
    }
}

/// Process every line of `content` in file order.
///
/// A failed line is counted and reported, then the run moves on; the fallback
/// context only advances on success, so later `@branch` lines still anchor on
/// the last repository that actually worked.
pub fn run(
    content: &str,
    dispatcher: &mut Dispatcher,
    output: &mut dyn Output,
) -> Result<RunCounters> {
    let mut counters = RunCounters::default();

    for raw in content.lines() {
        let Some(text) = line::normalize(raw) else {
            continue;
        };
        counters.processed += 1;

        let resolved = match line::resolve(&text, Some(dispatcher.fallback_identity())) {
            Ok(resolved) => resolved,
            Err(e) => {
                counters.errors += 1;
                output.error(&format!("skipping '{text}': {e}"));
                continue;
            }
        };
        for warning in &resolved.warnings {
            output.warning(&format!("'{text}': {warning}"));
        }

        match dispatcher.dispatch(&resolved.line, output) {
            Ok(Outcome::Cloned { path }) => {
                counters.cloned_full += 1;
                output.info(&format!("cloned '{}'", path.display()));
            }
            Ok(Outcome::BranchCloned { path }) => {
                counters.cloned_single_branch += 1;
                output.info(&format!("cloned '{}'", path.display()));
            }
            Ok(Outcome::WorktreeAdded { path }) => {
                counters.worktrees_added += 1;
                output.info(&format!("added worktree '{}'", path.display()));
            }
            Ok(Outcome::Skipped { reason }) => {
                counters.skipped += 1;
                output.info(&format!("skipped: {text} ({reason})"));
            }
            Err(e) => {
                counters.errors += 1;
                output.error(&format!("'{text}' failed: {e:#}"));
            }
        }
    }

    Ok(counters)
}

pub fn print_summary(counters: &RunCounters, output: &mut dyn Output) {
    output.result(&format!(
        "{} line(s) processed, {} action(s) taken, {} skipped, {} error(s)",
        counters.processed,
        counters.actions_taken(),
        counters.skipped,
        counters.errors
    ));
    if output.is_verbose() {
        output.detail("full clones", &counters.cloned_full.to_string());
        output.detail(
            "single-branch clones",
            &counters.cloned_single_branch.to_string(),
        );
        output.detail("worktrees added", &counters.worktrees_added.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{OutputEntry, TestOutput};

    #[test]
    fn test_counters_actions_taken() {
        let counters = RunCounters {
            processed: 6,
            cloned_full: 2,
            cloned_single_branch: 1,
            worktrees_added: 2,
            skipped: 1,
            errors: 0,
        };
        assert_eq!(counters.actions_taken(), 5);
    }

    #[test]
    fn test_print_summary() {
        let counters = RunCounters {
            processed: 3,
            cloned_full: 1,
            skipped: 1,
            errors: 1,
            ..Default::default()
        };
        let mut output = TestOutput::new();
        print_summary(&counters, &mut output);
        assert_eq!(
            output.entries(),
            &[OutputEntry::Result(
                "3 line(s) processed, 1 action(s) taken, 1 skipped, 1 error(s)".to_string()
            )]
        );
    }

    #[test]
    fn test_print_summary_verbose_details() {
        let counters = RunCounters {
            processed: 2,
            worktrees_added: 2,
            ..Default::default()
        };
        let mut output = TestOutput::verbose();
        print_summary(&counters, &mut output);
        assert!(output.entries().contains(&OutputEntry::Detail {
            key: "worktrees added".to_string(),
            value: "2".to_string(),
        }));
    }
}
