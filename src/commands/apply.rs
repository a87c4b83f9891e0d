use crate::{
    check_dependencies,
    git::GitCommand,
    logging::init_logging,
    output::{CliOutput, Output, OutputConfig},
    repolist::{runner, Dispatcher, FallbackContext, Plan},
    settings::GroveSettings,
    utils::get_current_directory,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "grove")]
#[command(version = crate::VERSION)]
#[command(about = "Materialize clones and worktrees from a repo-list file")]
#[command(long_about = r#"
Reads a repo-list file (one instruction per line) and brings the parent
directory of the enclosing repository into the described state:

    owner/repo [dir] [-a]       clone the repository (single-branch by default)
    owner/repo@branch [dir]     clone just that branch
    @branch [dir] [-n]          add a worktree for <branch> on the most recent
                                repository above it (the enclosing repository
                                until a repo line succeeds)

Full URLs (HTTPS, SSH, scp-like, file://) are accepted wherever owner/repo
shorthand is. Lines starting with '#' are comments. The command is idempotent:
whatever already exists in the desired state is skipped, and a failing line
never stops the lines after it.

Must be run from inside a git repository with a configured remote.
"#)]
pub struct Args {
    #[arg(
        default_value = "repos.txt",
        help = "Path to the repo-list file to apply"
    )]
    file: String,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Operate quietly; suppress progress reporting"
    )]
    quiet: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        help = "Be verbose; show each git operation"
    )]
    verbose: bool,

    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "Per-git-operation timeout in seconds, 0 to disable (overrides grove.timeout)"
    )]
    timeout: Option<u64>,

    #[arg(
        short = 'r',
        long = "remote",
        value_name = "NAME",
        help = "Remote name used inside managed clones (overrides grove.remote)"
    )]
    remote: Option<String>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);
    check_dependencies()?;

    let mut output = CliOutput::new(OutputConfig::new(args.quiet, args.verbose));
    run_apply(&args, &mut output)
}

fn run_apply(args: &Args, output: &mut dyn Output) -> Result<()> {
    let cwd = get_current_directory()?;

    // Settings come from git config, so probe with a conservative timeout
    // before the configured one is known.
    let probe = GitCommand::new(true, Duration::from_secs(30));
    let settings = GroveSettings::load(&probe, &cwd)?;

    let timeout_secs = args.timeout.unwrap_or(settings.timeout_secs);
    let remote_name = args.remote.clone().unwrap_or(settings.remote);
    let git = GitCommand::new(!output.is_verbose(), Duration::from_secs(timeout_secs));

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read repo-list file '{}'", args.file))?;

    let ctx = FallbackContext::discover(&git, &cwd)?;
    let base_dir = ctx
        .path()
        .parent()
        .context("The enclosing repository has no parent directory")?
        .to_path_buf();

    let plan = Plan::build(&content);
    let mut dispatcher = Dispatcher::new(&git, &plan, ctx, base_dir, remote_name);

    let counters = runner::run(&content, &mut dispatcher, output)?;
    runner::print_summary(&counters, output);

    // Per-line failures are reported and counted, not fatal.
    Ok(())
}
