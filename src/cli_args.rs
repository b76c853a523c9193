use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

/// CLI options. Git invokes the hook as
/// `prepare-commit-msg <file> [<source> [<sha>]]`.
#[derive(Parser, Debug)]
#[command(
    name = "hookscribe",
    version,
    about = "prepare-commit-msg hook that drafts commit messages with a local LLM"
)]
#[command(group(
    ArgGroup::new("model_group")
        .args(["model", "no_model"])
        .multiple(false)
))]
pub struct Cli {
    /// Path to the commit message file Git wants filled in
    pub commit_msg_file: PathBuf,

    /// Why the commit is happening (message, template, merge, squash, commit)
    pub commit_source: Option<String>,

    /// Commit object name, passed by Git alongside `commit`
    pub commit_sha: Option<String>,

    /// Model name to use (e.g. llama3.2). If 'none', acts like --no-model.
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the local inference server
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Only send the first N lines of the staged diff
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Disable model calls; the message file is left as Git prepared it
    #[arg(long)]
    pub no_model: bool,

    /// Print the generated message instead of writing the message file
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
