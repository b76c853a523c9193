use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use std::process::Command as GitCommand;

/// Somewhere the staged changes can be read from.
pub trait DiffSource {
    fn staged_diff(&self) -> Result<String>;
}

/// The index of the repository the hook runs in.
pub struct GitIndex;

impl DiffSource for GitIndex {
    fn staged_diff(&self) -> Result<String> {
        staged_diff()
    }
}

/// Run a git command and capture stdout as String.
pub fn git_output(args: &[&str]) -> Result<String> {
    let output = GitCommand::new("git")
        .args(args)
        .output()
        .with_context(|| format!("failed to run git {:?}", args))?;

    if !output.status.success() {
        return Err(anyhow!(
            "git {:?} exited with status {:?}: {}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Get the full staged diff.
pub fn staged_diff() -> Result<String> {
    let diff = git_output(&["diff", "--cached"])?;
    Ok(diff)
}

/// Overwrite the commit message file in place with `message`.
///
/// Writing through the existing path keeps its mode and follows symlinks.
pub fn write_commit_msg_file(path: &Path, message: &str) -> Result<()> {
    fs::write(path, message)
        .with_context(|| format!("failed to write commit message to {:?}", path))?;
    Ok(())
}
