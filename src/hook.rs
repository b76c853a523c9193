use anyhow::Result;
use log::{debug, info, warn};
use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::git::{self, DiffSource};
use crate::llm::LlmClient;
use crate::llm::prompt_builder;

/// Second argument Git passes to `prepare-commit-msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitSource {
    /// Plain `git commit`, no argument.
    Normal,
    Message,
    Template,
    Merge,
    Squash,
    /// `--amend`, `-c`, `-C`.
    Commit,
    Other(String),
}

impl CommitSource {
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg.map(str::trim) {
            None | Some("") => CommitSource::Normal,
            Some("message") => CommitSource::Message,
            Some("template") => CommitSource::Template,
            Some("merge") => CommitSource::Merge,
            Some("squash") => CommitSource::Squash,
            Some("commit") => CommitSource::Commit,
            Some(other) => CommitSource::Other(other.to_string()),
        }
    }

    /// Merges and amends already carry a message worth keeping.
    pub fn skips_generation(&self) -> bool {
        matches!(self, CommitSource::Merge | CommitSource::Commit)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CommitSource::Normal => "normal",
            CommitSource::Message => "message",
            CommitSource::Template => "template",
            CommitSource::Merge => "merge",
            CommitSource::Squash => "squash",
            CommitSource::Commit => "commit",
            CommitSource::Other(s) => s,
        }
    }
}

/// What a hook run did. Every variant is a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Disabled,
    SkippedSource(CommitSource),
    EmptyDiff,
    NoResponse,
    Written,
    Printed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Disabled => write!(f, "skipped: model calls disabled"),
            Outcome::SkippedSource(source) => {
                write!(f, "skipped: commit source is {}", source.as_str())
            }
            Outcome::EmptyDiff => write!(f, "skipped: nothing staged"),
            Outcome::NoResponse => write!(f, "no usable response; message left as is"),
            Outcome::Written => write!(f, "commit message written"),
            Outcome::Printed => write!(f, "commit message printed (dry run)"),
        }
    }
}

/// Run the guard sequence for one `prepare-commit-msg` invocation.
///
/// Model failures end in [`Outcome::NoResponse`]. Only diff capture and the
/// final write can return `Err`; the caller logs those and still exits 0.
pub fn run(
    msg_file: &Path,
    source: &CommitSource,
    cfg: &Config,
    diffs: &dyn DiffSource,
    llm: &dyn LlmClient,
) -> Result<Outcome> {
    if cfg.disabled {
        return Ok(Outcome::Disabled);
    }

    if source.skips_generation() {
        return Ok(Outcome::SkippedSource(source.clone()));
    }

    let diff = diffs.staged_diff()?;
    if diff.trim().is_empty() {
        return Ok(Outcome::EmptyDiff);
    }

    let (diff, truncated) = prompt_builder::truncate_lines(&diff, cfg.max_diff_lines);
    if truncated {
        debug!("Staged diff truncated to {} lines", cfg.max_diff_lines);
    }

    let prompt = prompt_builder::commit_message_prompt(diff);
    debug!("Prompt is {} bytes", prompt.len());

    let message = match llm.generate(&prompt, cfg.timeout) {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!("Model returned an empty message");
            return Ok(Outcome::NoResponse);
        }
        Err(e) => {
            warn!("{e:#}");
            return Ok(Outcome::NoResponse);
        }
    };

    if cfg.dry_run {
        println!("{message}");
        return Ok(Outcome::Printed);
    }

    git::write_commit_msg_file(msg_file, &message)?;
    info!("Wrote {} bytes to {}", message.len(), msg_file.display());
    Ok(Outcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::TempDir;

    const TEMPLATE: &str = "\n# Please enter the commit message for your changes.\n";

    struct FakeDiff(Option<String>);

    impl DiffSource for FakeDiff {
        fn staged_diff(&self) -> Result<String> {
            self.0.clone().ok_or_else(|| anyhow!("not a git repository"))
        }
    }

    enum Reply {
        Text(&'static str),
        Missing,
        Fail,
    }

    struct FakeClient {
        reply: Reply,
        calls: Mutex<Vec<(String, Duration)>>,
    }

    impl FakeClient {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(p, _)| p.clone())
                .collect()
        }
    }

    impl LlmClient for FakeClient {
        fn generate(&self, prompt: &str, timeout: Duration) -> Result<Option<String>> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), timeout));
            match self.reply {
                Reply::Text(t) => Ok(Some(t.to_string())),
                Reply::Missing => Ok(None),
                Reply::Fail => Err(anyhow!("connection refused")),
            }
        }
    }

    fn config() -> Config {
        Config {
            model: "llama3.2".into(),
            endpoint: "http://localhost:11434".into(),
            timeout: Duration::from_secs(10),
            max_diff_lines: 400,
            disabled: false,
            dry_run: false,
        }
    }

    fn msg_file() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        fs::write(&path, TEMPLATE).unwrap();
        (dir, path)
    }

    fn diff(text: &str) -> FakeDiff {
        FakeDiff(Some(text.to_string()))
    }

    #[test]
    fn parses_commit_sources() {
        assert_eq!(CommitSource::from_arg(None), CommitSource::Normal);
        assert_eq!(CommitSource::from_arg(Some("")), CommitSource::Normal);
        assert_eq!(CommitSource::from_arg(Some("merge")), CommitSource::Merge);
        assert_eq!(CommitSource::from_arg(Some("commit")), CommitSource::Commit);
        assert_eq!(CommitSource::from_arg(Some("squash")), CommitSource::Squash);
        assert_eq!(
            CommitSource::from_arg(Some("rebase")),
            CommitSource::Other("rebase".into())
        );
    }

    #[test]
    fn only_merge_and_commit_skip() {
        for arg in [None, Some("message"), Some("template"), Some("squash"), Some("weird")] {
            assert!(!CommitSource::from_arg(arg).skips_generation(), "{arg:?}");
        }
        assert!(CommitSource::Merge.skips_generation());
        assert!(CommitSource::Commit.skips_generation());
    }

    #[test]
    fn merge_and_amend_leave_file_untouched() {
        for source in [CommitSource::Merge, CommitSource::Commit] {
            let (_dir, path) = msg_file();
            let llm = FakeClient::new(Reply::Text("feat: nope"));

            let outcome =
                run(&path, &source, &config(), &diff("+changed\n"), &llm).unwrap();

            assert_eq!(outcome, Outcome::SkippedSource(source));
            assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
            assert!(llm.prompts().is_empty());
        }
    }

    #[test]
    fn empty_diff_leaves_file_untouched() {
        let (_dir, path) = msg_file();
        let llm = FakeClient::new(Reply::Text("feat: nope"));

        let outcome = run(&path, &CommitSource::Normal, &config(), &diff("  \n"), &llm).unwrap();

        assert_eq!(outcome, Outcome::EmptyDiff);
        assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
        assert!(llm.prompts().is_empty());
    }

    #[test]
    fn long_diff_is_capped_in_prompt() {
        let (_dir, path) = msg_file();
        let llm = FakeClient::new(Reply::Text("chore: big change"));
        let big: String = (1..=1000).map(|i| format!("+line {i}\n")).collect();

        run(&path, &CommitSource::Normal, &config(), &diff(&big), &llm).unwrap();

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("+line 1\n"));
        assert!(prompts[0].contains("+line 400\n"));
        assert!(!prompts[0].contains("+line 401\n"));
    }

    #[test]
    fn configured_cap_and_timeout_are_used() {
        let (_dir, path) = msg_file();
        let llm = FakeClient::new(Reply::Text("chore: x"));
        let cfg = Config {
            max_diff_lines: 2,
            timeout: Duration::from_secs(3),
            ..config()
        };

        run(&path, &CommitSource::Normal, &cfg, &diff("+a\n+b\n+c\n"), &llm).unwrap();

        let calls = llm.calls.lock().unwrap();
        assert!(calls[0].0.ends_with("+a\n+b\n"));
        assert_eq!(calls[0].1, Duration::from_secs(3));
    }

    #[test]
    fn transport_failure_leaves_file_untouched() {
        let (_dir, path) = msg_file();
        let llm = FakeClient::new(Reply::Fail);

        let outcome = run(&path, &CommitSource::Normal, &config(), &diff("+x\n"), &llm).unwrap();

        assert_eq!(outcome, Outcome::NoResponse);
        assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
    }

    #[test]
    fn missing_or_blank_response_leaves_file_untouched() {
        for reply in [Reply::Missing, Reply::Text(""), Reply::Text(" \n\n")] {
            let (_dir, path) = msg_file();
            let llm = FakeClient::new(reply);

            let outcome =
                run(&path, &CommitSource::Normal, &config(), &diff("+x\n"), &llm).unwrap();

            assert_eq!(outcome, Outcome::NoResponse);
            assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
        }
    }

    #[test]
    fn response_replaces_file_exactly() {
        let (_dir, path) = msg_file();
        let llm = FakeClient::new(Reply::Text("feat: add hello print statement"));

        let outcome = run(
            &path,
            &CommitSource::Normal,
            &config(),
            &diff("+print('hello')"),
            &llm,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Written);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "feat: add hello print statement"
        );
        assert!(llm.prompts()[0].ends_with("+print('hello')"));
    }

    #[test]
    fn multi_line_response_is_written_verbatim() {
        let (_dir, path) = msg_file();
        let reply = "fix(parser): handle empty input\n\nReturn early instead of panicking.\n";
        let llm = FakeClient::new(Reply::Text(reply));

        run(&path, &CommitSource::Template, &config(), &diff("+x\n"), &llm).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), reply);
    }

    #[test]
    fn unknown_source_runs_like_normal_commit() {
        let (_dir, path) = msg_file();
        let llm = FakeClient::new(Reply::Text("docs: readme"));

        let outcome = run(
            &path,
            &CommitSource::from_arg(Some("message")),
            &config(),
            &diff("+x\n"),
            &llm,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "docs: readme");
    }

    #[test]
    fn dry_run_does_not_touch_file() {
        let (_dir, path) = msg_file();
        let llm = FakeClient::new(Reply::Text("feat: printed"));
        let cfg = Config {
            dry_run: true,
            ..config()
        };

        let outcome = run(&path, &CommitSource::Normal, &cfg, &diff("+x\n"), &llm).unwrap();

        assert_eq!(outcome, Outcome::Printed);
        assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
    }

    #[test]
    fn disabled_model_skips_before_reading_the_index() {
        let (_dir, path) = msg_file();
        let llm = FakeClient::new(Reply::Text("feat: nope"));
        let cfg = Config {
            disabled: true,
            ..config()
        };

        // A failing diff source would surface as Err if it were consulted.
        let outcome = run(&path, &CommitSource::Normal, &cfg, &FakeDiff(None), &llm).unwrap();

        assert_eq!(outcome, Outcome::Disabled);
        assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
        assert!(llm.prompts().is_empty());
    }

    #[test]
    fn diff_failure_is_returned_to_caller() {
        let (_dir, path) = msg_file();
        let llm = FakeClient::new(Reply::Text("feat: nope"));

        let result = run(&path, &CommitSource::Normal, &config(), &FakeDiff(None), &llm);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
    }
}
