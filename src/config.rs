use crate::cli_args::Cli;
use log::warn;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_DIFF_LINES: usize = 400;

/// Final resolved configuration for one hook run.
#[derive(Debug, Clone)]
pub struct Config {
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub max_diff_lines: usize,
    /// Never call the model; the hook leaves the message file alone.
    pub disabled: bool,
    pub dry_run: bool,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence, per setting:
    ///   1. CLI flags (`--model`, `--endpoint`, `--timeout`, `--max-lines`, `--no-model`)
    ///   2. Env vars (`HOOKSCRIBE_MODEL`, `HOOKSCRIBE_ENDPOINT`, ...)
    ///   3. TOML `~/.config/hookscribe.toml` (or `$HOOKSCRIBE_CONFIG`)
    ///   4. Hardcoded defaults
    pub fn from_sources(cli: &Cli) -> Self {
        let file_cfg = config_path()
            .and_then(|path| load_file_config(&path))
            .unwrap_or_default();

        Self::resolve(cli, |key| env::var(key).ok(), file_cfg)
    }

    fn resolve<F>(cli: &Cli, env_var: F, file_cfg: FileConfig) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = cli
            .model
            .clone()
            .or_else(|| env_var("HOOKSCRIBE_MODEL"))
            .or(file_cfg.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint = cli
            .endpoint
            .clone()
            .or_else(|| env_var("HOOKSCRIBE_ENDPOINT"))
            .or(file_cfg.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = positive(cli.timeout, "--timeout")
            .or_else(|| positive(parsed_env(&env_var, "HOOKSCRIBE_TIMEOUT"), "HOOKSCRIBE_TIMEOUT"))
            .or_else(|| positive(file_cfg.timeout_secs, "timeout_secs"))
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let max_diff_lines = positive(cli.max_lines, "--max-lines")
            .or_else(|| {
                positive(
                    parsed_env(&env_var, "HOOKSCRIBE_MAX_LINES"),
                    "HOOKSCRIBE_MAX_LINES",
                )
            })
            .or_else(|| positive(file_cfg.max_diff_lines, "max_diff_lines"))
            .unwrap_or(DEFAULT_MAX_DIFF_LINES);

        let disabled = cli.no_model
            || model.eq_ignore_ascii_case("none")
            || env_var("HOOKSCRIBE_DISABLED").is_some_and(|v| is_truthy(&v))
            || file_cfg.disabled.unwrap_or(false);

        Config {
            model,
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
            max_diff_lines,
            disabled,
            dry_run: cli.dry_run,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    /// Default model to use when not provided via CLI or env.
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_diff_lines: Option<usize>,
    pub disabled: Option<bool>,
}

fn parsed_env<T, F>(env_var: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = env_var(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {key}={raw:?}: not a valid number");
            None
        }
    }
}

fn positive<T>(value: Option<T>, name: &str) -> Option<T>
where
    T: PartialOrd + Default + Copy,
{
    match value {
        Some(v) if v > T::default() => Some(v),
        Some(_) => {
            warn!("Ignoring {name}: must be greater than zero");
            None
        }
        None => None,
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Return `$HOOKSCRIBE_CONFIG`, or `~/.config/hookscribe.toml`
fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("HOOKSCRIBE_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("hookscribe.toml"))
}

fn load_file_config(path: &Path) -> Option<FileConfig> {
    if !path.exists() {
        return None;
    }

    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Could not read config {}: {e}", path.display());
            return None;
        }
    };

    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!("Ignoring malformed config {}: {e}", path.display());
            None
        }
    }
}
