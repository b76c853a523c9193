mod cli_args;
mod config;
mod git;
mod hook;
mod llm;
mod logging;
mod setup;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use crate::cli_args::Cli;
use crate::config::Config;
use crate::git::GitIndex;
use crate::hook::{CommitSource, Outcome};

fn run(cli: &Cli) -> Result<Outcome> {
    let cfg = Config::from_sources(cli);
    log::debug!("Resolved config: {:?}", cfg);

    let source = CommitSource::from_arg(cli.commit_source.as_deref());
    if let Some(sha) = &cli.commit_sha {
        log::debug!("Commit source {} refers to {sha}", source.as_str());
    }
    let llm = setup::build_llm_client(&cfg)?;

    hook::run(&cli.commit_msg_file, &source, &cfg, &GitIndex, llm.as_ref())
}

/// Git aborts the commit on a non-zero exit, so every path below ends in
/// `ExitCode::SUCCESS`.
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            if !matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                eprintln!("hookscribe: leaving the commit message untouched");
            }
            return ExitCode::SUCCESS;
        }
    };

    logging::init_logger(cli.verbose);

    match panic::catch_unwind(AssertUnwindSafe(|| run(&cli))) {
        Ok(Ok(outcome)) => log::info!("{outcome}"),
        Ok(Err(e)) => log::error!("{e:#}"),
        Err(_) => log::error!("internal panic; commit message left untouched"),
    }

    ExitCode::SUCCESS
}
