use std::path::Path;

use snc_core::{Session, SessionError, SncConfig};

use super::args::{Cli, Command};
use crate::exit_codes;

pub mod check;
pub mod init;
pub mod ledger;
pub mod policy;
pub mod reversal;
pub mod safety;
pub mod session;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = match SncConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    tracing::debug!(config = %cli.config.display(), "configuration resolved");

    match cli.cmd {
        Command::Init(args) => init::run(&args, &cli.config, &config, cli.json),
        Command::Session(args) => session::run(&args, &config, cli.json),
        Command::Check(args) => check::run(&args, &config, cli.json),
        Command::Reversal(args) => reversal::run(&args, &config, cli.json),
        Command::Safety(args) => safety::run(&args, &config, cli.json),
        Command::Policy(args) => policy::run(&args, &config, cli.json),
        Command::Ledger(args) => ledger::run(&args, &config, cli.json),
    }
}

/// Loads the session state commands operate on, mapping an absent file
/// to the config exit code with a bootstrap hint.
pub(crate) fn require_session(path: &Path) -> Result<Session, i32> {
    match Session::load(path) {
        Ok(session) => Ok(session),
        Err(SessionError::Missing { path }) => {
            eprintln!(
                "error: session file not found: {} (run `snc init` first)",
                path.display()
            );
            Err(exit_codes::CONFIG_ERROR)
        }
        Err(err @ SessionError::Parse { .. }) => {
            eprintln!("error: {err}");
            Err(exit_codes::CONFIG_ERROR)
        }
        Err(err) => {
            eprintln!("error: {err}");
            Err(exit_codes::RUNTIME_ERROR)
        }
    }
}
