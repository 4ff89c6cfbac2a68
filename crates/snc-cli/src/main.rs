use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod exit_codes;
mod output;

use cli::args::Cli;
use cli::commands::dispatch;

fn main() {
    // Logs go to stderr; stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let code = match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::RUNTIME_ERROR
        }
    };
    std::process::exit(code);
}
