//! Generate seed SQL for users, retweet entries, and gift codes.
//!
//! This binary delegates to `retweet_seed::seed_sql_cli` for parsing and
//! generation, keeping the CLI behaviour testable without spawning a process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use mockable::DefaultClock;
use retweet_seed::seed_sql_cli::{
    CliArgs, CliError, Options, load_settings, parse_args, run, success_message,
};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args(env::args_os()) {
        Ok(args) => args,
        // Prints help, version, or the usage error and exits with clap's code.
        Err(err) => err.exit(),
    };

    match execute(args) {
        Ok(message) => {
            if let Err(err) = writeln!(io::stdout().lock(), "{message}") {
                drop(err);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(args: CliArgs) -> Result<String, CliError> {
    let settings = load_settings()?;
    let options = Options::resolve(args, &settings)?;
    let summary = run(&options, Arc::new(DefaultClock))?;
    Ok(success_message(&summary))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
