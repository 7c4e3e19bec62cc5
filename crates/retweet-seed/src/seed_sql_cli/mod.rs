//! CLI support for generating the seed SQL file.
//!
//! This module provides argument parsing, settings resolution, and the run
//! flow for the `retweet-seed-sql` binary. The binary delegates to these
//! functions so they can be exercised in tests without spawning a process.

mod error;

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use chrono::{DateTime, Utc};
use clap::Parser;
use mockable::Clock;
use ortho_config::OrthoConfig;
use tracing::{debug, info};

pub use self::error::CliError;
use crate::atomic_io::write_atomic;
use crate::config::SeedSqlSettings;
use crate::error::{InputError, OutputError};
use crate::generator::{FixedClock, GeneratorOptions, SeedSqlGenerator};
use crate::gift_codes::GiftCodeCount;
use crate::record::{RetweetRecord, read_records};

/// `retweet-seed-sql` command arguments.
///
/// Every flag is optional; unset flags fall back to [`SeedSqlSettings`].
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "retweet-seed-sql",
    about = "Generate seed SQL for users, retweet entries, and gift codes from a retweet CSV",
    version
)]
pub struct CliArgs {
    /// Retweet CSV with `username` and `timestamp` columns.
    #[arg(long = "input", value_name = "path")]
    pub input: Option<Utf8PathBuf>,
    /// SQL file to write.
    #[arg(long = "output", value_name = "path")]
    pub output: Option<Utf8PathBuf>,
    /// Number of gift codes to generate (1-999).
    #[arg(long = "gift-code-count", value_name = "n")]
    pub gift_code_count: Option<u32>,
    /// Amount carried by each gift code.
    #[arg(long = "gift-code-amount", value_name = "n")]
    pub gift_code_amount: Option<u32>,
    /// Fixed gift-code creation time (RFC 3339) for reproducible output.
    #[arg(long = "created-at", value_name = "rfc3339", value_parser = parse_created_at)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fully resolved options for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    input_path: Utf8PathBuf,
    output_path: Utf8PathBuf,
    generator: GeneratorOptions,
    created_at: Option<DateTime<Utc>>,
}

impl Options {
    /// Merges command-line arguments over settings.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Generation`] when the resulting gift-code count
    /// is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use retweet_seed::SeedSqlSettings;
    /// use retweet_seed::seed_sql_cli::{Options, parse_args};
    ///
    /// let args = parse_args(["retweet-seed-sql", "--input", "retweets.csv"]).expect("parse");
    /// let options = Options::resolve(args, &SeedSqlSettings::default()).expect("resolve");
    ///
    /// assert_eq!(options.input_path().as_str(), "retweets.csv");
    /// assert_eq!(options.output_path().as_str(), "prisma/seed.sql");
    /// ```
    pub fn resolve(args: CliArgs, settings: &SeedSqlSettings) -> Result<Self, CliError> {
        let defaults = settings.generator_options()?;
        let gift_code_count = match args.gift_code_count {
            Some(count) => GiftCodeCount::new(count)?,
            None => defaults.gift_code_count,
        };
        let generator = GeneratorOptions {
            gift_code_count,
            gift_code_amount: args.gift_code_amount.unwrap_or(defaults.gift_code_amount),
        };

        Ok(Self {
            input_path: args
                .input
                .unwrap_or_else(|| settings.input_path().to_path_buf()),
            output_path: args
                .output
                .unwrap_or_else(|| settings.output_path().to_path_buf()),
            generator,
            created_at: args.created_at,
        })
    }

    /// Returns the input CSV path.
    #[must_use]
    pub fn input_path(&self) -> &Utf8Path {
        &self.input_path
    }

    /// Returns the output SQL path.
    #[must_use]
    pub fn output_path(&self) -> &Utf8Path {
        &self.output_path
    }

    /// Returns the generator options.
    #[must_use]
    pub const fn generator(&self) -> &GeneratorOptions {
        &self.generator
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Path the SQL was written to.
    pub output_path: Utf8PathBuf,
    /// Number of user tuples written.
    pub user_count: usize,
    /// Number of entry tuples written.
    pub entry_count: usize,
    /// Number of gift codes the SQL inserts.
    pub gift_code_count: u16,
}

/// Parses command-line arguments, including the program name.
///
/// # Errors
///
/// Returns the [`clap::Error`] describing invalid input, or the help and
/// version displays.
pub fn parse_args<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliArgs::try_parse_from(args)
}

/// Loads settings from the environment and config files.
///
/// # Errors
///
/// Returns [`CliError::Settings`] when a setting cannot be parsed.
pub fn load_settings() -> Result<SeedSqlSettings, CliError> {
    SeedSqlSettings::load_from_iter([OsString::from("retweet-seed-sql")]).map_err(|err| {
        CliError::Settings {
            message: err.to_string(),
        }
    })
}

/// Reads the input, generates the SQL, and writes it atomically.
///
/// Nothing is written unless every record is valid. When
/// `--created-at` was given it replaces `clock`.
///
/// # Errors
///
/// Returns [`CliError`] when the input is unreadable or malformed, or the
/// output cannot be written.
pub fn run(options: &Options, clock: Arc<dyn Clock>) -> Result<RunSummary, CliError> {
    let records = load_records(options.input_path())?;
    debug!(
        path = %options.input_path(),
        record_count = records.len(),
        "loaded retweet records"
    );

    let effective_clock: Arc<dyn Clock> = match options.created_at {
        Some(created_at) => Arc::new(FixedClock::new(created_at)),
        None => clock,
    };
    let generator = SeedSqlGenerator::new(options.generator, effective_clock);
    let script = generator.generate(&records)?;

    write_output(options.output_path(), script.as_str())?;
    info!(path = %options.output_path(), "seed sql written");

    Ok(RunSummary {
        output_path: options.output_path.clone(),
        user_count: script.user_count(),
        entry_count: script.entry_count(),
        gift_code_count: script.gift_code_count(),
    })
}

/// Reads every retweet record from a CSV file.
///
/// # Errors
///
/// Returns [`InputError::Read`] when the file cannot be opened and any other
/// [`InputError`] for malformed content.
pub fn load_records(path: &Utf8Path) -> Result<Vec<RetweetRecord>, InputError> {
    let read_error = |err: io::Error| InputError::Read {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    let (dir, file_name) = open_parent(path).map_err(read_error)?;
    let file = dir.open(file_name).map_err(read_error)?;
    read_records(file)
}

/// Formats the success message emitted by the CLI.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use retweet_seed::seed_sql_cli::{RunSummary, success_message};
///
/// let summary = RunSummary {
///     output_path: Utf8PathBuf::from("prisma/seed.sql"),
///     user_count: 2,
///     entry_count: 2,
///     gift_code_count: 100,
/// };
///
/// assert_eq!(
///     success_message(&summary),
///     "Wrote 2 users, 2 entries, and 100 gift codes to prisma/seed.sql"
/// );
/// ```
#[must_use]
pub fn success_message(summary: &RunSummary) -> String {
    format!(
        "Wrote {} users, {} entries, and {} gift codes to {}",
        summary.user_count, summary.entry_count, summary.gift_code_count, summary.output_path
    )
}

fn write_output(path: &Utf8Path, sql: &str) -> Result<(), OutputError> {
    let (dir, file_name) = open_parent(path).map_err(|err| OutputError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    write_atomic(&dir, Utf8Path::new(file_name), path, sql)
}

fn open_parent(path: &Utf8Path) -> io::Result<(Dir, &str)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path must name a file")
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| format!("expected an RFC 3339 timestamp: {err}"))
}
