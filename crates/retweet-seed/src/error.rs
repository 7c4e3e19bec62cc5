//! Error types for the retweet-seed crate.
//!
//! Errors are split by the stage that raises them: reading retweet records,
//! building the gift-code batch, and writing the finished SQL artifact. Every
//! variant is fatal; a run either produces the whole artifact or nothing.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while reading or validating retweet records.
///
/// All of these represent malformed input: the source could not be read,
/// could not be parsed, or produced rows that would yield invalid SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The input file could not be read.
    #[error("failed to read input file at '{path}': {message}")]
    Read {
        /// Path to the input file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The header row does not name a required column.
    #[error("input is missing required column '{column}'")]
    MissingColumn {
        /// Name of the absent column.
        column: &'static str,
    },

    /// A row has an empty value for a required column.
    #[error("row {row}: required field '{field}' is empty")]
    MissingField {
        /// 1-based data row of the offending record.
        row: u64,
        /// Name of the empty field.
        field: &'static str,
    },

    /// The delimited text could not be parsed.
    #[error("invalid CSV input: {message}")]
    Csv {
        /// Description of the parse error.
        message: String,
    },

    /// Two rows share a username and would produce duplicate primary keys.
    #[error("row {row}: duplicate username '{username}' (first seen in row {first_row})")]
    DuplicateUsername {
        /// The repeated username.
        username: String,
        /// Data row of the first occurrence.
        first_row: u64,
        /// Data row of the repeated occurrence.
        row: u64,
    },
}

/// Errors raised while preparing generated rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested gift-code batch size cannot be zero-padded to three digits.
    #[error("gift code count {count} is out of range ({min}..={max})")]
    GiftCodeCountOutOfRange {
        /// Requested batch size.
        count: u32,
        /// Smallest accepted batch size.
        min: u32,
        /// Largest accepted batch size.
        max: u32,
    },
}

/// Errors raised while persisting the generated SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// The output file could not be written.
    #[error("failed to write output file at '{path}': {message}")]
    Write {
        /// Path that failed to write.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
