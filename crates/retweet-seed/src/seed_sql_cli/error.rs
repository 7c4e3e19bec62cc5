//! Error types for the seed SQL CLI.

use thiserror::Error;

use crate::error::{GenerationError, InputError, OutputError};

/// Errors surfaced by the CLI run flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Settings could not be loaded from the environment or config files.
    #[error("invalid settings: {message}")]
    Settings {
        /// Description of the settings failure.
        message: String,
    },
    /// The input could not be read or is malformed.
    #[error("input error: {source}")]
    Input {
        /// Underlying input error.
        #[from]
        #[source]
        source: InputError,
    },
    /// The generation parameters are invalid.
    #[error("generation error: {source}")]
    Generation {
        /// Underlying generation error.
        #[from]
        #[source]
        source: GenerationError,
    },
    /// The SQL file could not be written.
    #[error("output error: {source}")]
    Output {
        /// Underlying output error.
        #[from]
        #[source]
        source: OutputError,
    },
}
