//! Retweet records and the CSV reader that produces them.
//!
//! The source is delimited text with a header row naming at least
//! `username` and `timestamp`. Other columns are ignored, blank lines are
//! skipped, and every row must carry non-empty values for both required
//! columns. Rows may be shorter than the header as long as both required
//! columns are present.
//!
//! Rows are numbered from 1 in the order they are read. The header and
//! skipped blank lines are not counted.

use std::io;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};

use crate::error::InputError;

/// Header name of the username column.
pub const USERNAME_COLUMN: &str = "username";

/// Header name of the timestamp column.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// A single captured retweet event.
///
/// Both fields are guaranteed non-empty. The timestamp is kept verbatim; it
/// is embedded into SQL as text and never reinterpreted.
///
/// # Example
///
/// ```
/// use retweet_seed::RetweetRecord;
///
/// let record = RetweetRecord::new(1, "alice", "2024-01-01T00:00:00").expect("valid record");
/// assert_eq!(record.username(), "alice");
/// assert_eq!(record.row(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetweetRecord {
    row: u64,
    username: String,
    timestamp: String,
}

impl RetweetRecord {
    /// Builds a record, rejecting empty or whitespace-only fields.
    ///
    /// `row` is the record's position among the data rows and is only used
    /// in error reports.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingField`] when either value is blank.
    pub fn new(
        row: u64,
        username: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Result<Self, InputError> {
        let username_value = username.into();
        let timestamp_value = timestamp.into();
        if username_value.trim().is_empty() {
            return Err(InputError::MissingField {
                row,
                field: USERNAME_COLUMN,
            });
        }
        if timestamp_value.trim().is_empty() {
            return Err(InputError::MissingField {
                row,
                field: TIMESTAMP_COLUMN,
            });
        }
        Ok(Self {
            row,
            username: username_value,
            timestamp: timestamp_value,
        })
    }

    /// Returns the 1-based data row the record was read from.
    #[must_use]
    pub const fn row(&self) -> u64 {
        self.row
    }

    /// Returns the username of the account that retweeted.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the retweet timestamp as written in the source.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Lazy reader yielding [`RetweetRecord`]s in source order.
///
/// The header is validated when the reader is built, so a missing column is
/// reported before any row is consumed. Each row is parsed on demand.
pub struct RetweetRecordReader<R> {
    rows: StringRecordsIntoIter<R>,
    username_index: usize,
    timestamp_index: usize,
    rows_read: u64,
}

impl<R: io::Read> RetweetRecordReader<R> {
    /// Wraps a byte source and resolves the required header columns.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Csv`] when the header cannot be parsed and
    /// [`InputError::MissingColumn`] when a required column is absent.
    pub fn from_reader(reader: R) -> Result<Self, InputError> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers().map_err(csv_error)?;
        let username_index = column_index(headers, USERNAME_COLUMN)?;
        let timestamp_index = column_index(headers, TIMESTAMP_COLUMN)?;

        Ok(Self {
            rows: csv_reader.into_records(),
            username_index,
            timestamp_index,
            rows_read: 0,
        })
    }

    fn parse_row(&self, fields: &StringRecord) -> Result<RetweetRecord, InputError> {
        let username = fields.get(self.username_index).unwrap_or_default();
        let timestamp = fields.get(self.timestamp_index).unwrap_or_default();
        RetweetRecord::new(self.rows_read, username, timestamp)
    }
}

impl<R: io::Read> Iterator for RetweetRecordReader<R> {
    type Item = Result<RetweetRecord, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        let fields = self.rows.next()?;
        self.rows_read += 1;
        Some(fields.map_err(csv_error).and_then(|f| self.parse_row(&f)))
    }
}

/// Reads every record from a CSV byte source, stopping at the first error.
///
/// # Errors
///
/// Returns the first [`InputError`] raised by the header check or any row.
///
/// # Example
///
/// ```
/// use retweet_seed::read_records;
///
/// let csv = "username,timestamp\nalice,2024-01-01T00:00:00\n";
/// let records = read_records(csv.as_bytes()).expect("valid input");
/// assert_eq!(records.len(), 1);
/// ```
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<RetweetRecord>, InputError> {
    RetweetRecordReader::from_reader(reader)?.collect()
}

fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize, InputError> {
    headers
        .iter()
        .position(|name| name == column)
        .ok_or(InputError::MissingColumn { column })
}

fn csv_error(err: csv::Error) -> InputError {
    InputError::Csv {
        message: err.to_string(),
    }
}
