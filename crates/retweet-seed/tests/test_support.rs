//! Shared helpers for retweet-seed integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use retweet_seed::{
    FixedClock, GeneratorOptions, InputError, SeedScript, SeedSqlGenerator, read_records,
};

/// Instant every fixture clock reports.
///
/// # Panics
///
/// Panics if the fixture timestamp is ambiguous, which it never is.
#[must_use]
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Build a generator with default options and a fixture clock.
#[must_use]
pub fn fixture_generator() -> SeedSqlGenerator {
    SeedSqlGenerator::new(
        GeneratorOptions::default(),
        Arc::new(FixedClock::new(fixture_timestamp())),
    )
}

/// Parse `csv` and generate seed SQL with the fixture generator.
///
/// # Errors
///
/// Returns any [`InputError`] raised while reading or generating.
pub fn generate_from_csv(csv: &str) -> Result<SeedScript, InputError> {
    let records = read_records(csv.as_bytes())?;
    fixture_generator().generate(&records)
}
