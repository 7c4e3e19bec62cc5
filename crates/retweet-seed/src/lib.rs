//! Seed SQL generation from captured retweet events.
//!
//! This crate turns a CSV of retweet events into one SQL artifact that seeds
//! `User`, `Entry`, and `GiftCode` tables. Generation is a single,
//! all-or-nothing pass: malformed input aborts before any text is written.
//!
//! # Overview
//!
//! - [`read_records`] and [`RetweetRecordReader`] parse the CSV input
//! - [`SeedRows`] derives user and entry rows and rejects duplicate usernames
//! - [`GiftCodeBatch`] describes the sequential gift-code batch
//! - [`SeedSqlGenerator`] assembles the statements into a [`SeedScript`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use retweet_seed::{GeneratorOptions, SeedSqlGenerator, read_records};
//!
//! let csv = "username,timestamp\nalice,2024-01-01T00:00:00\nbob,2024-01-02T00:00:00\n";
//! let records = read_records(csv.as_bytes()).expect("valid input");
//!
//! let generator = SeedSqlGenerator::new(GeneratorOptions::default(), Arc::new(DefaultClock));
//! let script = generator.generate(&records).expect("generation succeeds");
//!
//! assert_eq!(script.user_count(), 2);
//! assert!(script.as_str().contains("('rt_bob', 'user_bob', 'rt_bob',"));
//! ```

mod atomic_io;
mod config;
mod error;
mod generator;
mod gift_codes;
mod record;
mod rows;
mod script;
pub mod seed_sql_cli;
mod sql;

pub use config::SeedSqlSettings;
pub use error::{GenerationError, InputError, OutputError};
pub use generator::{FixedClock, GeneratorOptions, SeedSqlGenerator};
pub use gift_codes::{
    DEFAULT_GIFT_CODE_AMOUNT, DEFAULT_GIFT_CODE_COUNT, GIFT_CODE_COUNT_MAX, GIFT_CODE_COUNT_MIN,
    GiftCodeBatch, GiftCodeCount, format_created_at,
};
pub use record::{RetweetRecord, RetweetRecordReader, TIMESTAMP_COLUMN, USERNAME_COLUMN, read_records};
pub use rows::{ENTRY_COLUMNS, EntryRow, SeedRows, USER_COLUMNS, UserRow};
pub use script::{
    ENTRY_SECTION_COMMENT, GIFT_CODE_SECTION_COMMENT, SeedScript, USER_SECTION_COMMENT,
};
pub use sql::{SqlValue, quote_literal, render_tuple};
