//! Single-pass seed SQL generation.
//!
//! The generator owns the only non-deterministic input, the clock. Supplying
//! a fixed clock makes the output byte-identical across runs.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::error::InputError;
use crate::gift_codes::{DEFAULT_GIFT_CODE_AMOUNT, GiftCodeBatch, GiftCodeCount};
use crate::record::RetweetRecord;
use crate::rows::SeedRows;
use crate::script::SeedScript;

/// Parameters of the gift-code batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Number of gift codes to emit.
    pub gift_code_count: GiftCodeCount,
    /// Amount carried by each gift code.
    pub gift_code_amount: u32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            gift_code_count: GiftCodeCount::default(),
            gift_code_amount: DEFAULT_GIFT_CODE_AMOUNT,
        }
    }
}

/// Clock frozen at one instant.
///
/// Used for `--created-at` and anywhere output must not depend on when the
/// generator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Turns retweet records into a [`SeedScript`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use retweet_seed::{GeneratorOptions, RetweetRecord, SeedSqlGenerator};
///
/// let generator = SeedSqlGenerator::new(GeneratorOptions::default(), Arc::new(DefaultClock));
/// let records = vec![RetweetRecord::new(2, "alice", "2024-01-01T00:00:00").expect("record")];
/// let script = generator.generate(&records).expect("generated");
///
/// assert_eq!(script.user_count(), 1);
/// assert!(script.as_str().contains("'user_alice'"));
/// ```
#[derive(Clone)]
pub struct SeedSqlGenerator {
    options: GeneratorOptions,
    clock: Arc<dyn Clock>,
}

impl SeedSqlGenerator {
    /// Creates a generator reading the batch timestamp from `clock`.
    #[must_use]
    pub fn new(options: GeneratorOptions, clock: Arc<dyn Clock>) -> Self {
        Self { options, clock }
    }

    /// Generates the complete seed SQL for `records`.
    ///
    /// Empty input is accepted: the user and entry statements are omitted and
    /// only the gift-code statement is produced.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::DuplicateUsername`] when two records share a
    /// username. Nothing is rendered in that case.
    pub fn generate(&self, records: &[RetweetRecord]) -> Result<SeedScript, InputError> {
        let rows = SeedRows::from_records(records)?;
        debug!(record_count = rows.len(), "derived user and entry rows");
        if rows.is_empty() {
            warn!("no retweet records supplied; user and entry statements skipped");
        }

        let gift_codes = GiftCodeBatch::new(
            self.options.gift_code_count,
            self.options.gift_code_amount,
            self.clock.utc(),
        );
        debug!(
            gift_code_count = gift_codes.count().get(),
            amount = gift_codes.amount(),
            "prepared gift code batch"
        );

        let script = SeedScript::render(&rows, &gift_codes);
        info!(
            user_count = script.user_count(),
            entry_count = script.entry_count(),
            gift_code_count = script.gift_code_count(),
            "seed sql generated"
        );
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn generator() -> SeedSqlGenerator {
        let utc_now = Utc
            .with_ymd_and_hms(2024, 2, 1, 8, 30, 0)
            .single()
            .expect("valid fixture timestamp");
        SeedSqlGenerator::new(GeneratorOptions::default(), Arc::new(FixedClock::new(utc_now)))
    }

    fn records() -> Vec<RetweetRecord> {
        vec![
            RetweetRecord::new(2, "alice", "2024-01-01T00:00:00").expect("record"),
            RetweetRecord::new(3, "bob", "2024-01-02T00:00:00").expect("record"),
        ]
    }

    #[rstest]
    fn generation_with_fixed_clock_is_byte_identical(generator: SeedSqlGenerator) {
        let first = generator.generate(&records()).expect("first generation");
        let second = generator.generate(&records()).expect("second generation");

        assert_eq!(first.as_str(), second.as_str());
    }

    #[rstest]
    fn gift_codes_are_stamped_with_clock_time(generator: SeedSqlGenerator) {
        let script = generator.generate(&records()).expect("generated");
        assert!(script.as_str().contains("  '2024-02-01 08:30:00' as createdAt\n"));
    }

    #[rstest]
    fn empty_input_still_emits_gift_codes(generator: SeedSqlGenerator) {
        let script = generator.generate(&[]).expect("generated");

        assert_eq!(script.user_count(), 0);
        assert_eq!(script.gift_code_count(), 100);
        assert!(script.as_str().contains("INSERT INTO GiftCode"));
    }

    #[rstest]
    fn duplicate_usernames_abort_generation(generator: SeedSqlGenerator) {
        let mut input = records();
        input.push(RetweetRecord::new(4, "alice", "2024-01-03T00:00:00").expect("record"));

        let result = generator.generate(&input);

        assert_eq!(
            result,
            Err(InputError::DuplicateUsername {
                username: "alice".to_owned(),
                first_row: 2,
                row: 4,
            })
        );
    }

    #[test]
    fn options_control_gift_code_batch() {
        let options = GeneratorOptions {
            gift_code_count: GiftCodeCount::new(5).expect("count in range"),
            gift_code_amount: 300,
        };
        let generator = SeedSqlGenerator::new(options, Arc::new(mockable::DefaultClock));

        let script = generator.generate(&[]).expect("generated");

        assert_eq!(script.gift_code_count(), 5);
        assert!(script.as_str().contains("  300 as amount,"));
    }
}
