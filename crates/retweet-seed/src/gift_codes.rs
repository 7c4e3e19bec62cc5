//! Sequential gift-code batch.
//!
//! The batch is independent of the retweet input. Counters run from 1 to the
//! batch size and are zero-padded to [`GIFT_CODE_PAD_WIDTH`] digits, which
//! caps the batch at 999 codes.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::GenerationError;
use crate::sql::{SqlValue, quote_literal};

/// Smallest accepted batch size.
pub const GIFT_CODE_COUNT_MIN: u16 = 1;

/// Largest batch size that fits the padding width.
pub const GIFT_CODE_COUNT_MAX: u16 = 999;

/// Batch size used when none is configured.
pub const DEFAULT_GIFT_CODE_COUNT: u16 = 100;

/// Redeemable amount used when none is configured.
pub const DEFAULT_GIFT_CODE_AMOUNT: u32 = 1000;

/// Digits each counter is zero-padded to.
pub const GIFT_CODE_PAD_WIDTH: usize = 3;

/// Prefix of generated gift-code ids.
pub const GIFT_CODE_ID_PREFIX: &str = "code_";

/// Prefix of generated redeemable codes.
pub const GIFT_CODE_PREFIX: &str = "GIFT";

/// Timestamp layout matching SQLite's `CURRENT_TIMESTAMP`.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of codes in a batch, validated against the padding width.
///
/// # Example
///
/// ```
/// use retweet_seed::GiftCodeCount;
///
/// assert!(GiftCodeCount::new(100).is_ok());
/// assert!(GiftCodeCount::new(1000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GiftCodeCount(u16);

impl GiftCodeCount {
    /// Validates a batch size.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::GiftCodeCountOutOfRange`] when `count` is
    /// zero or exceeds [`GIFT_CODE_COUNT_MAX`].
    pub fn new(count: u32) -> Result<Self, GenerationError> {
        u16::try_from(count)
            .ok()
            .filter(|value| (GIFT_CODE_COUNT_MIN..=GIFT_CODE_COUNT_MAX).contains(value))
            .map(Self)
            .ok_or(GenerationError::GiftCodeCountOutOfRange {
                count,
                min: u32::from(GIFT_CODE_COUNT_MIN),
                max: u32::from(GIFT_CODE_COUNT_MAX),
            })
    }

    /// Returns the batch size.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl Default for GiftCodeCount {
    fn default() -> Self {
        Self(DEFAULT_GIFT_CODE_COUNT)
    }
}

impl fmt::Display for GiftCodeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A batch of sequential gift codes sharing one creation instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCodeBatch {
    count: GiftCodeCount,
    amount: u32,
    created_at: DateTime<Utc>,
}

impl GiftCodeBatch {
    /// Creates a batch stamped with `created_at`.
    #[must_use]
    pub const fn new(count: GiftCodeCount, amount: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            count,
            amount,
            created_at,
        }
    }

    /// Returns the number of codes in the batch.
    #[must_use]
    pub const fn count(&self) -> GiftCodeCount {
        self.count
    }

    /// Returns the amount carried by every code.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// Renders the insert-via-select statement for the batch.
    ///
    /// The database expands a recursive CTE bounded by the batch size into
    /// rows `code_001`/`GIFT001` onwards, so the statement size does not
    /// grow with the batch. Every row shares the batch instant.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use retweet_seed::{GiftCodeBatch, GiftCodeCount};
    ///
    /// let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("timestamp");
    /// let batch = GiftCodeBatch::new(GiftCodeCount::default(), 1000, created_at);
    /// let statement = batch.render_statement();
    ///
    /// assert!(statement.starts_with("INSERT INTO GiftCode"));
    /// assert!(statement.contains("LIMIT 100"));
    /// ```
    #[must_use]
    pub fn render_statement(&self) -> String {
        let padded = format!("printf('%0{GIFT_CODE_PAD_WIDTH}d', x)");
        let id_prefix = quote_literal(GIFT_CODE_ID_PREFIX);
        let code_prefix = quote_literal(GIFT_CODE_PREFIX);
        let amount = SqlValue::Integer(i64::from(self.amount));
        let is_used = SqlValue::Bool(false);
        let created_at = quote_literal(&format_created_at(self.created_at));
        let limit = self.count;

        format!(
            "INSERT INTO GiftCode (id, code, amount, isUsed, createdAt)\n\
             SELECT\n\
             \x20 {id_prefix} || {padded} as id,\n\
             \x20 {code_prefix} || {padded} as code,\n\
             \x20 {amount} as amount,\n\
             \x20 {is_used} as isUsed,\n\
             \x20 {created_at} as createdAt\n\
             FROM (\n\
             \x20 WITH RECURSIVE cnt(x) AS (\n\
             \x20   SELECT 1\n\
             \x20   UNION ALL\n\
             \x20   SELECT x+1 FROM cnt\n\
             \x20   LIMIT {limit}\n\
             \x20 )\n\
             \x20 SELECT x FROM cnt\n\
             );"
        )
    }
}

/// Formats a batch instant the way SQLite reports `CURRENT_TIMESTAMP`.
#[must_use]
pub fn format_created_at(created_at: DateTime<Utc>) -> String {
    created_at.format(CREATED_AT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("valid fixture timestamp")
    }

    #[rstest]
    #[case(1)]
    #[case(100)]
    #[case(999)]
    fn accepts_counts_within_padding_width(#[case] count: u32) {
        let validated = GiftCodeCount::new(count).expect("count in range");
        assert_eq!(u32::from(validated.get()), count);
    }

    #[rstest]
    #[case(0)]
    #[case(1000)]
    #[case(70_000)]
    fn rejects_counts_outside_padding_width(#[case] count: u32) {
        assert_eq!(
            GiftCodeCount::new(count),
            Err(GenerationError::GiftCodeCountOutOfRange {
                count,
                min: 1,
                max: 999,
            })
        );
    }

    #[test]
    fn default_count_is_one_hundred() {
        assert_eq!(GiftCodeCount::default().get(), 100);
    }

    #[rstest]
    fn statement_renders_counting_sequence(created_at: DateTime<Utc>) {
        let batch = GiftCodeBatch::new(GiftCodeCount::default(), DEFAULT_GIFT_CODE_AMOUNT, created_at);

        let expected = "INSERT INTO GiftCode (id, code, amount, isUsed, createdAt)
SELECT
  'code_' || printf('%03d', x) as id,
  'GIFT' || printf('%03d', x) as code,
  1000 as amount,
  false as isUsed,
  '2024-03-09 14:05:07' as createdAt
FROM (
  WITH RECURSIVE cnt(x) AS (
    SELECT 1
    UNION ALL
    SELECT x+1 FROM cnt
    LIMIT 100
  )
  SELECT x FROM cnt
);";
        assert_eq!(batch.render_statement(), expected);
    }

    #[rstest]
    fn statement_uses_configured_amount_and_count(created_at: DateTime<Utc>) {
        let count = GiftCodeCount::new(12).expect("count in range");
        let statement = GiftCodeBatch::new(count, 250, created_at).render_statement();

        assert!(statement.contains("  250 as amount,"));
        assert!(statement.contains("    LIMIT 12\n"));
    }

    #[rstest]
    fn created_at_uses_sqlite_layout(created_at: DateTime<Utc>) {
        assert_eq!(format_created_at(created_at), "2024-03-09 14:05:07");
    }
}
