//! End-to-end tests for seed SQL generation.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

mod test_support;

use retweet_seed::{InputError, RetweetRecord, SeedRows, read_records};
use rstest::rstest;
use test_support::generate_from_csv;

const EXPECTED_TWO_USERS: &str = "-- ユーザーの作成
INSERT INTO User (id, twitterId, screenName, isFollower, createdAt, updatedAt)
VALUES
  ('user_alice', 'alice', 'alice', true, '2024-01-01T00:00:00', '2024-01-01T00:00:00'),
  ('user_bob', 'bob', 'bob', true, '2024-01-02T00:00:00', '2024-01-02T00:00:00');

-- エントリー（リツイート）の作成
INSERT INTO Entry (id, userId, retweetId, retweetedAt, createdAt, isValid)
VALUES
  ('rt_alice', 'user_alice', 'rt_alice', '2024-01-01T00:00:00', '2024-01-01T00:00:00', true),
  ('rt_bob', 'user_bob', 'rt_bob', '2024-01-02T00:00:00', '2024-01-02T00:00:00', true);

-- ギフトコードの作成
INSERT INTO GiftCode (id, code, amount, isUsed, createdAt)
SELECT
  'code_' || printf('%03d', x) as id,
  'GIFT' || printf('%03d', x) as code,
  1000 as amount,
  false as isUsed,
  '2024-01-10 12:00:00' as createdAt
FROM (
  WITH RECURSIVE cnt(x) AS (
    SELECT 1
    UNION ALL
    SELECT x+1 FROM cnt
    LIMIT 100
  )
  SELECT x FROM cnt
);
";

#[test]
fn two_records_produce_the_full_artifact() {
    let csv = "username,timestamp\nalice,2024-01-01T00:00:00\nbob,2024-01-02T00:00:00\n";

    let script = generate_from_csv(csv).expect("generation succeeds");

    assert_eq!(script.as_str(), EXPECTED_TWO_USERS);
}

#[test]
fn quotes_in_input_cannot_break_out_of_literals() {
    let csv = "username,timestamp\n\"x'); DROP TABLE User; --\",2024-01-01T00:00:00\n";

    let script = generate_from_csv(csv).expect("generation succeeds");

    assert!(
        script
            .as_str()
            .contains("('user_x''); DROP TABLE User; --', 'x''); DROP TABLE User; --',")
    );
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(40)]
fn tuple_counts_follow_record_counts(#[case] count: usize) {
    let mut csv = String::from("username,timestamp\n");
    for index in 0..count {
        csv.push_str(&format!("user{index},2024-01-01T00:00:{:02}\n", index % 60));
    }

    let script = generate_from_csv(&csv).expect("generation succeeds");

    assert_eq!(script.user_count(), count);
    assert_eq!(script.entry_count(), count);
    assert_eq!(script.as_str().matches("  ('user_").count(), count);
    assert_eq!(script.as_str().matches("  ('rt_").count(), count);
    assert_eq!(script.gift_code_count(), 100);
}

#[test]
fn rows_keep_input_order_and_link_entries_to_users() {
    let csv = "username,timestamp\ncarol,t3\nalice,t1\nbob,t2\n";
    let records = read_records(csv.as_bytes()).expect("valid input");

    let rows = SeedRows::from_records(&records).expect("rows");

    let usernames: Vec<_> = records.iter().map(RetweetRecord::username).collect();
    assert_eq!(usernames, vec!["carol", "alice", "bob"]);
    for ((record, user), entry) in records.iter().zip(rows.users()).zip(rows.entries()) {
        assert_eq!(user.id, format!("user_{}", record.username()));
        assert_eq!(entry.id, format!("rt_{}", record.username()));
        assert_eq!(entry.user_id, user.id);
    }
}

#[rstest]
#[case::empty_timestamp("username,timestamp\nalice,\n", InputError::MissingField { row: 1, field: "timestamp" })]
#[case::missing_column("username\nalice\n", InputError::MissingColumn { column: "timestamp" })]
#[case::duplicate(
    "username,timestamp\nalice,t1\nbob,t2\nalice,t3\n",
    InputError::DuplicateUsername { username: "alice".to_owned(), first_row: 1, row: 3 }
)]
#[case::duplicate_after_blank_lines(
    "username,timestamp\nalice,t1\n\n\nalice,t2\n",
    InputError::DuplicateUsername { username: "alice".to_owned(), first_row: 1, row: 2 }
)]
fn malformed_input_fails_without_output(#[case] csv: &str, #[case] expected: InputError) {
    assert_eq!(generate_from_csv(csv), Err(expected));
}
