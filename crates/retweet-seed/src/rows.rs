//! User and entry rows derived from retweet records.
//!
//! Every record yields exactly one [`UserRow`] and one [`EntryRow`]. Ids are
//! derived from the username, so a repeated username would produce a
//! repeated primary key; [`SeedRows::from_records`] rejects that up front.

use std::collections::HashMap;

use crate::error::InputError;
use crate::record::RetweetRecord;
use crate::sql::{SqlValue, render_tuple};

/// Prefix applied to usernames to build user ids.
pub const USER_ID_PREFIX: &str = "user_";

/// Prefix applied to usernames to build entry ids.
pub const ENTRY_ID_PREFIX: &str = "rt_";

/// Column order of the `User` table insert.
pub const USER_COLUMNS: [&str; 6] = [
    "id",
    "twitterId",
    "screenName",
    "isFollower",
    "createdAt",
    "updatedAt",
];

/// Column order of the `Entry` table insert.
pub const ENTRY_COLUMNS: [&str; 6] = [
    "id",
    "userId",
    "retweetId",
    "retweetedAt",
    "createdAt",
    "isValid",
];

/// A row destined for the `User` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    /// Primary key, `user_<username>`.
    pub id: String,
    /// Twitter identifier; the username.
    pub twitter_id: String,
    /// Screen name; the username.
    pub screen_name: String,
    /// Always `true` for seeded users.
    pub is_follower: bool,
    /// Retweet timestamp.
    pub created_at: String,
    /// Retweet timestamp.
    pub updated_at: String,
}

impl UserRow {
    /// Derives the user row for a record.
    ///
    /// # Example
    ///
    /// ```
    /// use retweet_seed::{RetweetRecord, UserRow};
    ///
    /// let record = RetweetRecord::new(2, "alice", "2024-01-01T00:00:00").expect("record");
    /// let user = UserRow::from_record(&record);
    /// assert_eq!(user.id, "user_alice");
    /// ```
    #[must_use]
    pub fn from_record(record: &RetweetRecord) -> Self {
        Self {
            id: user_id(record.username()),
            twitter_id: record.username().to_owned(),
            screen_name: record.username().to_owned(),
            is_follower: true,
            created_at: record.timestamp().to_owned(),
            updated_at: record.timestamp().to_owned(),
        }
    }

    /// Renders the row as a value tuple in [`USER_COLUMNS`] order.
    #[must_use]
    pub fn to_tuple(&self) -> String {
        render_tuple(&[
            SqlValue::Text(&self.id),
            SqlValue::Text(&self.twitter_id),
            SqlValue::Text(&self.screen_name),
            SqlValue::Bool(self.is_follower),
            SqlValue::Text(&self.created_at),
            SqlValue::Text(&self.updated_at),
        ])
    }
}

/// A row destined for the `Entry` table, one per retweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    /// Primary key, `rt_<username>`.
    pub id: String,
    /// Foreign key to [`UserRow::id`].
    pub user_id: String,
    /// Retweet identifier; same as `id`.
    pub retweet_id: String,
    /// Retweet timestamp.
    pub retweeted_at: String,
    /// Retweet timestamp.
    pub created_at: String,
    /// Always `true` for seeded entries.
    pub is_valid: bool,
}

impl EntryRow {
    /// Derives the entry row for a record.
    #[must_use]
    pub fn from_record(record: &RetweetRecord) -> Self {
        let id = entry_id(record.username());
        Self {
            retweet_id: id.clone(),
            id,
            user_id: user_id(record.username()),
            retweeted_at: record.timestamp().to_owned(),
            created_at: record.timestamp().to_owned(),
            is_valid: true,
        }
    }

    /// Renders the row as a value tuple in [`ENTRY_COLUMNS`] order.
    #[must_use]
    pub fn to_tuple(&self) -> String {
        render_tuple(&[
            SqlValue::Text(&self.id),
            SqlValue::Text(&self.user_id),
            SqlValue::Text(&self.retweet_id),
            SqlValue::Text(&self.retweeted_at),
            SqlValue::Text(&self.created_at),
            SqlValue::Bool(self.is_valid),
        ])
    }
}

/// Parallel user and entry rows, in record order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedRows {
    users: Vec<UserRow>,
    entries: Vec<EntryRow>,
}

impl SeedRows {
    /// Derives rows for every record, rejecting repeated usernames.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::DuplicateUsername`] for the first username seen
    /// twice.
    pub fn from_records(records: &[RetweetRecord]) -> Result<Self, InputError> {
        let mut first_seen: HashMap<&str, u64> = HashMap::with_capacity(records.len());
        let mut users = Vec::with_capacity(records.len());
        let mut entries = Vec::with_capacity(records.len());

        for record in records {
            if let Some(first_row) = first_seen.insert(record.username(), record.row()) {
                return Err(InputError::DuplicateUsername {
                    username: record.username().to_owned(),
                    first_row,
                    row: record.row(),
                });
            }
            users.push(UserRow::from_record(record));
            entries.push(EntryRow::from_record(record));
        }

        Ok(Self { users, entries })
    }

    /// Returns the user rows.
    #[must_use]
    pub fn users(&self) -> &[UserRow] {
        &self.users
    }

    /// Returns the entry rows.
    #[must_use]
    pub fn entries(&self) -> &[EntryRow] {
        &self.entries
    }

    /// Returns `true` when no records were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns the number of records the rows were derived from.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }
}

fn user_id(username: &str) -> String {
    format!("{USER_ID_PREFIX}{username}")
}

fn entry_id(username: &str) -> String {
    format!("{ENTRY_ID_PREFIX}{username}")
}
