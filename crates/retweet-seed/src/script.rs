//! Assembly of the seed SQL artifact.
//!
//! The artifact holds up to three statements separated by a blank line: the
//! `User` insert, the `Entry` insert, and the `GiftCode` insert. The first two
//! are omitted when there are no rows, because an insert with an empty
//! `VALUES` list is not valid SQL. The gift-code statement is always present.

use crate::gift_codes::GiftCodeBatch;
use crate::rows::{ENTRY_COLUMNS, SeedRows, USER_COLUMNS};

/// Comment heading the user insert.
pub const USER_SECTION_COMMENT: &str = "-- ユーザーの作成";

/// Comment heading the entry insert.
pub const ENTRY_SECTION_COMMENT: &str = "-- エントリー（リツイート）の作成";

/// Comment heading the gift-code insert.
pub const GIFT_CODE_SECTION_COMMENT: &str = "-- ギフトコードの作成";

const ROW_SEPARATOR: &str = ",\n";
const SECTION_SEPARATOR: &str = "\n\n";

/// The rendered seed SQL, with counts of what it inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedScript {
    sql: String,
    user_count: usize,
    entry_count: usize,
    gift_code_count: u16,
}

impl SeedScript {
    /// Renders the statements for `rows` and `gift_codes`.
    #[must_use]
    pub fn render(rows: &SeedRows, gift_codes: &GiftCodeBatch) -> Self {
        let mut sections = Vec::with_capacity(3);

        if !rows.is_empty() {
            let users: Vec<_> = rows.users().iter().map(|user| user.to_tuple()).collect();
            sections.push(insert_values(
                USER_SECTION_COMMENT,
                "User",
                &USER_COLUMNS,
                &users,
            ));

            let entries: Vec<_> = rows.entries().iter().map(|entry| entry.to_tuple()).collect();
            sections.push(insert_values(
                ENTRY_SECTION_COMMENT,
                "Entry",
                &ENTRY_COLUMNS,
                &entries,
            ));
        }

        sections.push(format!(
            "{GIFT_CODE_SECTION_COMMENT}\n{}",
            gift_codes.render_statement()
        ));

        let mut sql = sections.join(SECTION_SEPARATOR);
        sql.push('\n');

        Self {
            sql,
            user_count: rows.users().len(),
            entry_count: rows.entries().len(),
            gift_code_count: gift_codes.count().get(),
        }
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    /// Consumes the script, returning the SQL text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.sql
    }

    /// Returns the number of user tuples emitted.
    #[must_use]
    pub const fn user_count(&self) -> usize {
        self.user_count
    }

    /// Returns the number of entry tuples emitted.
    #[must_use]
    pub const fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Returns the number of gift codes the script inserts.
    #[must_use]
    pub const fn gift_code_count(&self) -> u16 {
        self.gift_code_count
    }
}

fn insert_values(comment: &str, table: &str, columns: &[&str], tuples: &[String]) -> String {
    format!(
        "{comment}\nINSERT INTO {table} ({})\nVALUES\n{};",
        columns.join(", "),
        tuples.join(ROW_SEPARATOR)
    )
}
