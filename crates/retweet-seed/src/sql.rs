//! SQL literal rendering.
//!
//! Values never reach a statement template as raw text. Each one is wrapped
//! in a [`SqlValue`] and rendered here, so quoting is applied uniformly.

use std::fmt;

/// A value that can be embedded in a generated statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlValue<'a> {
    /// Text rendered as a single-quoted literal.
    Text(&'a str),
    /// Boolean rendered as `true` or `false`.
    Bool(bool),
    /// Integer rendered bare.
    Integer(i64),
}

impl fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(&quote_literal(text)),
            Self::Bool(flag) => f.write_str(if *flag { "true" } else { "false" }),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// Wraps text in single quotes, doubling any embedded single quote.
///
/// # Examples
///
/// ```
/// use retweet_seed::quote_literal;
///
/// assert_eq!(quote_literal("alice"), "'alice'");
/// assert_eq!(quote_literal("o'brien"), "'o''brien'");
/// ```
#[must_use]
pub fn quote_literal(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        if c == '\'' {
            quoted.push('\'');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Renders a parenthesised value tuple, indented for a `VALUES` list.
///
/// # Examples
///
/// ```
/// use retweet_seed::{SqlValue, render_tuple};
///
/// let tuple = render_tuple(&[SqlValue::Text("a"), SqlValue::Bool(true), SqlValue::Integer(3)]);
/// assert_eq!(tuple, "  ('a', true, 3)");
/// ```
#[must_use]
pub fn render_tuple(values: &[SqlValue<'_>]) -> String {
    let mut tuple = String::from("  (");
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            tuple.push_str(", ");
        }
        tuple.push_str(&value.to_string());
    }
    tuple.push(')');
    tuple
}
