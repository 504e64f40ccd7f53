//! INSERT line recognition using nom.
//!
//! A line opens (or continues) a table block when it looks like
//!
//! ```text
//! INSERT INTO dbo.Orders (Id, Name) VALUES (1, 'a');
//! ──┬─── ─┬── ─┬─ ───┬── ─────────┬──────────────────
//!   │     │    │     │            │
//!   │     │    │     │            └── Remainder (must start with a non-word char)
//!   │     │    │     └── Table name (captured)
//!   │     │    └── Schema (configurable, `dbo` by default)
//!   │     └── INTO keyword
//!   └── INSERT keyword, anchored at column 0
//! ```
//!
//! Keywords are case-sensitive. Trailing whitespace is ignored, so a table
//! name that runs to the end of the line is not recognised.

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{char, satisfy},
    IResult,
};

/// Schema used when none is configured.
pub const DEFAULT_SCHEMA: &str = "dbo";

/// Decides whether a line starts an INSERT and which table it targets.
///
/// Any `Fn(&str) -> Option<&str>` closure is a matcher, so callers can plug
/// in their own recognition rules.
pub trait TableMatcher {
    /// Return the table targeted by `line`, or `None` when the line is not
    /// a recognised INSERT statement.
    fn table<'a>(&self, line: &'a str) -> Option<&'a str>;
}

impl<F> TableMatcher for F
where
    F: Fn(&str) -> Option<&str>,
{
    fn table<'a>(&self, line: &'a str) -> Option<&'a str> {
        self(line)
    }
}

/// Matches `INSERT INTO <schema>.<table>` for a single schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMatcher {
    schema: String,
}

impl SchemaMatcher {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }
}

impl Default for SchemaMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA)
    }
}

impl TableMatcher for SchemaMatcher {
    fn table<'a>(&self, line: &'a str) -> Option<&'a str> {
        parse_insert_into(&self.schema, line.trim_end())
            .ok()
            .map(|(_, table)| table)
    }
}

/// Extract the table name from a `dbo.` INSERT line.
///
/// # Example
///
/// ```
/// use identity_insert::parser::extract_table;
///
/// let table = extract_table("INSERT INTO dbo.Orders(Id,Name) VALUES (1,'a');");
/// assert_eq!(table, Some("Orders"));
/// ```
pub fn extract_table(line: &str) -> Option<&str> {
    SchemaMatcher::default().table(line)
}

/// Parse the statement head and return the table name.
fn parse_insert_into<'a>(schema: &str, input: &'a str) -> IResult<&'a str, &'a str> {
    let (input, _) = tag("INSERT")(input)?;
    let (input, _) = whitespace1(input)?;
    let (input, _) = tag("INTO")(input)?;
    let (input, _) = whitespace1(input)?;
    let (input, _) = tag(schema)(input)?;
    let (input, _) = char('.')(input)?;
    let (input, table) = parse_identifier(input)?;
    // Whitespace is itself a non-word char, so one char of any non-word kind
    // covers both `dbo.T (..)` and `dbo.T(..)`.
    let (input, _) = satisfy(|c| !is_word_char(c))(input)?;

    Ok((input, table))
}

/// Parse an identifier (letters, digits, underscore).
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(is_word_char)(input)
}

fn whitespace1(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_whitespace())(input)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_with_column_list() {
        assert_eq!(
            extract_table("INSERT INTO dbo.Orders(Id,Name) VALUES (1,'x');"),
            Some("Orders")
        );
    }

    #[test]
    fn test_extract_with_space_before_values() {
        assert_eq!(
            extract_table("INSERT INTO dbo.Order_Lines VALUES (1, 2);"),
            Some("Order_Lines")
        );
    }

    #[test]
    fn test_extract_with_tabs_and_runs_of_spaces() {
        assert_eq!(
            extract_table("INSERT\t INTO   dbo.Customer2 (Id) VALUES (7)"),
            Some("Customer2")
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(extract_table("insert into dbo.Orders (Id) VALUES (1)"), None);
        assert_eq!(extract_table("Insert Into dbo.Orders (Id) VALUES (1)"), None);
    }

    #[test]
    fn test_anchored_at_line_start() {
        assert_eq!(extract_table("  INSERT INTO dbo.Orders (Id) VALUES (1)"), None);
        assert_eq!(extract_table("-- INSERT INTO dbo.Orders (Id) VALUES (1)"), None);
    }

    #[test]
    fn test_keywords_need_whitespace() {
        assert_eq!(extract_table("INSERTINTO dbo.Orders (Id)"), None);
        assert_eq!(extract_table("INSERT INTOdbo.Orders (Id)"), None);
    }

    #[test]
    fn test_table_at_end_of_line_is_not_matched() {
        assert_eq!(extract_table("INSERT INTO dbo.Orders"), None);
        assert_eq!(extract_table("INSERT INTO dbo.Orders   \t"), None);
    }

    #[test]
    fn test_other_schema_is_ignored() {
        assert_eq!(extract_table("INSERT INTO sales.Orders (Id) VALUES (1)"), None);
        assert_eq!(extract_table("INSERT INTO Orders (Id) VALUES (1)"), None);
    }

    #[test]
    fn test_configured_schema() {
        let matcher = SchemaMatcher::new("sales");
        assert_eq!(matcher.table("INSERT INTO sales.Orders (Id) VALUES (1)"), Some("Orders"));
        assert_eq!(matcher.table("INSERT INTO dbo.Orders (Id) VALUES (1)"), None);
    }

    #[test]
    fn test_toggle_lines_never_match() {
        assert_eq!(extract_table("SET IDENTITY_INSERT Orders ON;"), None);
        assert_eq!(extract_table("set identity_insert Orders off;"), None);
        assert_eq!(extract_table(""), None);
    }

    #[test]
    fn test_function_matcher() {
        fn bracketed(line: &str) -> Option<&str> {
            line.strip_prefix("INSERT INTO [")
                .and_then(|rest| rest.split(']').next())
        }

        assert_eq!(bracketed.table("INSERT INTO [Orders] VALUES (1)"), Some("Orders"));
        assert_eq!(bracketed.table("SELECT 1"), None);
    }
}
