//! Block transformer.
//!
//! Folds over the input lines with a one-line lookback, carrying the table of
//! the previous line and the output built so far. Whenever the table changes
//! the previous block is closed and the next one opened:
//!
//! ```text
//! INSERT INTO dbo.A ...          set identity_insert A on;
//! INSERT INTO dbo.B ...    =>    INSERT INTO dbo.A ...
//!                                set identity_insert A off;
//!
//!                                set identity_insert B on;
//!                                INSERT INTO dbo.B ...
//!                                set identity_insert B off;
//! ```
//!
//! Lines that are not INSERTs inherit the table of the line above.

use crate::config::{Options, Preamble};
use crate::parser::{SchemaMatcher, TableMatcher};
use crate::toggle::{KeywordCase, ToSql, Toggle};

/// Result of a transformation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transformed {
    /// Output lines, without line terminators.
    pub lines: Vec<String>,
    /// Table of every block, in the order the blocks were opened.
    pub blocks: Vec<String>,
}

/// Wraps runs of same-table INSERTs in identity insert toggles.
#[derive(Debug, Clone)]
pub struct BlockTransformer<M> {
    matcher: M,
    case: KeywordCase,
    preamble: Preamble,
}

impl BlockTransformer<SchemaMatcher> {
    /// Build a transformer that recognises `INSERT INTO <options.schema>.<table>`.
    pub fn from_options(options: &Options) -> Self {
        Self::new(SchemaMatcher::new(options.schema.as_str()))
            .keyword_case(options.keyword_case)
            .preamble(options.preamble)
    }
}

impl<M: TableMatcher> BlockTransformer<M> {
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            case: KeywordCase::default(),
            preamble: Preamble::default(),
        }
    }

    pub fn keyword_case(mut self, case: KeywordCase) -> Self {
        self.case = case;
        self
    }

    pub fn preamble(mut self, preamble: Preamble) -> Self {
        self.preamble = preamble;
        self
    }

    /// Transform a sequence of lines (without line terminators).
    pub fn transform<'a, I>(&self, lines: I) -> Transformed
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (previous, mut out) = lines.into_iter().fold(
            (None, Transformed::default()),
            |(previous, mut out): (Option<String>, Transformed), line| {
                let current = self.current_table(previous.as_deref(), line);

                match (previous.as_deref(), current.as_deref()) {
                    (None, Some(table)) => {
                        self.open(&mut out, table);
                    }
                    (Some(prev), Some(table)) if prev != table => {
                        tracing::debug!(from = prev, to = table, "table block transition");
                        out.lines.push(self.render(Toggle::off(prev)));
                        out.lines.push(String::new());
                        self.open(&mut out, table);
                    }
                    _ => {}
                }

                out.lines.push(line.to_string());
                (current, out)
            },
        );

        match previous {
            Some(table) => out.lines.push(self.render(Toggle::off(&table))),
            // Empty input: the closing toggle is unconditional in toggle mode.
            None if self.preamble == Preamble::Toggle => {
                out.lines.push(self.render(Toggle::off("")))
            }
            None => {}
        }

        tracing::debug!(
            lines = out.lines.len(),
            blocks = out.blocks.len(),
            "transform finished"
        );
        out
    }

    /// Transform a whole text; `\n` and `\r\n` terminators are both accepted.
    pub fn transform_str(&self, text: &str) -> Transformed {
        self.transform(text.lines())
    }

    /// Table associated with `line`, given the table of the line above.
    ///
    /// In toggle mode the first line always gets a table, the empty one
    /// when it is not an INSERT.
    fn current_table(&self, previous: Option<&str>, line: &str) -> Option<String> {
        match self.matcher.table(line) {
            Some(table) => Some(table.to_string()),
            None => match (previous, self.preamble) {
                (Some(prev), _) => Some(prev.to_string()),
                (None, Preamble::Toggle) => Some(String::new()),
                (None, Preamble::Passthrough) => None,
            },
        }
    }

    fn open(&self, out: &mut Transformed, table: &str) {
        out.lines.push(self.render(Toggle::on(table)));
        out.blocks.push(table.to_string());
    }

    fn render(&self, toggle: Toggle<'_>) -> String {
        toggle.to_sql(self.case)
    }
}

impl Default for BlockTransformer<SchemaMatcher> {
    fn default() -> Self {
        Self::new(SchemaMatcher::default())
    }
}
