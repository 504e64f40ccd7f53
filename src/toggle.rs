//! `SET IDENTITY_INSERT` statement rendering.

use serde::Deserialize;
use std::fmt;

/// Trait for rendering toggle statements as SQL.
pub trait ToSql {
    /// Render this statement with keywords in the given case.
    fn to_sql(&self, case: KeywordCase) -> String;
}

/// Whether identity insert is being enabled or disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

/// Letter case used for the emitted SQL keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCase {
    /// `SET IDENTITY_INSERT Orders ON;`
    Upper,
    /// `set identity_insert Orders on;`
    #[default]
    Lower,
}

/// A single `SET IDENTITY_INSERT <table> ON|OFF;` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle<'a> {
    pub table: &'a str,
    pub switch: Switch,
}

impl<'a> Toggle<'a> {
    pub fn on(table: &'a str) -> Self {
        Self {
            table,
            switch: Switch::On,
        }
    }

    pub fn off(table: &'a str) -> Self {
        Self {
            table,
            switch: Switch::Off,
        }
    }
}

impl ToSql for Toggle<'_> {
    fn to_sql(&self, case: KeywordCase) -> String {
        let (set, switch) = match (case, self.switch) {
            (KeywordCase::Upper, Switch::On) => ("SET IDENTITY_INSERT", "ON"),
            (KeywordCase::Upper, Switch::Off) => ("SET IDENTITY_INSERT", "OFF"),
            (KeywordCase::Lower, Switch::On) => ("set identity_insert", "on"),
            (KeywordCase::Lower, Switch::Off) => ("set identity_insert", "off"),
        };
        // An empty table name still gets its separating space.
        format!("{} {} {};", set, self.table, switch)
    }
}

impl fmt::Display for Toggle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql(KeywordCase::default()))
    }
}

impl fmt::Display for KeywordCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordCase::Upper => write!(f, "upper"),
            KeywordCase::Lower => write!(f, "lower"),
        }
    }
}
