//! # identity-insert
//!
//! Wraps every run of `INSERT INTO dbo.<table>` statements in a SQL script with
//! `set identity_insert <table> on;` / `off;` so that rows carrying explicit
//! identity values can be bulk-loaded.
//!
//! ## Quick Example
//!
//! ```
//! let out = identity_insert::transform(
//!     "INSERT INTO dbo.A (Id) VALUES (1);\nINSERT INTO dbo.B (Id) VALUES (2);\n",
//! );
//! assert_eq!(
//!     out.lines,
//!     vec![
//!         "set identity_insert A on;",
//!         "INSERT INTO dbo.A (Id) VALUES (1);",
//!         "set identity_insert A off;",
//!         "",
//!         "set identity_insert B on;",
//!         "INSERT INTO dbo.B (Id) VALUES (2);",
//!         "set identity_insert B off;",
//!     ]
//! );
//! ```
//!
//! | Module      | Role                                          |
//! |-------------|-----------------------------------------------|
//! | `parser`    | Recognises INSERT lines, extracts table names |
//! | `engine`    | Folds lines into toggled table blocks         |
//! | `toggle`    | Renders `SET IDENTITY_INSERT` statements      |
//! | `config`    | Options and `identity-insert.toml`            |
//! | `files`     | Path checks, reading, atomic writing          |

pub mod config;
pub mod engine;
pub mod error;
pub mod files;
pub mod parser;
pub mod toggle;

pub mod prelude {
    pub use crate::config::{Options, Overrides, Preamble};
    pub use crate::engine::{BlockTransformer, Transformed};
    pub use crate::error::*;
    pub use crate::files::{read_lines, validate, write_lines, Plan};
    pub use crate::parser::{extract_table, SchemaMatcher, TableMatcher};
    pub use crate::toggle::{KeywordCase, Switch, ToSql, Toggle};
}

/// Transform a script with the default options (`dbo` schema, lower-case
/// keywords, toggle preamble).
pub fn transform(text: &str) -> engine::Transformed {
    engine::BlockTransformer::default().transform_str(text)
}
