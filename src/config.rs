//! Transform options and the `identity-insert.toml` config layer.
//!
//! Lookup order for the config file:
//! 1. the path given with `--config` (must exist),
//! 2. `identity-insert.toml` in the working directory,
//! 3. `<config dir>/identity-insert/config.toml`.
//!
//! Values given on the command line win over the file, the file wins over
//! the built-in defaults.
//!
//! ```toml
//! schema = "dbo"
//! keyword_case = "upper"
//! preamble = "passthrough"
//! ```

use crate::error::{ToggleError, ToggleResult};
use crate::parser::DEFAULT_SCHEMA;
use crate::toggle::KeywordCase;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "identity-insert.toml";

/// How lines before the first recognised INSERT are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preamble {
    /// Open a block on the very first line, even when no table is known yet.
    /// This yields `set identity_insert  on;` with an empty name for files
    /// that start with comments or `USE` statements.
    #[default]
    Toggle,
    /// Copy leading lines unchanged and open the first block on the first
    /// recognised INSERT. A file without INSERTs comes out unchanged.
    Passthrough,
}

/// Settings for a single transformation pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub schema: String,
    pub keyword_case: KeywordCase,
    pub preamble: Preamble,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            keyword_case: KeywordCase::default(),
            preamble: Preamble::default(),
        }
    }
}

/// Command-line values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub schema: Option<String>,
    pub keyword_case: Option<KeywordCase>,
    pub preamble: Option<Preamble>,
}

impl Options {
    /// Parse options from TOML text.
    pub fn from_toml(path: &Path, content: &str) -> ToggleResult<Self> {
        toml::from_str(content).map_err(|e| ToggleError::config(path, e.message()))
    }

    /// Load options from a config file.
    pub fn from_file(path: &Path) -> ToggleResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ToggleError::config(path, format!("Failed to read file: {}", e)))?;
        Self::from_toml(path, &content)
    }

    /// Resolve options from an explicit file, the default locations, or
    /// built-in defaults, then apply command-line overrides.
    pub fn resolve(explicit: Option<&Path>, overrides: Overrides) -> ToggleResult<Self> {
        let mut options = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "loading config");
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };
        options.apply(overrides);
        Ok(options)
    }

    fn apply(&mut self, overrides: Overrides) {
        if let Some(schema) = overrides.schema {
            self.schema = schema;
        }
        if let Some(case) = overrides.keyword_case {
            self.keyword_case = case;
        }
        if let Some(preamble) = overrides.preamble {
            self.preamble = preamble;
        }
    }
}

/// First existing config file among the default locations.
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("identity-insert").join("config.toml"))
        .filter(|path| path.is_file())
}
