//! Error types for identity-insert.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for identity-insert operations.
///
/// Every variant is raised before the output file is touched.
#[derive(Debug, Error)]
pub enum ToggleError {
    /// `--input` was not given.
    #[error("Option --input is mandatory. Type --help to display help page.")]
    MissingInput,

    /// The input path does not exist.
    #[error("input file \"{}\" does not exist. Check spelling.", .0.display())]
    InputNotFound(PathBuf),

    /// The input path exists but is a directory or a special file.
    #[error("input file is not a regular file. Check spelling.")]
    InputNotFile(PathBuf),

    /// The output path points at a directory.
    #[error("output file is a folder. Not allowed. Check spelling.")]
    OutputIsDirectory(PathBuf),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error in \"{}\": {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// IO error while reading the input or writing the output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ToggleError {
    /// Create a configuration error for the given file.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for identity-insert operations.
pub type ToggleResult<T> = Result<T, ToggleError>;
