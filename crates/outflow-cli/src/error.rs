//! Errors surfaced by the CLI.

use std::io;

use thiserror::Error;

use outflow::OutflowError;

use crate::diagram_file::DiagramFileError;

/// Everything [`run`](crate::run) can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Outflow(#[from] OutflowError),

    /// The input file is not a valid diagram description; `src` is kept for
    /// source snippets.
    #[error("{err}")]
    DiagramFile { err: DiagramFileError, src: String },
}

impl CliError {
    /// Create a new `DiagramFile` error with the associated source text.
    pub fn new_diagram_file_error(err: DiagramFileError, src: impl Into<String>) -> Self {
        Self::DiagramFile {
            err,
            src: src.into(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Outflow(OutflowError::Io(err))
    }
}
