use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a conversion.
///
/// Degraded outcomes (missing or malformed frontmatter, unpaired `$$`,
/// placeholder mismatches) are not represented here; they never fail a
/// conversion.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the input or writing the output failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The markdown collaborator could not render the body.
    #[error("markdown rendering failed: {0}")]
    Render(String),

    /// The template collaborator could not produce the page.
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<syntect::Error> for Error {
    fn from(err: syntect::Error) -> Self {
        Error::Render(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
