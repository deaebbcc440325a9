use std::path::PathBuf;

use thiserror::Error;

/// Process exit codes.
pub struct ExitCode;

impl ExitCode {
    pub const SUCCESS: i32 = 0;

    /// Conversion failed (rendering or templating).
    pub const ERROR: i32 = 1;

    /// Invalid input path or arguments.
    pub const USAGE_ERROR: i32 = 2;

    /// Input unreadable or output unwritable.
    pub const IO_ERROR: i32 = 3;
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("File '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input file must be a markdown file (.md or .markdown)")]
    NotMarkdown(PathBuf),

    #[error(transparent)]
    Convert(#[from] mkdown_core::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InputNotFound(_) | CliError::NotMarkdown(_) => ExitCode::USAGE_ERROR,
            CliError::Convert(mkdown_core::Error::Io { .. }) => ExitCode::IO_ERROR,
            CliError::Convert(_) => ExitCode::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_exit_codes() {
        assert_eq!(
            CliError::InputNotFound("a.md".into()).exit_code(),
            ExitCode::USAGE_ERROR
        );
        assert_eq!(
            CliError::NotMarkdown("a.txt".into()).exit_code(),
            ExitCode::USAGE_ERROR
        );
        let io = mkdown_core::Error::Io {
            path: "out.html".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(CliError::from(io).exit_code(), ExitCode::IO_ERROR);
        assert_eq!(
            CliError::from(mkdown_core::Error::Render("x".into())).exit_code(),
            ExitCode::ERROR
        );
    }

    #[test]
    fn messages_name_the_file() {
        assert_eq!(
            CliError::InputNotFound("missing.md".into()).to_string(),
            "File 'missing.md' not found"
        );
    }
}
