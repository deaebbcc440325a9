//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use mkdown_core::{ConversionOptions, Theme};

const EXAMPLES: &str = "\
Examples:
  mkdown README.md
  mkdown input.md -o output.html
  mkdown doc.md --theme light
  mkdown diagram.md --mermaid
  mkdown math.md --math
  mkdown doc.md --mermaid --math --theme light";

/// Convert a Markdown file into a styled, self-contained HTML page.
#[derive(Parser, Debug)]
#[command(name = "mkdown", author, version, about, after_help = EXAMPLES)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Markdown file to convert (.md or .markdown).
    pub input: PathBuf,

    /// Output file path (default: input file name with .html extension).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Theme to use.
    #[arg(short, long, value_enum, default_value_t = ThemeArg::Dark, env = "MKDOWN_THEME")]
    pub theme: ThemeArg,

    /// Enable Mermaid diagram support (requires internet).
    #[arg(long)]
    pub mermaid: bool,

    /// Enable math rendering with KaTeX (requires internet).
    #[arg(long)]
    pub math: bool,

    /// Increase log verbosity (--verbose info, twice debug, three times trace).
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Show version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

impl Cli {
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            theme: self.theme.into(),
            enable_diagrams: self.mermaid,
            enable_math: self.math,
        }
    }

    /// `--output`, or the input path with its extension replaced by `.html`.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mkdown").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&["notes.md"]);
        assert_eq!(cli.theme, ThemeArg::Dark);
        assert!(!cli.mermaid && !cli.math);
        assert_eq!(cli.output_path(), PathBuf::from("notes.html"));
        assert_eq!(cli.conversion_options(), ConversionOptions::default());
    }

    #[test]
    fn flags_after_positional() {
        let cli = parse(&["doc.md", "--mermaid", "--math", "-t", "light", "-o", "out/page.html"]);
        let options = cli.conversion_options();
        assert_eq!(options.theme, Theme::Light);
        assert!(options.enable_diagrams && options.enable_math);
        assert_eq!(cli.output_path(), PathBuf::from("out/page.html"));
    }

    #[test]
    fn rejects_unknown_theme() {
        let result = Cli::try_parse_from(["mkdown", "doc.md", "--theme", "invalid"]);
        assert!(result.is_err());
    }

    #[test]
    fn requires_input() {
        assert!(Cli::try_parse_from(["mkdown"]).is_err());
    }

    #[test]
    fn short_v_is_version() {
        let err = Cli::try_parse_from(["mkdown", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn replaces_markdown_extension() {
        assert_eq!(
            default_output_path(Path::new("docs/guide.markdown")),
            PathBuf::from("docs/guide.html")
        );
    }
}
