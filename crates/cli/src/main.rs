//! `mkdown`: Markdown to a self-contained HTML page.

mod args;
mod error;
mod logging;

use std::path::Path;

use clap::Parser;
use mkdown_core::Converter;
use tracing::info;

use crate::args::Cli;
use crate::error::{CliError, ExitCode};
use crate::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.verbose);
    }

    match run(&cli) {
        Ok(message) => {
            if !cli.quiet {
                println!("{message}");
            }
            std::process::exit(ExitCode::SUCCESS);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// Validates the input, converts it and returns the success line.
fn run(cli: &Cli) -> Result<String, CliError> {
    validate_input(&cli.input)?;

    let options = cli.conversion_options();
    let output = cli.output_path();

    info!(input = %cli.input.display(), output = %output.display(), theme = %options.theme, "converting");
    Converter::new(options).convert_file(&cli.input, &output)?;

    let features = options.enabled_features();
    let feature_suffix = if features.is_empty() {
        String::new()
    } else {
        format!(" [{}]", features.join(", "))
    };

    Ok(format!(
        "✓ Generated: {} (theme: {}{feature_suffix})",
        output.display(),
        options.theme
    ))
}

fn validate_input(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::InputNotFound(input.to_path_buf()));
    }

    let is_markdown = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"));
    if !is_markdown {
        return Err(CliError::NotMarkdown(input.to_path_buf()));
    }

    Ok(())
}
