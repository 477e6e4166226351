//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for colorizing the verdict, printing trees and
//! token streams, generating JSON, and rendering `miette` diagnostics. By
//! centralizing output logic here, every command reports results the same way.

use std::io::{self, IsTerminal};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::args::{ColorMode, OutputFormat};
use crate::errors::{SyntaxError, ValidationDiagnostic, ValidationError};
use crate::syntax::Token;
use crate::ParseOutcome;

pub const VALID: &str = "VALID";
pub const INVALID: &str = "INVALID";

// ============================================================================
// STREAMS
// ============================================================================

/// Opens stdout honoring the requested color mode. `auto` only colors terminals.
pub fn stdout(mode: ColorMode) -> StandardStream {
    let choice = match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
    };
    StandardStream::stdout(choice)
}

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Writes `VALID` and the tree, or `INVALID` and the message.
pub fn write_outcome(
    out: &mut dyn WriteColor,
    outcome: &ParseOutcome,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, outcome);
    }
    match outcome {
        ParseOutcome::Valid(tree) => {
            write_verdict(out, VALID, Color::Green)?;
            write!(out, "{}", tree.pretty())
        }
        ParseOutcome::Invalid(err) => write_rejection(out, err),
    }
}

/// Writes one token per line, or the lexical error.
pub fn write_tokens(
    out: &mut dyn WriteColor,
    tokens: &Result<Vec<Token>, SyntaxError>,
    format: OutputFormat,
) -> io::Result<()> {
    match (tokens, format) {
        (Ok(tokens), OutputFormat::Json) => write_json(out, tokens),
        (Err(err), OutputFormat::Json) => write_json(out, err),
        (Ok(tokens), OutputFormat::Text) => {
            for token in tokens {
                writeln!(out, "{}", token)?;
            }
            Ok(())
        }
        (Err(err), OutputFormat::Text) => write_rejection(out, &ValidationError::from(err.clone())),
    }
}

/// Prints a source-annotated report of `err` to stderr.
pub fn print_diagnostic(err: &ValidationError, input: &str) {
    let diagnostic = ValidationDiagnostic::new(err.clone(), "<input>", input);
    let report = miette::Report::new(diagnostic);
    eprintln!("{report:?}");
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_rejection(out: &mut dyn WriteColor, err: &ValidationError) -> io::Result<()> {
    write_verdict(out, INVALID, Color::Red)?;
    writeln!(out, "{}", err)
}

fn write_verdict(out: &mut dyn WriteColor, verdict: &str, color: Color) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", verdict)?;
    out.reset()?;
    writeln!(out)
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn WriteColor, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
