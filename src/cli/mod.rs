//! The validator command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions. Exit codes: 0 valid, 1 invalid, 2 internal failure.

use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use crate::cli::args::{ArithArgs, Command, GlobalOptions};
use crate::repl::{run_repl, ReplState};
use crate::syntax::tokenize;
use crate::validate_with;

pub mod args;
pub mod output;

/// Failures of the shell itself, as opposed to rejected input.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

/// Verdict of a command that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Valid,
    Invalid,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Valid => ExitCode::SUCCESS,
            Status::Invalid => ExitCode::from(1),
        }
    }
}

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = ArithArgs::parse();
    match execute(args) {
        Ok(status) => status.into(),
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Dispatches to the appropriate subcommand handler.
pub fn execute(args: ArithArgs) -> Result<Status, CliError> {
    let ArithArgs {
        command,
        expr,
        options,
    } = args;
    match command {
        None => handle_check(expr, &options),
        Some(Command::Check { expr }) => handle_check(expr, &options),
        Some(Command::Tokens { expr }) => handle_tokens(expr, &options),
        Some(Command::Repl) => handle_repl(&options),
    }
}

/// Handles the default `check` command.
fn handle_check(expr: Option<String>, options: &GlobalOptions) -> Result<Status, CliError> {
    let input = expression_or_stdin(expr)?;
    let outcome = validate_with(&input, &options.config());

    if let (Some(err), true) = (outcome.error(), options.diagnostic) {
        output::print_diagnostic(err, &input);
    }
    let mut stdout = output::stdout(options.color);
    output::write_outcome(&mut stdout, &outcome, options.format).map_err(CliError::Output)?;

    Ok(if outcome.is_valid() {
        Status::Valid
    } else {
        Status::Invalid
    })
}

/// Handles the `tokens` subcommand.
fn handle_tokens(expr: Option<String>, options: &GlobalOptions) -> Result<Status, CliError> {
    let input = expression_or_stdin(expr)?;
    let tokens = tokenize(&input);

    if let (Err(err), true) = (&tokens, options.diagnostic) {
        output::print_diagnostic(&err.clone().into(), &input);
    }
    let mut stdout = output::stdout(options.color);
    output::write_tokens(&mut stdout, &tokens, options.format).map_err(CliError::Output)?;

    Ok(match tokens {
        Ok(_) => Status::Valid,
        Err(_) => Status::Invalid,
    })
}

/// Handles the `repl` subcommand.
fn handle_repl(options: &GlobalOptions) -> Result<Status, CliError> {
    let mut state = ReplState::new(options.config(), options.format, options.diagnostic);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = output::stdout(options.color);
    run_repl(&mut state, &mut input, &mut stdout).map_err(CliError::Output)?;
    Ok(Status::Valid)
}

/// Returns the argument, or the first line of stdin without its line ending.
fn expression_or_stdin(expr: Option<String>) -> Result<String, CliError> {
    if let Some(expr) = expr {
        return Ok(expr);
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(CliError::Input)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}
