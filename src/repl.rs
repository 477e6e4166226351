//! Interactive validation loop.
//!
//! Each line is validated on its own; lines starting with `:` are commands.

use std::io::{self, BufRead};

use termcolor::WriteColor;

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_diagnostic, write_outcome};
use crate::config::ValidatorConfig;
use crate::validate_with;

const PROMPT: &str = "arith> ";

/// REPL state that persists across lines.
pub struct ReplState {
    config: ValidatorConfig,
    format: OutputFormat,
    diagnostic: bool,
    pub valid: usize,
    pub invalid: usize,
}

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Continue,
    Quit,
}

impl ReplState {
    pub fn new(config: ValidatorConfig, format: OutputFormat, diagnostic: bool) -> Self {
        Self {
            config,
            format,
            diagnostic,
            valid: 0,
            invalid: 0,
        }
    }

    /// Validates one line, or runs it as a `:` command.
    pub fn eval_line(&mut self, line: &str, out: &mut dyn WriteColor) -> io::Result<ReplCommand> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim_start().starts_with(':') {
            return self.command(line.trim(), out);
        }
        let outcome = validate_with(line, &self.config);
        match outcome.error() {
            Some(err) => {
                self.invalid += 1;
                if self.diagnostic {
                    print_diagnostic(err, line);
                }
            }
            None => self.valid += 1,
        }
        write_outcome(out, &outcome, self.format)?;
        Ok(ReplCommand::Continue)
    }

    fn command(&mut self, command: &str, out: &mut dyn WriteColor) -> io::Result<ReplCommand> {
        match command.to_ascii_lowercase().as_str() {
            ":help" | ":h" => {
                writeln!(out, "Commands:")?;
                writeln!(out, "  :help, :h     Show this help")?;
                writeln!(out, "  :stats, :s    Show how many lines were valid and invalid")?;
                writeln!(out, "  :quit, :q     Exit")?;
                writeln!(out, "Any other line is validated as an expression.")?;
                Ok(ReplCommand::Continue)
            }
            ":stats" | ":s" => {
                writeln!(out, "valid: {}, invalid: {}", self.valid, self.invalid)?;
                Ok(ReplCommand::Continue)
            }
            ":quit" | ":q" => Ok(ReplCommand::Quit),
            other => {
                writeln!(out, "Unknown command {other}. Type :help for help.")?;
                Ok(ReplCommand::Continue)
            }
        }
    }
}

/// Runs the loop over `input` until EOF or `:quit`.
pub fn run_repl(
    state: &mut ReplState,
    input: &mut dyn BufRead,
    out: &mut dyn WriteColor,
) -> io::Result<()> {
    writeln!(out, "Arith validator. Type :help for help, :quit to exit.")?;
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        if state.eval_line(&line, out)? == ReplCommand::Quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    fn state() -> ReplState {
        ReplState::new(ValidatorConfig::default(), OutputFormat::Text, false)
    }

    #[test]
    fn lines_are_validated_and_counted() {
        let mut state = state();
        let mut out = NoColor::new(Vec::new());
        let mut input: &[u8] = b"1 + 2\n2 +\n:stats\n";
        run_repl(&mut state, &mut input, &mut out).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("VALID\nexpresion\n"));
        assert!(text.contains("INVALID\nSyntax error: Found the END of the expression unexpectedly."));
        assert!(text.contains("valid: 1, invalid: 1"));
        assert_eq!((state.valid, state.invalid), (1, 1));
    }

    #[test]
    fn quit_stops_reading() {
        let mut state = state();
        let mut out = NoColor::new(Vec::new());
        let mut input: &[u8] = b":q\n1 + 1\n";
        run_repl(&mut state, &mut input, &mut out).unwrap();
        assert_eq!(state.valid, 0);
    }

    #[test]
    fn blank_line_is_empty_input() {
        let mut state = state();
        let mut out = NoColor::new(Vec::new());
        state.eval_line("\n", &mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "INVALID\nError: The input is empty.\n");
    }
}
