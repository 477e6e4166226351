//! Defines the command-line arguments and subcommands for the validator CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{ValidatorConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TREE_DEPTH};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "arith-validator",
    version,
    about = "Checks arithmetic expressions against a context-free grammar and prints the derivation tree."
)]
pub struct ArithArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Expression to validate. Read from the first line of stdin when omitted.
    #[arg(allow_hyphen_values = true)]
    pub expr: Option<String>,

    #[command(flatten)]
    pub options: GlobalOptions,
}

/// Flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalOptions {
    /// Maximum parenthesis nesting depth.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum height of the derivation tree; each chained operator adds a level.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_TREE_DEPTH)]
    pub max_tree_depth: usize,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize text output.
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Also print a source-annotated diagnostic to stderr for invalid input.
    #[arg(long, global = true)]
    pub diagnostic: bool,
}

impl GlobalOptions {
    pub fn config(&self) -> ValidatorConfig {
        ValidatorConfig::default()
            .with_max_depth(self.max_depth)
            .with_max_tree_depth(self.max_tree_depth)
    }
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate one expression and print its derivation tree (default).
    Check {
        /// Expression to validate. Read from stdin when omitted.
        #[arg(allow_hyphen_values = true)]
        expr: Option<String>,
    },
    /// Print the token stream of an expression.
    Tokens {
        /// Expression to tokenize. Read from stdin when omitted.
        #[arg(allow_hyphen_values = true)]
        expr: Option<String>,
    },
    /// Validate expressions interactively, one per line.
    Repl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}
