//! Arith: validates arithmetic expressions against a fixed context-free grammar.
//!
//! [`validate`] is the single entry point: it rejects empty input, tokenizes,
//! parses, and returns either the derivation tree or the first error found.
//!
//! ```
//! use arith_validator::{validate, ParseOutcome};
//!
//! match validate("2 * (3 + 4)") {
//!     ParseOutcome::Valid(tree) => assert_eq!(tree.label(), "termino"),
//!     ParseOutcome::Invalid(err) => panic!("{err}"),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod repl;
pub mod syntax;
pub mod validate;

pub use crate::config::ValidatorConfig;
pub use crate::errors::{SyntaxError, ValidationDiagnostic, ValidationError};
pub use crate::syntax::{DerivationNode, Position, Token, TokenKind};
pub use crate::validate::{validate, validate_with, ParseOutcome};
