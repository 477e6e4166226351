//! Error model and message formatting.
//!
//! Every reason an input can be rejected is a variant of [`ValidationError`].
//! This module is the only place that holds user-facing phrasing: the lexer and
//! the parser produce structured values, and the `Display` implementations here
//! turn them into the fixed message templates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::syntax::{Position, Token, TokenKind};

pub mod diagnostic;

pub use diagnostic::ValidationDiagnostic;

// ============================================================================
// PHRASE TABLE
// ============================================================================

/// Descriptive phrase for every token kind, indexed in declaration order.
static TOKEN_PHRASES: [(TokenKind, &str); 8] = [
    (TokenKind::Number, "a NUMBER"),
    (TokenKind::Plus, "a '+' (addition)"),
    (TokenKind::Minus, "a '-' (subtraction)"),
    (TokenKind::Star, "a '*' (multiplication)"),
    (TokenKind::Slash, "a '/' (division)"),
    (TokenKind::LParen, "a '(' (opening parenthesis)"),
    (TokenKind::RParen, "a ')' (closing parenthesis)"),
    (TokenKind::EndOfInput, "the END of the expression"),
];

/// Returns the human-readable phrase for a token kind.
pub fn phrase(kind: TokenKind) -> &'static str {
    TOKEN_PHRASES[kind as usize].1
}

/// Renders an expected-token set as `e1, e2, ...` in declaration order.
pub fn expected_phrases(expected: &BTreeSet<TokenKind>) -> String {
    expected
        .iter()
        .map(|kind| phrase(*kind))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// A lexical or syntactic failure. The first one encountered wins.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyntaxError {
    /// The next token matches no grammar alternative at the current position.
    #[error(
        "Syntax error: Found {} unexpectedly.\nExpected one of: [ {} ]",
        phrase(.found.kind),
        expected_phrases(.expected)
    )]
    UnexpectedToken {
        found: Token,
        expected: BTreeSet<TokenKind>,
    },

    /// No token rule matches the character at `line`/`column`.
    #[error("Syntax error: Unexpected character '{ch}' at line {line}, column {column}.")]
    UnexpectedCharacter {
        ch: char,
        line: usize,
        column: usize,
        offset: usize,
    },
}

impl SyntaxError {
    pub fn unexpected_token(
        found: &Token,
        expected: impl IntoIterator<Item = TokenKind>,
    ) -> Self {
        Self::UnexpectedToken {
            found: found.clone(),
            expected: expected.into_iter().collect(),
        }
    }

    pub fn unexpected_character(ch: char, at: Position) -> Self {
        Self::UnexpectedCharacter {
            ch,
            line: at.line,
            column: at.column,
            offset: at.offset,
        }
    }

    /// Byte range of the offending input, for labelling diagnostics.
    pub fn byte_span(&self) -> (usize, usize) {
        match self {
            Self::UnexpectedToken { found, .. } => (found.position.offset, found.span_len()),
            Self::UnexpectedCharacter { ch, offset, .. } => (*offset, ch.len_utf8()),
        }
    }
}

/// The reason an input string is not in the language.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ValidationError {
    /// The input was empty or whitespace only; checked before tokenizing.
    #[error("Error: The input is empty.")]
    EmptyInput,

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// An opening parenthesis would exceed the configured nesting limit.
    #[error(
        "Syntax error: Parentheses nested deeper than {limit} levels at line {}, column {}.",
        .found.position.line,
        .found.position.column
    )]
    NestingTooDeep { limit: usize, found: Token },

    /// The derivation tree would grow taller than the configured limit.
    /// `found` is the operator or parenthesis that added the extra level.
    #[error(
        "Syntax error: Expression nested deeper than {limit} levels at line {}, column {}.",
        .found.position.line,
        .found.position.column
    )]
    TreeTooDeep { limit: usize, found: Token },
}

impl ValidationError {
    /// Stable identifier of the variant, used as the diagnostic code suffix.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::Syntax(SyntaxError::UnexpectedToken { .. }) => "unexpected_token",
            Self::Syntax(SyntaxError::UnexpectedCharacter { .. }) => "unexpected_character",
            Self::NestingTooDeep { .. } => "nesting_too_deep",
            Self::TreeTooDeep { .. } => "tree_too_deep",
        }
    }

    /// Byte offset and length of the offending input, if any.
    pub fn byte_span(&self) -> Option<(usize, usize)> {
        match self {
            Self::EmptyInput => None,
            Self::Syntax(err) => Some(err.byte_span()),
            Self::NestingTooDeep { found, .. } | Self::TreeTooDeep { found, .. } => {
                Some((found.position.offset, found.span_len()))
            }
        }
    }
}
