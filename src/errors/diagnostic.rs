//! Rich terminal reporting for validation failures.
//!
//! A [`ValidationError`] only knows positions. [`ValidationDiagnostic`] pairs it
//! with the input text so `miette` can draw the offending line with a label.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};

use super::{expected_phrases, ValidationError};
use crate::errors::SyntaxError;

/// A validation error together with the source it was raised against.
#[derive(Debug)]
pub struct ValidationDiagnostic {
    error: ValidationError,
    source: Arc<NamedSource<String>>,
    code: String,
}

impl ValidationDiagnostic {
    pub fn new(error: ValidationError, name: impl AsRef<str>, input: impl Into<String>) -> Self {
        let code = format!("arith::{}", error.code_suffix());
        Self {
            error,
            source: Arc::new(NamedSource::new(name, input.into())),
            code,
        }
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }

    fn primary_label(&self) -> String {
        match &self.error {
            ValidationError::EmptyInput => "empty input".into(),
            ValidationError::Syntax(SyntaxError::UnexpectedToken { found, .. }) => {
                format!("unexpected {}", found.kind)
            }
            ValidationError::Syntax(SyntaxError::UnexpectedCharacter { .. }) => {
                "unexpected character".into()
            }
            ValidationError::NestingTooDeep { .. } => "nesting limit reached here".into(),
            ValidationError::TreeTooDeep { .. } => "expression too deep here".into(),
        }
    }

    fn primary_span(&self) -> SourceSpan {
        match self.error.byte_span() {
            Some((offset, len)) => (offset, len).into(),
            None => (0, 0).into(),
        }
    }
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for ValidationDiagnostic {}

impl Diagnostic for ValidationDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.error {
            ValidationError::EmptyInput => {
                "enter an expression such as `2 * (3 + 4)`".to_string()
            }
            ValidationError::Syntax(SyntaxError::UnexpectedToken { expected, .. }) => {
                format!("acceptable here: {}", expected_phrases(expected))
            }
            ValidationError::Syntax(SyntaxError::UnexpectedCharacter { .. }) => {
                "only digits, '.', '+', '-', '*', '/', '(' and ')' are allowed".to_string()
            }
            ValidationError::NestingTooDeep { limit, .. } => {
                format!("reduce the parenthesis depth to at most {limit}")
            }
            ValidationError::TreeTooDeep { limit, .. } => {
                format!("split the expression or raise --max-tree-depth above {limit}")
            }
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if matches!(self.error, ValidationError::EmptyInput) {
            return None;
        }
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.primary_span(),
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source)
    }
}
