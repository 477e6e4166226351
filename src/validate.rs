//! The core entry point: tokenize, then parse.

use serde::{Deserialize, Serialize};

use crate::config::ValidatorConfig;
use crate::errors::ValidationError;
use crate::syntax::{parse_with, tokenize, DerivationNode};

/// Result of validating one input. Either a full tree or the first error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum ParseOutcome {
    Valid(DerivationNode),
    Invalid(ValidationError),
}

impl ParseOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn tree(&self) -> Option<&DerivationNode> {
        match self {
            Self::Valid(tree) => Some(tree),
            Self::Invalid(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<DerivationNode, ValidationError> {
        self.into()
    }
}

impl From<Result<DerivationNode, ValidationError>> for ParseOutcome {
    fn from(result: Result<DerivationNode, ValidationError>) -> Self {
        match result {
            Ok(tree) => Self::Valid(tree),
            Err(err) => Self::Invalid(err),
        }
    }
}

impl From<ParseOutcome> for Result<DerivationNode, ValidationError> {
    fn from(outcome: ParseOutcome) -> Self {
        match outcome {
            ParseOutcome::Valid(tree) => Ok(tree),
            ParseOutcome::Invalid(err) => Err(err),
        }
    }
}

/// Validates `input` with the default configuration.
pub fn validate(input: &str) -> ParseOutcome {
    validate_with(input, &ValidatorConfig::default())
}

/// Validates `input`. Empty or whitespace-only input is rejected before
/// tokenizing; a lexical error short-circuits parsing.
pub fn validate_with(input: &str, config: &ValidatorConfig) -> ParseOutcome {
    let outcome = if input.trim().is_empty() {
        ParseOutcome::Invalid(ValidationError::EmptyInput)
    } else {
        match tokenize(input) {
            Ok(tokens) => parse_with(&tokens, config),
            Err(err) => ParseOutcome::Invalid(err.into()),
        }
    };
    match &outcome {
        ParseOutcome::Valid(tree) => log::debug!("valid, tree depth {}", tree.depth()),
        ParseOutcome::Invalid(err) => log::debug!("invalid ({})", err.code_suffix()),
    }
    outcome
}
