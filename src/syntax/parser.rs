//! Recursive-descent parser for arithmetic expressions.
//!
//! ```text
//! expression := term (("+" | "-") term)*
//! term       := factor (("*" | "/") factor)*
//! factor     := NUMBER | "(" expression ")"
//! ```
//!
//! Repeated operators nest to the left, so the tree reflects evaluation order.
//! A rule that matched a single child is inlined: `2` parses to `numero(2)`,
//! not `expresion(termino(numero(2)))`. Parenthesized groups keep both
//! parentheses as leaves under a `factor` node.
//!
//! Two limits keep every later walk of the tree bounded: `max_depth` caps open
//! parentheses, and `max_tree_depth` caps the height of the finished tree. An
//! operator chain adds one level per operator without any parentheses.

use crate::config::ValidatorConfig;
use crate::errors::{SyntaxError, ValidationError};
use crate::syntax::tree::{self, DerivationNode};
use crate::syntax::{Token, TokenKind};
use crate::ParseOutcome;

/// Tokens that may follow a complete expression at the top level.
const AFTER_EXPRESSION: [TokenKind; 5] = [
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::EndOfInput,
];

/// Tokens that may start a factor.
const FACTOR_START: [TokenKind; 2] = [TokenKind::Number, TokenKind::LParen];

/// Parses a token stream with the default configuration.
///
/// # Panics
/// Panics if `tokens` does not end with the `END_OF_INPUT` sentinel.
pub fn parse(tokens: &[Token]) -> ParseOutcome {
    parse_with(tokens, &ValidatorConfig::default())
}

/// Parses a token stream, enforcing `config.max_depth` on parenthesis nesting
/// and `config.max_tree_depth` on the height of the derivation tree.
///
/// # Panics
/// Panics if `tokens` does not end with the `END_OF_INPUT` sentinel.
pub fn parse_with(tokens: &[Token], config: &ValidatorConfig) -> ParseOutcome {
    Parser::new(tokens, config)
        .run()
        .map(|subtree| subtree.node)
        .into()
}

struct Parser<'t> {
    tokens: &'t [Token],
    cursor: usize,
    depth: usize,
    max_depth: usize,
    max_tree_depth: usize,
}

/// A parsed node and its height; a leaf has height 1.
struct Subtree {
    node: DerivationNode,
    depth: usize,
}

impl Subtree {
    fn leaf(token: Token) -> Self {
        Self {
            node: DerivationNode::leaf(token),
            depth: 1,
        }
    }
}

type ParseResult = Result<Subtree, ValidationError>;

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token], config: &ValidatorConfig) -> Self {
        assert!(
            tokens.last().is_some_and(|t| t.is(TokenKind::EndOfInput)),
            "token stream must end with END_OF_INPUT"
        );
        Self {
            tokens,
            cursor: 0,
            depth: 0,
            max_depth: config.max_depth,
            max_tree_depth: config.max_tree_depth,
        }
    }

    fn run(mut self) -> ParseResult {
        let tree = self.expression()?;
        let next = self.peek();
        if !next.is(TokenKind::EndOfInput) {
            return Err(SyntaxError::unexpected_token(next, AFTER_EXPRESSION).into());
        }
        Ok(tree)
    }

    fn expression(&mut self) -> ParseResult {
        log::trace!("expression @{}", self.peek().position);
        self.binary_chain(tree::EXPRESSION, &[TokenKind::Plus, TokenKind::Minus], Self::term)
    }

    fn term(&mut self) -> ParseResult {
        log::trace!("term @{}", self.peek().position);
        self.binary_chain(tree::TERM, &[TokenKind::Star, TokenKind::Slash], Self::factor)
    }

    /// Parses `operand (op operand)*`, nesting each application as the left
    /// child of the next.
    fn binary_chain(
        &mut self,
        label: &str,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult,
    ) -> ParseResult {
        let mut left = operand(self)?;
        while operators.contains(&self.peek().kind) {
            let op = self.advance();
            let at = op.clone();
            let right = operand(self)?;
            left = self.internal(label, vec![left, Subtree::leaf(op), right], &at)?;
        }
        Ok(left)
    }

    fn factor(&mut self) -> ParseResult {
        let next = self.peek();
        match next.kind {
            TokenKind::Number => {
                let number = self.advance();
                self.internal(tree::NUMBER, vec![Subtree::leaf(number)], next)
            }
            TokenKind::LParen => self.group(),
            _ => Err(SyntaxError::unexpected_token(next, FACTOR_START).into()),
        }
    }

    fn group(&mut self) -> ParseResult {
        if self.depth >= self.max_depth {
            return Err(ValidationError::NestingTooDeep {
                limit: self.max_depth,
                found: self.peek().clone(),
            });
        }
        let open = self.advance();
        self.depth += 1;
        let inner = self.expression()?;
        self.depth -= 1;

        let next = self.peek();
        if !next.is(TokenKind::RParen) {
            return Err(SyntaxError::unexpected_token(next, [TokenKind::RParen]).into());
        }
        let close = self.advance();
        let at = open.clone();
        self.internal(
            tree::FACTOR,
            vec![Subtree::leaf(open), inner, Subtree::leaf(close)],
            &at,
        )
    }

    /// Builds an internal node, rejecting it when the tree would grow taller
    /// than `max_tree_depth`. `at` is the token that introduced the node.
    fn internal(&self, label: &str, children: Vec<Subtree>, at: &Token) -> ParseResult {
        let depth = 1 + children.iter().map(|c| c.depth).max().unwrap_or(0);
        if depth > self.max_tree_depth {
            return Err(ValidationError::TreeTooDeep {
                limit: self.max_tree_depth,
                found: at.clone(),
            });
        }
        let children = children.into_iter().map(|c| c.node).collect();
        Ok(Subtree {
            node: DerivationNode::internal(label, children),
            depth,
        })
    }

    fn peek(&self) -> &'t Token {
        let tokens: &'t [Token] = self.tokens;
        &tokens[self.cursor]
    }

    /// Consumes the current token. Consuming the sentinel is a parser defect.
    fn advance(&mut self) -> Token {
        let token = self.peek();
        assert!(
            !token.is(TokenKind::EndOfInput),
            "parser advanced past END_OF_INPUT at {}",
            token.position
        );
        self.cursor += 1;
        token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{tokenize, Position};

    fn parse_str(input: &str) -> Result<DerivationNode, ValidationError> {
        parse(&tokenize(input).unwrap()).into_result()
    }

    fn shape(node: &DerivationNode) -> String {
        match node {
            DerivationNode::Leaf { token } => token.text.clone(),
            DerivationNode::Internal { label, children } => format!(
                "{}({})",
                label,
                children.iter().map(shape).collect::<Vec<_>>().join(", ")
            ),
        }
    }

    fn expected_of(err: ValidationError) -> (TokenKind, Vec<TokenKind>) {
        match err {
            ValidationError::Syntax(SyntaxError::UnexpectedToken { found, expected }) => {
                (found.kind, expected.into_iter().collect())
            }
            other => panic!("expected UnexpectedToken, got {other:?}"),
        }
    }

    #[test]
    fn single_number_is_inlined() {
        assert_eq!(shape(&parse_str("7").unwrap()), "numero(7)");
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            shape(&parse_str("2 + 3 * 4").unwrap()),
            "expresion(numero(2), +, termino(numero(3), *, numero(4)))"
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(
            shape(&parse_str("8 - 3 - 2").unwrap()),
            "expresion(expresion(numero(8), -, numero(3)), -, numero(2))"
        );
    }

    #[test]
    fn division_is_left_associative() {
        assert_eq!(
            shape(&parse_str("8 / 4 * 2").unwrap()),
            "termino(termino(numero(8), /, numero(4)), *, numero(2))"
        );
    }

    #[test]
    fn parentheses_keep_both_leaves() {
        assert_eq!(
            shape(&parse_str("2 * (3 + 4)").unwrap()),
            "termino(numero(2), *, factor((, expresion(numero(3), +, numero(4)), )))"
        );
    }

    #[test]
    fn missing_close_paren_expects_rparen() {
        let (found, expected) = expected_of(parse_str("2 * (3 + 4").unwrap_err());
        assert_eq!(found, TokenKind::EndOfInput);
        assert_eq!(expected, vec![TokenKind::RParen]);
    }

    #[test]
    fn trailing_garbage_expects_operator_or_end() {
        let (found, expected) = expected_of(parse_str("2 + 3 )").unwrap_err());
        assert_eq!(found, TokenKind::RParen);
        assert_eq!(expected, AFTER_EXPRESSION.to_vec());
    }

    #[test]
    fn dangling_operator_expects_a_factor() {
        let (found, expected) = expected_of(parse_str("2 +").unwrap_err());
        assert_eq!(found, TokenKind::EndOfInput);
        assert_eq!(expected, FACTOR_START.to_vec());
    }

    #[test]
    fn leading_operator_expects_a_factor() {
        let (found, expected) = expected_of(parse_str("* 2").unwrap_err());
        assert_eq!(found, TokenKind::Star);
        assert_eq!(expected, FACTOR_START.to_vec());
    }

    #[test]
    fn empty_parentheses_expect_a_factor() {
        let (found, _) = expected_of(parse_str("()").unwrap_err());
        assert_eq!(found, TokenKind::RParen);
    }

    #[test]
    fn adjacent_numbers_are_trailing_garbage() {
        let (found, expected) = expected_of(parse_str("1 2").unwrap_err());
        assert_eq!(found, TokenKind::Number);
        assert_eq!(expected, AFTER_EXPRESSION.to_vec());
    }

    #[test]
    fn first_error_wins() {
        let err = parse_str("(1 + ) )").unwrap_err();
        let (found, _) = expected_of(err.clone());
        assert_eq!(found, TokenKind::RParen);
        if let ValidationError::Syntax(SyntaxError::UnexpectedToken { found, .. }) = err {
            assert_eq!(found.position.column, 6);
        }
    }

    #[test]
    fn nesting_within_the_limit_is_accepted() {
        let config = ValidatorConfig::default().with_max_depth(3);
        let tokens = tokenize("(((1)))").unwrap();
        assert!(parse_with(&tokens, &config).is_valid());
    }

    #[test]
    fn nesting_beyond_the_limit_is_rejected() {
        let config = ValidatorConfig::default().with_max_depth(3);
        let tokens = tokenize("((((1))))").unwrap();
        let err = parse_with(&tokens, &config).into_result().unwrap_err();
        assert_eq!(
            err,
            ValidationError::NestingTooDeep {
                limit: 3,
                found: Token::new(
                    TokenKind::LParen,
                    "(",
                    Position {
                        line: 1,
                        column: 4,
                        offset: 3
                    }
                ),
            }
        );
    }

    #[test]
    fn sibling_groups_do_not_accumulate_depth() {
        let config = ValidatorConfig::default().with_max_depth(1);
        let tokens = tokenize("(1) + (2) * (3)").unwrap();
        assert!(parse_with(&tokens, &config).is_valid());
    }

    #[test]
    fn pathological_nesting_fails_without_overflow() {
        let input = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = parse_str(&input).unwrap_err();
        assert!(matches!(err, ValidationError::NestingTooDeep { limit: 128, .. }));
    }

    #[test]
    fn long_operator_chain_fails_without_overflow() {
        let input = format!("{}1", "1+".repeat(100_000));
        let err = parse_str(&input).unwrap_err();
        match &err {
            ValidationError::TreeTooDeep { limit, found } => {
                assert_eq!(*limit, 1024);
                assert_eq!(found.kind, TokenKind::Plus);
            }
            other => panic!("expected TreeTooDeep, got {other:?}"),
        }
        drop(err);
    }

    #[test]
    fn operator_chain_height_grows_by_one_per_operator() {
        // 5 operators: numero leaves at depth 2, plus one level per application.
        let tokens = tokenize("1-1-1-1-1-1").unwrap();
        let tight = ValidatorConfig::default().with_max_tree_depth(7);
        assert!(parse_with(&tokens, &tight).is_valid());

        let too_tight = ValidatorConfig::default().with_max_tree_depth(6);
        let err = parse_with(&tokens, &too_tight).into_result().unwrap_err();
        match err {
            ValidationError::TreeTooDeep { limit, found } => {
                assert_eq!(limit, 6);
                assert_eq!(found.position.column, 10);
            }
            other => panic!("expected TreeTooDeep, got {other:?}"),
        }
    }

    #[test]
    fn chain_below_the_tree_limit_is_accepted() {
        let input = format!("{}1", "1*".repeat(1_000));
        let tree = parse_str(&input).unwrap();
        assert_eq!(tree.depth(), 1_002);
        assert!(tree.pretty().starts_with("termino\n"));
    }

    #[test]
    #[should_panic(expected = "END_OF_INPUT")]
    fn stream_without_sentinel_is_a_defect() {
        let tokens = vec![Token::new(TokenKind::Number, "1", Position::start())];
        let _ = parse(&tokens);
    }
}
