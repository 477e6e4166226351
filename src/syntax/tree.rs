//! Derivation tree produced by a successful parse.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::syntax::{Token, TokenKind};

/// Rule labels used for internal nodes.
pub const EXPRESSION: &str = "expresion";
pub const TERM: &str = "termino";
pub const NUMBER: &str = "numero";
pub const FACTOR: &str = "factor";

/// Number of spaces added per nesting level by [`DerivationNode::pretty`].
const INDENT_WIDTH: usize = 2;

/// A node of the derivation tree. Each node owns its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum DerivationNode {
    /// A grammar-rule application.
    Internal {
        label: String,
        children: Vec<DerivationNode>,
    },
    /// A matched terminal.
    Leaf { token: Token },
}

impl DerivationNode {
    pub fn internal(label: impl Into<String>, children: Vec<DerivationNode>) -> Self {
        Self::Internal {
            label: label.into(),
            children,
        }
    }

    pub fn leaf(token: Token) -> Self {
        Self::Leaf { token }
    }

    /// The rule label for internal nodes, the token kind name for leaves.
    pub fn label(&self) -> &str {
        match self {
            Self::Internal { label, .. } => label,
            Self::Leaf { token } => token.kind.name(),
        }
    }

    pub fn children(&self) -> &[DerivationNode] {
        match self {
            Self::Internal { children, .. } => children,
            Self::Leaf { .. } => &[],
        }
    }

    /// Terminal tokens in left-to-right order.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Self::Internal { children, .. } => stack.extend(children.iter().rev()),
                Self::Leaf { token } => out.push(token),
            }
        }
        out
    }

    /// Concatenated leaf text separated by single spaces.
    pub fn text(&self) -> String {
        self.leaves()
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Longest root-to-leaf path, counting the root.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Renders the tree one node per line, children indented one level.
    ///
    /// Internal nodes print their label; leaves print `KIND text`.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self, 0)];
        while let Some((node, level)) = stack.pop() {
            out.extend(std::iter::repeat(' ').take(level * INDENT_WIDTH));
            match node {
                Self::Internal { label, children } => {
                    out.push_str(label);
                    out.push('\n');
                    stack.extend(children.iter().rev().map(|child| (child, level + 1)));
                }
                Self::Leaf { token } => {
                    out.push_str(token.kind.name());
                    if token.kind != TokenKind::EndOfInput {
                        out.push(' ');
                        out.push_str(&token.text);
                    }
                    out.push('\n');
                }
            }
        }
        out
    }
}

impl fmt::Display for DerivationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Position;

    fn tok(kind: TokenKind, text: &str, column: usize) -> Token {
        Token::new(
            kind,
            text,
            Position {
                line: 1,
                column,
                offset: column - 1,
            },
        )
    }

    fn sample() -> DerivationNode {
        DerivationNode::internal(
            EXPRESSION,
            vec![
                DerivationNode::internal(NUMBER, vec![DerivationNode::leaf(tok(TokenKind::Number, "1", 1))]),
                DerivationNode::leaf(tok(TokenKind::Plus, "+", 3)),
                DerivationNode::internal(NUMBER, vec![DerivationNode::leaf(tok(TokenKind::Number, "2", 5))]),
            ],
        )
    }

    #[test]
    fn pretty_indents_children_two_spaces_per_level() {
        assert_eq!(
            sample().pretty(),
            "expresion\n  numero\n    NUMBER 1\n  PLUS +\n  numero\n    NUMBER 2\n"
        );
    }

    #[test]
    fn leaves_are_in_parse_order() {
        let tree = sample();
        let texts: Vec<_> = tree.leaves().iter().map(|t| t.text.clone()).collect();
        assert_eq!(texts, vec!["1", "+", "2"]);
        assert_eq!(tree.text(), "1 + 2");
    }

    #[test]
    fn depth_counts_the_root() {
        assert_eq!(sample().depth(), 3);
        assert_eq!(DerivationNode::leaf(tok(TokenKind::Number, "1", 1)).depth(), 1);
    }

    #[test]
    fn label_of_leaf_is_token_kind() {
        let leaf = DerivationNode::leaf(tok(TokenKind::Star, "*", 1));
        assert_eq!(leaf.label(), "STAR");
        assert!(leaf.children().is_empty());
    }
}
