//! Lexer: converts raw input into classified tokens.
//!
//! Whitespace (space, tab, carriage return, newline) separates tokens and is
//! dropped. Numbers follow maximal munch: all contiguous digits, then an
//! optional `.` with at least one digit after it. The token stream always ends
//! with an `END_OF_INPUT` sentinel placed just past the last real character.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::errors::SyntaxError;
use crate::syntax::{Position, Token, TokenKind};

/// Tokenizes `input`, failing on the first character no rule matches.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    pos: Position,
    /// Position just past the last character of the last emitted token.
    end: Position,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            pos: Position::start(),
            end: Position::start(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        while let Some(ch) = self.peek() {
            if is_whitespace(ch) {
                self.bump();
                continue;
            }
            let token = self.next_token(ch)?;
            log::trace!("token {}", token);
            tokens.push(token);
            self.end = self.pos;
        }
        tokens.push(Token::end_of_input(self.end));
        Ok(tokens)
    }

    fn next_token(&mut self, ch: char) -> Result<Token, SyntaxError> {
        let start = self.pos;
        if ch.is_ascii_digit() {
            return Ok(self.number(start));
        }
        match TokenKind::from_punct(ch) {
            Some(kind) => {
                self.bump();
                Ok(Token::new(kind, ch.to_string(), start))
            }
            None => Err(SyntaxError::unexpected_character(ch, start)),
        }
    }

    fn number(&mut self, start: Position) -> Token {
        self.digits();
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.digits();
        }
        let text = &self.input[start.offset..self.pos.offset];
        Token::new(TokenKind::Number, text, start)
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, ch)| ch)
    }

    fn bump(&mut self) {
        if let Some((_, ch)) = self.chars.next() {
            self.pos = self.pos.advance(ch);
        }
    }
}

/// Space, tab, newline, form feed and carriage return.
fn is_whitespace(ch: char) -> bool {
    ch.is_ascii_whitespace()
}
