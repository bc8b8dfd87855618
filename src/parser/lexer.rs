//! Lexer (tokenizer) for S-expression source
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Only six token kinds exist; anything the lexer does not recognise is a
//! [`LexError`] that carries the offending character and its offset.

use std::fmt;

/// The six token classes of the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Paren,
    Number,
    Name,
    String,
    Boolean,
    Operator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Paren => "paren",
            TokenKind::Number => "number",
            TokenKind::Name => "name",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Operator => "operator",
        };
        f.write_str(name)
    }
}

/// A single lexical unit.
///
/// `value` is the literal text as written, except for strings where the
/// delimiting quotes are stripped. `offset` is the character index of the
/// token's first character, used for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            value: value.into(),
            offset,
        }
    }

    pub fn is_open_paren(&self) -> bool {
        self.kind == TokenKind::Paren && self.value == "("
    }

    pub fn is_close_paren(&self) -> bool {
        self.kind == TokenKind::Paren && self.value == ")"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "{} \"{}\"", self.kind, self.value),
            _ => write!(f, "{} '{}'", self.kind, self.value),
        }
    }
}

/// What went wrong while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedCharacter,
    UnterminatedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter => f.write_str("unexpected character"),
            LexErrorKind::UnterminatedString => f.write_str("unterminated string starting with"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {ch:?} at position {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub ch: char,
    pub offset: usize,
}

/// Tokenize a whole source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lexer for the S-expression language
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            let start = self.position;

            match ch {
                '(' | ')' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Paren, ch, start));
                }
                // Line breaks stand in for the implicit trailing newline
                ' ' | '\n' | '\r' => {
                    self.advance();
                }
                c if c.is_ascii_digit() => {
                    let digits = self.take_while(|c| c.is_ascii_digit());
                    tokens.push(Token::new(TokenKind::Number, digits, start));
                }
                c if c.is_ascii_alphabetic() => {
                    let word = self.take_while(|c| c.is_ascii_alphabetic());
                    let kind = match word.as_str() {
                        "true" | "false" => TokenKind::Boolean,
                        _ => TokenKind::Name,
                    };
                    tokens.push(Token::new(kind, word, start));
                }
                '"' => tokens.push(self.string_literal()?),
                '+' | '-' | '*' | '/' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Operator, ch, start));
                }
                _ => {
                    return Err(LexError {
                        kind: LexErrorKind::UnexpectedCharacter,
                        ch,
                        offset: start,
                    });
                }
            }
        }

        Ok(tokens)
    }

    /// Parse string literal. No escape sequences: the string ends at the
    /// next double quote.
    fn string_literal(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(); // opening quote

        let mut value = String::new();
        while let Some(ch) = self.advance() {
            if ch == '"' {
                return Ok(Token::new(TokenKind::String, value, start));
            }
            value.push(ch);
        }

        Err(LexError {
            kind: LexErrorKind::UnterminatedString,
            ch: '"',
            offset: start,
        })
    }

    /// Consume the maximal run of characters matching `pred`.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut run = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            run.push(ch);
            self.advance();
        }
        run
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }
}
