//! Recursive descent parser
//!
//! This module provides the [`Parser`] struct, its error type and the
//! [`parse`] entry point.
//!
//! # Grammar
//!
//! One token of lookahead, no backtracking:
//!
//! ```text
//! expr := number | string | boolean
//!       | operator expr expr
//!       | "(" <any non-paren token> expr* ")"
//! ```
//!
//! Nesting is capped at [`MAX_NESTING`] levels so that no later recursive
//! stage can run out of stack.
//!
//! All cursor state lives in the `Parser` value, so every call to [`parse`]
//! is independent of every other.

use crate::compiler::constants::MAX_NESTING;
use crate::parser::ast::{Node, Program};
use crate::parser::lexer::{Token, TokenKind};

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected {kind} token '{value}' at position {offset}")]
    UnexpectedToken {
        kind: TokenKind,
        value: String,
        offset: usize,
    },
    #[error("unexpected end of input while parsing {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("expression nested deeper than {limit} levels at position {offset}")]
    TooDeep { limit: usize, offset: usize },
}

impl ParseError {
    fn unexpected(token: &Token) -> Self {
        ParseError::UnexpectedToken {
            kind: token.kind,
            value: token.value.clone(),
            offset: token.offset,
        }
    }
}

/// Parse a token stream into a [`Program`].
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for the S-expression language
pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    /// Expressions currently open
    depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the entire program (every top-level expression)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let node = self.parse_expression()?;
            program.body.push(node);
        }

        Ok(program)
    }

    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let token = self.advance("an expression")?;
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING,
                offset: token.offset,
            });
        }

        self.depth += 1;
        let node = self.parse_token(token);
        self.depth -= 1;
        node
    }

    fn parse_token(&mut self, token: &'t Token) -> Result<Node, ParseError> {
        match token.kind {
            TokenKind::Number => Ok(Node::NumberLiteral(token.value.clone())),
            TokenKind::String => Ok(Node::StringLiteral(token.value.clone())),
            TokenKind::Boolean => Ok(Node::BooleanLiteral(token.value.clone())),
            TokenKind::Operator => {
                let operator = token.value.clone();
                let left = self.parse_operand()?;
                let right = self.parse_operand()?;
                Ok(Node::BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
            TokenKind::Paren if token.is_open_paren() => self.parse_call(),
            _ => Err(ParseError::unexpected(token)),
        }
    }

    fn parse_operand(&mut self) -> Result<Node, ParseError> {
        if self.is_at_end() {
            return Err(ParseError::UnexpectedEnd {
                expected: "a binary operand",
            });
        }
        self.parse_expression()
    }

    /// Parse the rest of a call after its opening paren.
    fn parse_call(&mut self) -> Result<Node, ParseError> {
        let name_token = self.advance("a call name")?;
        if name_token.kind == TokenKind::Paren {
            return Err(ParseError::unexpected(name_token));
        }
        let name = name_token.value.clone();

        let mut params = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "a closing paren",
                    });
                }
                Some(token) if token.is_close_paren() => {
                    self.position += 1;
                    break;
                }
                Some(_) => params.push(self.parse_expression()?),
            }
        }

        Ok(Node::CallExpression { name, params })
    }

    // ===== Helper methods =====

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self, expected: &'static str) -> Result<&'t Token, ParseError> {
        let token = self
            .peek()
            .ok_or(ParseError::UnexpectedEnd { expected })?;
        self.position += 1;
        Ok(token)
    }
}
