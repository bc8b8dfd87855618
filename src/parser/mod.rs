//! Source language front end
//!
//! This module turns S-expression text into an input Abstract Syntax Tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: input AST node definitions
//!
//! # Source language
//!
//! - Literals: unsigned integers, double-quoted strings (no escapes), `true`/`false`
//! - Calls: `(name arg ...)`, where the name may also be an operator (`(+ 1 2)`)
//! - Prefix binary expressions: `+ 1 2`, always exactly two operands
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;
